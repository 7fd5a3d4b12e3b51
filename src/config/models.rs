use crate::humanize::HumanDuration;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

/// Upstream predictor endpoints and HTTP client settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Page embedding the base64 `$jwt` token
    #[serde(default = "default_token_url")]
    pub token_url: String,
    /// Prediction endpoint, queried with `t`, `codsimt` and `codser`
    #[serde(default = "default_prediction_url")]
    pub prediction_url: String,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: HumanDuration,
    #[serde(default = "default_request_timeout")]
    pub request_timeout: HumanDuration,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            token_url: default_token_url(),
            prediction_url: default_prediction_url(),
            connect_timeout: default_connect_timeout(),
            request_timeout: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_token_url() -> String {
    "https://www.red.cl/planifica-tu-viaje/cuando-llega/".to_string()
}

fn default_prediction_url() -> String {
    "https://www.red.cl/predictor/prediccion".to_string()
}

fn default_connect_timeout() -> HumanDuration {
    HumanDuration::from_secs(10)
}

fn default_request_timeout() -> HumanDuration {
    HumanDuration::from_secs(30)
}

fn default_user_agent() -> String {
    format!("arrivals-proxy/{}", env!("CARGO_PKG_VERSION"))
}

/// CORS settings for the `next_arrivals` route
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    #[serde(default = "default_cors_origin")]
    pub origin: String,
    #[serde(default = "default_cors_methods")]
    pub methods: String,
    #[serde(default = "default_cors_headers")]
    pub headers: String,
    /// Preflight cache lifetime; omitted from responses when unset or zero
    #[serde(default = "default_cors_max_age")]
    pub max_age: Option<HumanDuration>,
    #[serde(default)]
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origin: default_cors_origin(),
            methods: default_cors_methods(),
            headers: default_cors_headers(),
            max_age: default_cors_max_age(),
            allow_credentials: false,
        }
    }
}

fn default_cors_origin() -> String {
    "*".to_string()
}

fn default_cors_methods() -> String {
    "POST".to_string()
}

fn default_cors_headers() -> String {
    "referer, origin, content-type".to_string()
}

fn default_cors_max_age() -> Option<HumanDuration> {
    Some(HumanDuration::from_secs(86400))
}
