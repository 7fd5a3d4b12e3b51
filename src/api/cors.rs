//! CORS preflight handling and header injection
//!
//! Pure helpers over [`CorsOptions`] so the routing layer decides which
//! routes get preflight support and with what settings.

use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::config::CorsConfig;
use crate::humanize::HumanDuration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsOptions {
    pub origin: String,
    pub methods: String,
    pub headers: String,
    pub max_age: Option<HumanDuration>,
    pub allow_credentials: bool,
}

impl Default for CorsOptions {
    fn default() -> Self {
        Self {
            origin: "*".to_string(),
            methods: "GET, POST, PATCH, DELETE".to_string(),
            headers: "referer, origin, content-type".to_string(),
            max_age: None,
            allow_credentials: false,
        }
    }
}

impl From<&CorsConfig> for CorsOptions {
    fn from(config: &CorsConfig) -> Self {
        Self {
            origin: config.origin.clone(),
            methods: config.methods.clone(),
            headers: config.headers.clone(),
            max_age: config.max_age,
            allow_credentials: config.allow_credentials,
        }
    }
}

/// Answers an OPTIONS request.
///
/// A request carrying both `Origin` and `Access-Control-Request-Method` is a
/// CORS preflight and gets `204` with the `Access-Control-Allow-*` headers.
/// Any other OPTIONS request gets `200` with an `Allow` header.
pub fn handle_cors(options: &CorsOptions, request_headers: &HeaderMap) -> Response {
    let is_preflight = request_headers.contains_key(header::ORIGIN)
        && request_headers.contains_key(header::ACCESS_CONTROL_REQUEST_METHOD);

    if is_preflight {
        let mut response = StatusCode::NO_CONTENT.into_response();
        let headers = response.headers_mut();

        set_header(headers, header::ACCESS_CONTROL_ALLOW_ORIGIN, &options.origin);
        set_header(headers, header::ACCESS_CONTROL_ALLOW_METHODS, &options.methods);
        set_header(headers, header::ACCESS_CONTROL_ALLOW_HEADERS, &options.headers);

        if options.allow_credentials {
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static("true"),
            );
        }

        if let Some(max_age) = options.max_age.filter(|age| age.as_secs() > 0) {
            headers.insert(header::ACCESS_CONTROL_MAX_AGE, HeaderValue::from(max_age.as_secs()));
        }

        return response;
    }

    let mut response = StatusCode::OK.into_response();
    set_header(
        response.headers_mut(),
        header::ALLOW,
        &format!("{}, HEAD, OPTIONS", options.methods),
    );
    response
}

/// Sets `Access-Control-Allow-Origin` on an outgoing response
pub fn wrap_cors_header(mut response: Response, options: &CorsOptions) -> Response {
    set_header(
        response.headers_mut(),
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        &options.origin,
    );
    response
}

fn set_header(headers: &mut HeaderMap, name: HeaderName, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(value) => {
            headers.insert(name, value);
        }
        Err(_) => warn!(header = %name, value, "Skipping invalid CORS header value"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preflight_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ORIGIN, HeaderValue::from_static("https://scltrans.it"));
        headers.insert(
            header::ACCESS_CONTROL_REQUEST_METHOD,
            HeaderValue::from_static("GET"),
        );
        headers
    }

    fn header_str<'a>(response: &'a Response, name: HeaderName) -> Option<&'a str> {
        response.headers().get(name).and_then(|v| v.to_str().ok())
    }

    #[test]
    fn test_preflight_defaults() {
        let response = handle_cors(&CorsOptions::default(), &preflight_headers());

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(header_str(&response, header::ACCESS_CONTROL_ALLOW_ORIGIN), Some("*"));
        assert_eq!(
            header_str(&response, header::ACCESS_CONTROL_ALLOW_METHODS),
            Some("GET, POST, PATCH, DELETE")
        );
        assert_eq!(
            header_str(&response, header::ACCESS_CONTROL_ALLOW_HEADERS),
            Some("referer, origin, content-type")
        );
        assert!(response.headers().get(header::ACCESS_CONTROL_MAX_AGE).is_none());
        assert!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
                .is_none()
        );
    }

    #[test]
    fn test_preflight_with_max_age_and_credentials() {
        let options = CorsOptions {
            methods: "POST".to_string(),
            max_age: Some(HumanDuration::from_secs(86400)),
            allow_credentials: true,
            ..CorsOptions::default()
        };

        let response = handle_cors(&options, &preflight_headers());

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(header_str(&response, header::ACCESS_CONTROL_ALLOW_METHODS), Some("POST"));
        assert_eq!(header_str(&response, header::ACCESS_CONTROL_MAX_AGE), Some("86400"));
        assert_eq!(
            header_str(&response, header::ACCESS_CONTROL_ALLOW_CREDENTIALS),
            Some("true")
        );
    }

    #[test]
    fn test_zero_max_age_is_omitted() {
        let options = CorsOptions {
            max_age: Some(HumanDuration::from_secs(0)),
            ..CorsOptions::default()
        };

        let response = handle_cors(&options, &preflight_headers());
        assert!(response.headers().get(header::ACCESS_CONTROL_MAX_AGE).is_none());
    }

    #[test]
    fn test_sub_second_max_age_is_omitted() {
        let options = CorsOptions {
            max_age: Some(HumanDuration(std::time::Duration::from_millis(500))),
            ..CorsOptions::default()
        };

        let response = handle_cors(&options, &preflight_headers());
        assert!(response.headers().get(header::ACCESS_CONTROL_MAX_AGE).is_none());
    }

    #[test]
    fn test_plain_options_request() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ORIGIN, HeaderValue::from_static("https://scltrans.it"));

        let options = CorsOptions {
            methods: "POST".to_string(),
            ..CorsOptions::default()
        };
        let response = handle_cors(&options, &headers);

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(header_str(&response, header::ALLOW), Some("POST, HEAD, OPTIONS"));
        assert!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }

    #[test]
    fn test_wrap_cors_header() {
        let options = CorsOptions {
            origin: "https://scltrans.it".to_string(),
            ..CorsOptions::default()
        };

        let response = wrap_cors_header(StatusCode::OK.into_response(), &options);
        assert_eq!(
            header_str(&response, header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some("https://scltrans.it")
        );
    }

    #[test]
    fn test_from_config() {
        let options = CorsOptions::from(&CorsConfig::default());
        assert_eq!(options.methods, "POST");
        assert_eq!(options.max_age, Some(HumanDuration::from_secs(86400)));
    }
}
