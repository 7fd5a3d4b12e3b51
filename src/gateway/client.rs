//! reqwest-backed upstream gateway for red.cl

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use super::error::GatewayError;
use super::token::extract_token;
use super::PredictionSource;
use crate::config::UpstreamConfig;
use crate::predictions::UpstreamDocument;

/// Upstream client holding one pooled connection set for all requests
#[derive(Debug, Clone)]
pub struct RedClient {
    client: Client,
    token_url: String,
    prediction_url: String,
}

impl RedClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout.as_duration())
            .timeout(config.request_timeout.as_duration())
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| GatewayError::Client(e.to_string()))?;

        Ok(Self {
            client,
            token_url: config.token_url.clone(),
            prediction_url: config.prediction_url.clone(),
        })
    }

    /// Sends the request and returns the body of a 2xx response
    async fn get_text(&self, request: reqwest::RequestBuilder, url: &str) -> Result<String, GatewayError> {
        let response = request.send().await.map_err(|e| {
            let err = GatewayError::from(e);
            warn!(url, error = %err, "Upstream request failed");
            err
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "Upstream returned error status");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        debug!(url, size = body.len(), "Upstream response received");

        Ok(body)
    }
}

#[async_trait]
impl PredictionSource for RedClient {
    async fn fetch_token(&self) -> Result<String, GatewayError> {
        let page = self
            .get_text(self.client.get(&self.token_url), &self.token_url)
            .await?;

        extract_token(&page).inspect_err(|e| {
            warn!(url = %self.token_url, error = %e, "Token extraction failed");
        })
    }

    async fn fetch_predictions(
        &self,
        token: &str,
        stop_id: &str,
    ) -> Result<UpstreamDocument, GatewayError> {
        let request = self
            .client
            .get(&self.prediction_url)
            .query(&[("t", token), ("codsimt", stop_id), ("codser", "")]);

        let body = self.get_text(request, &self.prediction_url).await?;
        let document: UpstreamDocument = serde_json::from_str(&body)?;

        debug!(
            stop_id,
            entries = document.entries().len(),
            "Upstream predictions decoded"
        );

        Ok(document)
    }
}
