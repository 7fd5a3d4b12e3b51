//! Upstream gateway
//!
//! Every prediction needs two sequential upstream calls: the token page,
//! then the predictor itself with that token. [`PredictionSource`] is the
//! seam the HTTP layer depends on; [`RedClient`] is the production
//! implementation and tests substitute their own.

mod client;
mod error;
mod token;

pub use client::RedClient;
pub use error::GatewayError;
pub use token::extract_token;

use async_trait::async_trait;

use crate::predictions::{SerializedResponse, UpstreamDocument, serialize};

#[async_trait]
pub trait PredictionSource: Send + Sync {
    /// Obtain a fresh upstream token
    async fn fetch_token(&self) -> Result<String, GatewayError>;

    /// Fetch the raw prediction document for one stop
    async fn fetch_predictions(
        &self,
        token: &str,
        stop_id: &str,
    ) -> Result<UpstreamDocument, GatewayError>;

    /// Token, then predictions, then normalization
    async fn next_arrivals(&self, stop_id: &str) -> Result<SerializedResponse, GatewayError> {
        let token = self.fetch_token().await?;
        let document = self.fetch_predictions(&token, stop_id).await?;
        Ok(serialize(&document))
    }
}
