use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("upstream request failed: {0}")]
    Request(String),

    #[error("upstream request timed out: {0}")]
    Timeout(String),

    #[error("upstream returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("upstream payload invalid: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("token not found in upstream page")]
    TokenNotFound,

    #[error("token could not be decoded: {0}")]
    TokenDecode(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        // Strip the query string, it carries the upstream token
        let err = err.without_url();
        if err.is_timeout() {
            GatewayError::Timeout(err.to_string())
        } else {
            GatewayError::Request(err.to_string())
        }
    }
}

impl GatewayError {
    /// True when the failure came from obtaining the upstream token
    pub fn is_token_error(&self) -> bool {
        matches!(
            self,
            GatewayError::TokenNotFound | GatewayError::TokenDecode(_)
        )
    }
}
