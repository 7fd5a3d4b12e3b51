use super::models::Config;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Upstream {field} must be an http(s) URL, got '{value}'")]
    InvalidUpstreamUrl { field: String, value: String },

    #[error("Upstream timeout must be positive: {field}")]
    ZeroTimeout { field: String },

    #[error("User agent must not be empty")]
    EmptyUserAgent,

    #[error("CORS {field} must not be empty")]
    EmptyCorsField { field: String },

    #[error("CORS {field} is not a valid header value: '{value}'")]
    InvalidCorsHeaderValue { field: String, value: String },
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_upstream(config)?;
    validate_cors(config)?;
    Ok(())
}

fn validate_upstream(config: &Config) -> Result<(), ValidationError> {
    let upstream = &config.upstream;

    for (field, value) in [
        ("token_url", &upstream.token_url),
        ("prediction_url", &upstream.prediction_url),
    ] {
        if !(value.starts_with("http://") || value.starts_with("https://")) {
            return Err(ValidationError::InvalidUpstreamUrl {
                field: field.to_string(),
                value: value.clone(),
            });
        }
    }

    for (field, timeout) in [
        ("connect_timeout", upstream.connect_timeout),
        ("request_timeout", upstream.request_timeout),
    ] {
        if timeout.is_zero() {
            return Err(ValidationError::ZeroTimeout {
                field: field.to_string(),
            });
        }
    }

    if upstream.user_agent.trim().is_empty() {
        return Err(ValidationError::EmptyUserAgent);
    }

    Ok(())
}

/// CORS values are copied verbatim into response headers
fn validate_cors(config: &Config) -> Result<(), ValidationError> {
    let cors = &config.cors;

    for (field, value) in [
        ("origin", &cors.origin),
        ("methods", &cors.methods),
        ("headers", &cors.headers),
    ] {
        if value.trim().is_empty() {
            return Err(ValidationError::EmptyCorsField {
                field: field.to_string(),
            });
        }

        if !value.chars().all(|c| c == ' ' || c == '\t' || c.is_ascii_graphic()) {
            return Err(ValidationError::InvalidCorsHeaderValue {
                field: field.to_string(),
                value: value.clone(),
            });
        }
    }

    Ok(())
}
