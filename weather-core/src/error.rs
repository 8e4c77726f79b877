use reqwest::StatusCode;
use thiserror::Error;

/// Failure talking to one of the weather services.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Connection, TLS or timeout failure.
    #[error("{service} request failed: {source}")]
    Request {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} request failed with status {status}: {body}")]
    Status {
        service: &'static str,
        status: StatusCode,
        body: String,
    },

    /// Response body did not have the expected shape.
    #[error("Failed to parse {service} JSON: {source}")]
    Parse {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{service} returned unusable data: {reason}")]
    InvalidData {
        service: &'static str,
        reason: String,
    },
}

impl ProviderError {
    pub fn service(&self) -> &'static str {
        match self {
            ProviderError::Request { service, .. }
            | ProviderError::Status { service, .. }
            | ProviderError::Parse { service, .. }
            | ProviderError::InvalidData { service, .. } => service,
        }
    }
}
