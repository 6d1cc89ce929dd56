use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExchangeError {
    /// The private key could not be decoded or the MAC could not be keyed.
    /// Nothing was sent to the exchange.
    #[error("Signing error: {0}")]
    SigningError(String),

    /// The exchange answered with anything other than `200 OK`.
    #[error("HTTP status error: {status} {reason}")]
    HttpStatusError { status: u16, reason: String },

    /// Transport failure: DNS, connect, timeout or body read.
    #[error("Request execution failed: {0}")]
    ExecutionError(#[from] reqwest::Error),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::core::config::ConfigError),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuildError(String),
}

impl ExchangeError {
    /// Returns true if this is an `HttpStatusError` carrying the given status code
    pub fn is_http_status(&self, code: u16) -> bool {
        matches!(self, Self::HttpStatusError { status, .. } if *status == code)
    }

    /// Returns true if the request never left the client
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::SigningError(_)
                | Self::AuthError(_)
                | Self::SerializationError(_)
                | Self::ConfigError(_)
                | Self::ClientBuildError(_)
        )
    }
}
