use crate::core::config::Credentials;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{HmacSigner, ReqwestRest, RestClientBuilder, RestClientConfig};
use crate::exchanges::btcmarkets::endpoints::BASE_URL;
use crate::exchanges::btcmarkets::rest::BtcMarketsRest;
use std::sync::Arc;

/// Builder for BTC Markets clients
///
/// Every built client owns its credentials and its own HTTP client; nothing is
/// shared between instances.
pub struct BtcMarketsBuilder {
    credentials: Credentials,
    base_url: String,
    timeout_seconds: u64,
    connect_timeout_seconds: u64,
}

impl Default for BtcMarketsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BtcMarketsBuilder {
    /// Create a new `BtcMarketsBuilder` with default settings
    pub fn new() -> Self {
        let defaults = RestClientConfig::default();
        Self {
            credentials: Credentials::default(),
            base_url: BASE_URL.to_string(),
            timeout_seconds: defaults.timeout_seconds,
            connect_timeout_seconds: defaults.connect_timeout_seconds,
        }
    }

    /// Set API credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Override the REST base URL
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Set the total request timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set the connect timeout
    pub fn with_connect_timeout(mut self, connect_timeout_seconds: u64) -> Self {
        self.connect_timeout_seconds = connect_timeout_seconds;
        self
    }

    /// Build a client that signs with HMAC-SHA512 over its own HTTP client
    pub fn build(self) -> Result<BtcMarketsRest<ReqwestRest>, ExchangeError> {
        let rest_config = RestClientConfig::new(self.base_url, "btcmarkets".to_string())
            .with_timeout(self.timeout_seconds)
            .with_connect_timeout(self.connect_timeout_seconds);

        let rest = RestClientBuilder::new(rest_config)
            .with_signer(Arc::new(HmacSigner::new(self.credentials)))
            .build()?;

        Ok(BtcMarketsRest::new(rest))
    }
}

/// Build a client against the production API
pub fn build_connector(
    credentials: Credentials,
) -> Result<BtcMarketsRest<ReqwestRest>, ExchangeError> {
    BtcMarketsBuilder::new().with_credentials(credentials).build()
}
