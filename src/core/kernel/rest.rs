use crate::core::errors::ExchangeError;
use crate::core::kernel::signer::{SignedRequest, Signer};
use async_trait::async_trait;
use hyper::ext::ReasonPhrase;
use reqwest::{Client, Method, Response, StatusCode};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{instrument, trace, warn};

/// Production REST endpoint of the exchange
pub const DEFAULT_BASE_URL: &str = "https://api.btcmarkets.net";

/// REST client trait for signed requests
///
/// A request with no body is sent as GET; a request with a body is sent as POST
/// with the body transmitted exactly as it was signed.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Execute a signed request and return the response body as text
    ///
    /// # Arguments
    /// * `endpoint` - The API endpoint path
    /// * `body` - JSON request body, `None` for GET
    async fn execute(&self, endpoint: &str, body: Option<&str>) -> Result<String, ExchangeError> {
        self.execute_with_query(endpoint, None, body).await
    }

    /// Execute a signed request carrying a pre-sorted query string
    ///
    /// # Arguments
    /// * `endpoint` - The API endpoint path
    /// * `query_string` - `key=value&key=value`, already sorted by key
    /// * `body` - JSON request body, `None` for GET
    async fn execute_with_query(
        &self,
        endpoint: &str,
        query_string: Option<&str>,
        body: Option<&str>,
    ) -> Result<String, ExchangeError>;
}

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Exchange name for logging and tracing
    pub exchange_name: String,
    /// Total request timeout in seconds
    pub timeout_seconds: u64,
    /// Connect timeout in seconds
    pub connect_timeout_seconds: u64,
    /// User agent string to include in requests
    pub user_agent: String,
}

impl Default for RestClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL.to_string(), "btcmarkets".to_string())
    }
}

impl RestClientConfig {
    /// Create a new configuration
    ///
    /// # Arguments
    /// * `base_url` - Base URL for the API
    /// * `exchange_name` - Name of the exchange
    pub fn new(base_url: String, exchange_name: String) -> Self {
        Self {
            base_url,
            exchange_name,
            timeout_seconds: 30,
            connect_timeout_seconds: 10,
            user_agent: concat!("btcmarkets-rs/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set the connect timeout
    pub fn with_connect_timeout(mut self, connect_timeout_seconds: u64) -> Self {
        self.connect_timeout_seconds = connect_timeout_seconds;
        self
    }

    /// Set the user agent string
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// Builder for creating REST client instances
pub struct RestClientBuilder {
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
}

impl RestClientBuilder {
    /// Create a new builder with the given configuration
    pub fn new(config: RestClientConfig) -> Self {
        Self {
            config,
            signer: None,
        }
    }

    /// Set the signer for authenticated requests
    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Build the REST client
    pub fn build(self) -> Result<ReqwestRest, ExchangeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .connect_timeout(Duration::from_secs(self.config.connect_timeout_seconds))
            .user_agent(&self.config.user_agent)
            .build()
            .map_err(|e| ExchangeError::ClientBuildError(e.to_string()))?;

        Ok(ReqwestRest {
            client,
            config: self.config,
            signer: self.signer,
        })
    }
}

/// Implementation of `RestClient` using reqwest
#[derive(Clone)]
pub struct ReqwestRest {
    client: Client,
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
}

impl std::fmt::Debug for ReqwestRest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestRest")
            .field("config", &self.config)
            .field("has_signer", &self.signer.is_some())
            .finish_non_exhaustive()
    }
}

impl ReqwestRest {
    /// Configuration this client was built with
    pub fn config(&self) -> &RestClientConfig {
        &self.config
    }

    /// Get the current timestamp in milliseconds
    fn get_timestamp() -> Result<u64, ExchangeError> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .map_err(|e| ExchangeError::SigningError(format!("Failed to get timestamp: {}", e)))
    }

    /// Build the full URL for an endpoint
    fn build_url(&self, endpoint: &str, query_string: Option<&str>) -> String {
        match query_string {
            Some(query) => format!("{}{}?{}", self.config.base_url, endpoint, query),
            None => format!("{}{}", self.config.base_url, endpoint),
        }
    }

    /// An empty query string is no query string: it is neither signed nor sent
    fn normalize_query(query_string: Option<&str>) -> Option<&str> {
        query_string.filter(|query| !query.is_empty())
    }

    /// Reason phrase as sent by the server, falling back to the canonical one
    fn reason_phrase(response: &Response) -> String {
        response
            .extensions()
            .get::<ReasonPhrase>()
            .and_then(|phrase| std::str::from_utf8(phrase.as_bytes()).ok())
            .or_else(|| response.status().canonical_reason())
            .unwrap_or_default()
            .to_string()
    }

    /// Sign the request, failing before anything is sent if credentials are
    /// missing or the key is unusable
    fn sign(
        &self,
        endpoint: &str,
        query_string: Option<&str>,
        body: Option<&str>,
    ) -> Result<SignedRequest, ExchangeError> {
        let signer = self.signer.as_ref().ok_or_else(|| {
            ExchangeError::AuthError("Authentication required but no signer provided".to_string())
        })?;

        if !signer.has_credentials() {
            return Err(ExchangeError::AuthError(
                "API key and private key must both be set".to_string(),
            ));
        }

        let timestamp = Self::get_timestamp()?;
        signer.sign_request(endpoint, query_string, body, timestamp)
    }

    /// Consume the response: exactly `200 OK` yields the body text
    #[instrument(
        skip(self, response),
        fields(exchange = %self.config.exchange_name, status = %response.status())
    )]
    async fn handle_response(&self, response: Response) -> Result<String, ExchangeError> {
        let status = response.status();

        if status != StatusCode::OK {
            let reason = Self::reason_phrase(&response);
            warn!(status = status.as_u16(), reason = %reason, "Request rejected");
            return Err(ExchangeError::HttpStatusError {
                status: status.as_u16(),
                reason,
            });
        }

        let response_text = response.text().await?;
        trace!("Response body: {}", response_text);
        Ok(response_text)
    }
}

#[async_trait]
impl RestClient for ReqwestRest {
    #[instrument(
        skip(self, body),
        fields(exchange = %self.config.exchange_name, endpoint = %endpoint)
    )]
    async fn execute_with_query(
        &self,
        endpoint: &str,
        query_string: Option<&str>,
        body: Option<&str>,
    ) -> Result<String, ExchangeError> {
        let query_string = Self::normalize_query(query_string);
        let signed = self.sign(endpoint, query_string, body)?;
        let url = self.build_url(endpoint, query_string);

        let method = if signed.body.is_some() {
            Method::POST
        } else {
            Method::GET
        };
        trace!(method = %method, url = %url, "Sending request");

        let mut request = self
            .client
            .request(method, &url)
            .header("Accept", "*/*")
            .header("Accept-Charset", "UTF-8")
            .header("Content-Type", "application/json");

        for (key, value) in &signed.headers {
            request = request.header(key.as_str(), value.as_str());
        }

        if let Some(body) = signed.body {
            request = request.body(body.into_bytes());
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Credentials;
    use crate::core::kernel::signer::HmacSigner;

    fn test_rest(credentials: Credentials) -> ReqwestRest {
        RestClientBuilder::new(RestClientConfig::default())
            .with_signer(Arc::new(HmacSigner::new(credentials)))
            .build()
            .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = RestClientConfig::default();
        assert_eq!(config.base_url, "https://api.btcmarkets.net");
        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.connect_timeout_seconds, 10);
    }

    #[test]
    fn test_build_url() {
        let rest = test_rest(Credentials::default());
        assert_eq!(
            rest.build_url("/account/balance", None),
            "https://api.btcmarkets.net/account/balance"
        );
        assert_eq!(
            rest.build_url("/market/ticks", Some("a=1&b=2")),
            "https://api.btcmarkets.net/market/ticks?a=1&b=2"
        );
    }

    #[test]
    fn test_empty_query_is_dropped() {
        assert_eq!(ReqwestRest::normalize_query(Some("")), None);
        assert_eq!(ReqwestRest::normalize_query(None), None);
        assert_eq!(ReqwestRest::normalize_query(Some("a=1")), Some("a=1"));
    }

    #[tokio::test]
    async fn test_missing_credentials_fail_before_sending() {
        let rest = test_rest(Credentials::new("key".to_string(), String::new()));
        let result = rest.execute("/account/balance", None).await;
        assert!(matches!(result, Err(ExchangeError::AuthError(_))));
    }

    #[tokio::test]
    async fn test_missing_signer_fails() {
        let rest = RestClientBuilder::new(RestClientConfig::default())
            .build()
            .unwrap();
        let result = rest.execute("/account/balance", None).await;
        assert!(matches!(result, Err(ExchangeError::AuthError(_))));
    }

    #[tokio::test]
    async fn test_bad_private_key_aborts_request() {
        // Unroutable base URL: reaching the transport would surface an ExecutionError
        let config =
            RestClientConfig::new("http://127.0.0.1:1".to_string(), "btcmarkets".to_string());
        let rest = RestClientBuilder::new(config)
            .with_signer(Arc::new(HmacSigner::new(Credentials::new(
                "key".to_string(),
                "%%% not base64 %%%".to_string(),
            ))))
            .build()
            .unwrap();
        let result = rest.execute("/order/history", Some("{}")).await;
        assert!(matches!(result, Err(ExchangeError::SigningError(_))));
    }
}
