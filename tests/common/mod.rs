//! Shared fixtures for the integration tests

use btcmarkets::{BtcMarketsBuilder, BtcMarketsRest, Credentials};
use btcmarkets::core::kernel::ReqwestRest;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test_api_key";
// base64("btcmarkets-test-secret")
pub const TEST_PRIVATE_KEY: &str = "YnRjbWFya2V0cy10ZXN0LXNlY3JldA==";

pub fn test_credentials() -> Credentials {
    Credentials::new(TEST_API_KEY.to_string(), TEST_PRIVATE_KEY.to_string())
}

pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server
pub fn client_for(server: &MockServer, credentials: Credentials) -> BtcMarketsRest<ReqwestRest> {
    BtcMarketsBuilder::new()
        .with_credentials(credentials)
        .with_base_url(server.uri())
        .with_timeout(5)
        .with_connect_timeout(2)
        .build()
        .expect("client should build")
}
