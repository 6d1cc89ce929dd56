use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::exchanges::btcmarkets::endpoints::Endpoint;
use crate::exchanges::btcmarkets::types::{NewOrder, OrderQuery};
use serde::Serialize;
use tracing::instrument;

/// BTC Markets REST API client
///
/// Each call picks an endpoint, encodes the JSON body and hands both to the
/// underlying `RestClient`. Responses are returned as the raw JSON text.
#[derive(Debug, Clone)]
pub struct BtcMarketsRest<R: RestClient> {
    rest_client: R,
}

impl<R: RestClient> BtcMarketsRest<R> {
    pub fn new(rest_client: R) -> Self {
        Self { rest_client }
    }

    /// Access the underlying REST client
    pub fn rest_client(&self) -> &R {
        &self.rest_client
    }

    async fn post<T: Serialize + Sync>(
        &self,
        endpoint: Endpoint,
        body: &T,
    ) -> Result<String, ExchangeError> {
        let body = serde_json::to_string(body)?;
        self.rest_client.execute(endpoint.path(), Some(&body)).await
    }

    /// Get account balances
    #[instrument(skip(self))]
    pub async fn account_balance(&self) -> Result<String, ExchangeError> {
        self.rest_client
            .execute(Endpoint::AccountBalance.path(), None)
            .await
    }

    /// Get order history
    #[instrument(skip(self))]
    pub async fn order_history(&self, query: &OrderQuery) -> Result<String, ExchangeError> {
        self.post(Endpoint::OrderHistory, query).await
    }

    /// Get order history for AUD/BTC, 10 orders, since id 1
    pub async fn order_history_default(&self) -> Result<String, ExchangeError> {
        self.order_history(&OrderQuery::default()).await
    }

    /// Get open orders
    #[instrument(skip(self))]
    pub async fn order_open(&self, query: &OrderQuery) -> Result<String, ExchangeError> {
        self.post(Endpoint::OrderOpen, query).await
    }

    /// Get open orders for AUD/BTC, 10 orders, since id 1
    pub async fn order_open_default(&self) -> Result<String, ExchangeError> {
        self.order_open(&OrderQuery::default()).await
    }

    /// Get trade history
    #[instrument(skip(self))]
    pub async fn order_trade_history(&self, query: &OrderQuery) -> Result<String, ExchangeError> {
        self.post(Endpoint::OrderTradeHistory, query).await
    }

    /// Get trade history for AUD/BTC, 10 trades, since id 1
    pub async fn order_trade_history_default(&self) -> Result<String, ExchangeError> {
        self.order_trade_history(&OrderQuery::default()).await
    }

    /// Place a new order.
    ///
    /// Never retried: a failure may still have created the order on the exchange,
    /// so the caller must reconcile using `client_request_id`.
    #[instrument(skip(self), fields(client_request_id = %order.client_request_id))]
    pub async fn create_new_order(&self, order: &NewOrder) -> Result<String, ExchangeError> {
        self.post(Endpoint::OrderCreate, order).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    type Recorded = Arc<Mutex<Vec<(String, Option<String>)>>>;

    #[derive(Clone, Default)]
    struct RecordingRest {
        calls: Recorded,
    }

    #[async_trait]
    impl RestClient for RecordingRest {
        async fn execute_with_query(
            &self,
            endpoint: &str,
            _query_string: Option<&str>,
            body: Option<&str>,
        ) -> Result<String, ExchangeError> {
            self.calls
                .lock()
                .unwrap()
                .push((endpoint.to_string(), body.map(str::to_string)));
            Ok(r#"{"success":true}"#.to_string())
        }
    }

    fn client() -> (BtcMarketsRest<RecordingRest>, Recorded) {
        let rest = RecordingRest::default();
        let calls = rest.calls.clone();
        (BtcMarketsRest::new(rest), calls)
    }

    #[tokio::test]
    async fn test_account_balance_is_get() {
        let (client, calls) = client();
        let body = client.account_balance().await.unwrap();
        assert_eq!(body, r#"{"success":true}"#);
        assert_eq!(
            calls.lock().unwrap().as_slice(),
            &[("/account/balance".to_string(), None)]
        );
    }

    #[tokio::test]
    async fn test_query_endpoints_route_to_paths() {
        let (client, calls) = client();
        let query = OrderQuery::new("AUD", "ETH", 5, 100);
        client.order_history(&query).await.unwrap();
        client.order_open(&query).await.unwrap();
        client.order_trade_history(&query).await.unwrap();

        let expected_body = r#"{"currency":"AUD","instrument":"ETH","limit":5,"since":100}"#;
        let calls = calls.lock().unwrap();
        let paths: Vec<_> = calls.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(
            paths,
            ["/order/history", "/order/open", "/order/trade/history"]
        );
        assert!(calls
            .iter()
            .all(|(_, body)| body.as_deref() == Some(expected_body)));
    }

    #[tokio::test]
    async fn test_default_calls_match_explicit_defaults() {
        let (client, calls) = client();
        let explicit = OrderQuery::new("AUD", "BTC", 10, 1);

        client.order_history_default().await.unwrap();
        client.order_history(&explicit).await.unwrap();
        client.order_open_default().await.unwrap();
        client.order_open(&explicit).await.unwrap();
        client.order_trade_history_default().await.unwrap();
        client.order_trade_history(&explicit).await.unwrap();

        let calls = calls.lock().unwrap();
        for pair in calls.chunks(2) {
            assert_eq!(pair[0], pair[1]);
        }
    }

    #[tokio::test]
    async fn test_create_new_order_body() {
        let (client, calls) = client();
        let order = NewOrder::new("AUD", "BTC", 13_000_000_000, 10_000_000, "Buy", "Limit", "1");
        client.create_new_order(&order).await.unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(calls[0].0, "/order/create");
        assert_eq!(
            calls[0].1.as_deref(),
            Some(r#"{"currency":"AUD","instrument":"BTC","price":13000000000,"volume":10000000,"orderSide":"Buy","ordertype":"Limit","clientRequestId":"1"}"#)
        );
    }
}
