use btcmarkets::core::kernel::RestClient;
use btcmarkets::{
    build_connector, BtcMarketsRest, Credentials, ExchangeError, NewOrder, OrderQuery,
};
use std::env;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn report(operation: &str, result: Result<String, ExchangeError>) {
    match result {
        Ok(body) => println!("{}: {}", operation, body),
        Err(e) => error!(operation = %operation, error = %e, "Request failed"),
    }
}

async fn run_queries<R: RestClient>(client: &BtcMarketsRest<R>) {
    let query = OrderQuery::new("AUD", "BTC", 10, 1);

    report("order history", client.order_history(&query).await);
    report("order history (defaults)", client.order_history_default().await);
    report("open orders", client.order_open(&query).await);
    report("open orders (defaults)", client.order_open_default().await);
    report("trade history", client.order_trade_history(&query).await);
    report(
        "trade history (defaults)",
        client.order_trade_history_default().await,
    );
    report("account balance", client.account_balance().await);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let key_file = env::args().nth(1).unwrap_or_else(|| "keys.conf".to_string());
    let credentials = Credentials::from_key_file(&key_file);
    if !credentials.has_credentials() {
        warn!(key_file = %key_file, "API_KEY or PRIVATE_KEY missing, requests will be rejected");
    }

    let client = build_connector(credentials)?;
    run_queries(&client).await;

    // Order placement moves real funds, so it needs an explicit opt-in
    if env::var("BTCMARKETS_PLACE_ORDER").is_ok_and(|v| v == "true") {
        let order = NewOrder::new("AUD", "BTC", 13_000_000_000, 10_000_000, "Buy", "Limit", "1");
        report("create order", client.create_new_order(&order).await);
    } else {
        info!("Skipping order creation (set BTCMARKETS_PLACE_ORDER=true to enable)");
    }

    Ok(())
}
