pub mod core;
pub mod exchanges;

pub use crate::core::{config::Credentials, errors::ExchangeError};
pub use exchanges::btcmarkets::{
    build_connector, BtcMarketsBuilder, BtcMarketsRest, NewOrder, OrderQuery,
};
