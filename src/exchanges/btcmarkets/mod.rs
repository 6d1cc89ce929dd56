pub mod builder;
pub mod endpoints;
pub mod rest;
pub mod types;

// Re-export main components
pub use builder::{build_connector, BtcMarketsBuilder};
pub use endpoints::{Endpoint, BASE_URL};
pub use rest::BtcMarketsRest;
pub use types::{NewOrder, OrderQuery};
