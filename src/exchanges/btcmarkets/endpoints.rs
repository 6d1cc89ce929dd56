use std::fmt;

pub use crate::core::kernel::DEFAULT_BASE_URL as BASE_URL;

/// Authenticated endpoints of the exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    AccountBalance,
    OrderHistory,
    OrderOpen,
    OrderTradeHistory,
    OrderCreate,
}

impl Endpoint {
    pub const ALL: [Self; 5] = [
        Self::AccountBalance,
        Self::OrderHistory,
        Self::OrderOpen,
        Self::OrderTradeHistory,
        Self::OrderCreate,
    ];

    pub const fn path(self) -> &'static str {
        match self {
            Self::AccountBalance => "/account/balance",
            Self::OrderHistory => "/order/history",
            Self::OrderOpen => "/order/open",
            Self::OrderTradeHistory => "/order/trade/history",
            Self::OrderCreate => "/order/create",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
