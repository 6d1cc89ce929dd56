use serde::Serialize;

pub const DEFAULT_CURRENCY: &str = "AUD";
pub const DEFAULT_INSTRUMENT: &str = "BTC";
pub const DEFAULT_LIMIT: u32 = 10;
pub const DEFAULT_SINCE: u64 = 1;

/// Body of the order history, open orders and trade history requests.
///
/// Serialises as `{"currency":C,"instrument":I,"limit":L,"since":S}`; the
/// field order is part of the signed payload.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct OrderQuery {
    pub currency: String,
    pub instrument: String,
    pub limit: u32,
    pub since: u64,
}

impl OrderQuery {
    pub fn new(currency: &str, instrument: &str, limit: u32, since: u64) -> Self {
        Self {
            currency: currency.to_string(),
            instrument: instrument.to_string(),
            limit,
            since,
        }
    }
}

impl Default for OrderQuery {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY, DEFAULT_INSTRUMENT, DEFAULT_LIMIT, DEFAULT_SINCE)
    }
}

/// Body of the order creation request.
///
/// `price` and `volume` are integer minor units as the exchange expects them;
/// no scaling happens here.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub currency: String,
    pub instrument: String,
    pub price: i64,
    pub volume: i64,
    pub order_side: String,
    #[serde(rename = "ordertype")]
    pub order_type: String,
    pub client_request_id: String,
}

impl NewOrder {
    pub fn new(
        currency: &str,
        instrument: &str,
        price: i64,
        volume: i64,
        order_side: &str,
        order_type: &str,
        client_request_id: &str,
    ) -> Self {
        Self {
            currency: currency.to_string(),
            instrument: instrument.to_string(),
            price,
            volume,
            order_side: order_side.to_string(),
            order_type: order_type.to_string(),
            client_request_id: client_request_id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_query_body() {
        let body = serde_json::to_string(&OrderQuery::new("AUD", "LTC", 25, 1000)).unwrap();
        assert_eq!(
            body,
            r#"{"currency":"AUD","instrument":"LTC","limit":25,"since":1000}"#
        );
    }

    #[test]
    fn test_default_order_query_matches_explicit() {
        assert_eq!(OrderQuery::default(), OrderQuery::new("AUD", "BTC", 10, 1));
        assert_eq!(
            serde_json::to_string(&OrderQuery::default()).unwrap(),
            r#"{"currency":"AUD","instrument":"BTC","limit":10,"since":1}"#
        );
    }

    #[test]
    fn test_new_order_body() {
        let order = NewOrder::new("AUD", "BTC", 13_000_000_000, 10_000_000, "Buy", "Limit", "1");
        assert_eq!(
            serde_json::to_string(&order).unwrap(),
            r#"{"currency":"AUD","instrument":"BTC","price":13000000000,"volume":10000000,"orderSide":"Buy","ordertype":"Limit","clientRequestId":"1"}"#
        );
    }

    #[test]
    fn test_string_values_are_escaped() {
        let order = NewOrder::new("AUD", "BTC", 1, 1, "Buy", "Limit", "id\"1");
        let body = serde_json::to_string(&order).unwrap();
        assert!(body.ends_with(r#""clientRequestId":"id\"1"}"#));
    }
}
