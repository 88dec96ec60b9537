use matching_engine::book::{DepthLevel, TopOfBook};
use rust_decimal::Decimal;
use serde::Serialize;

/// Best prices and derived quotes; empty sides are reported as 0
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub market: String,
    pub best_buy: Decimal,
    pub best_sell: Decimal,
    pub quote: Decimal,
    pub spread: Decimal,
}

impl QuoteResponse {
    pub fn from_top(market: String, top: TopOfBook) -> Self {
        let as_decimal = |price: Option<types::numeric::Price>| {
            price.map(|p| p.as_decimal()).unwrap_or(Decimal::ZERO)
        };
        Self {
            market,
            best_buy: as_decimal(top.best_buy),
            best_sell: as_decimal(top.best_sell),
            quote: as_decimal(top.quote),
            spread: top.spread,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SnapshotResponse {
    pub market: String,
    pub levels: Vec<DepthLevel>,
}

#[derive(Debug, Serialize)]
pub struct CancelResponse {
    pub cancelled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::numeric::Price;

    #[test]
    fn test_empty_sides_render_as_zero() {
        let top = TopOfBook {
            best_buy: None,
            best_sell: Some(Price::from_u64(100)),
            quote: Some(Price::from_u64(100)),
            spread: Decimal::ZERO,
        };
        let response = QuoteResponse::from_top("BTC_USD".into(), top);

        assert_eq!(response.best_buy, Decimal::ZERO);
        assert_eq!(response.best_sell, Decimal::from(100));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["best_buy"], "0");
    }
}
