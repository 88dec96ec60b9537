//! Trade execution types
//!
//! A trade is one execution step between the incoming (taker) order and a
//! resting (maker) order. The execution price is always the maker's price.

use crate::ids::{MarketId, OrderId, TradeId};
use crate::numeric::{Price, Quantity};
use crate::order::Side;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub trade_id: TradeId,
    /// Per-book monotonic sequence
    pub sequence: u64,
    pub market: MarketId,

    /// Resting order
    pub maker_order_id: OrderId,
    /// Aggressing order
    pub taker_order_id: OrderId,

    /// Taker's side
    pub side: Side,
    /// Maker's price
    pub price: Price,
    pub quantity: Quantity,

    /// Taker fee charged on this execution
    pub fee: Decimal,

    /// Unix nanos
    pub executed_at: i64,
}

impl Trade {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sequence: u64,
        market: MarketId,
        maker_order_id: OrderId,
        taker_order_id: OrderId,
        side: Side,
        price: Price,
        quantity: Quantity,
        fee: Decimal,
        executed_at: i64,
    ) -> Self {
        Self {
            trade_id: TradeId::new(),
            sequence,
            market,
            maker_order_id,
            taker_order_id,
            side,
            price,
            quantity,
            fee,
            executed_at,
        }
    }

    /// Notional value, `price × quantity`
    pub fn value(&self) -> Decimal {
        self.price.as_decimal() * self.quantity.as_decimal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trade_value() {
        let trade = Trade::new(
            1,
            MarketId::new("BTC_USD"),
            OrderId::new(1),
            OrderId::new(2),
            Side::Buy,
            Price::from_u64(100),
            Quantity::from_str("2.5").unwrap(),
            Decimal::ZERO,
            1,
        );
        assert_eq!(trade.value(), Decimal::from(250));
    }

    #[test]
    fn test_trade_serialization() {
        let trade = Trade::new(
            9,
            MarketId::new("USD_JPY"),
            OrderId::new(3),
            OrderId::new(4),
            Side::Sell,
            Price::from_str("155.42").unwrap(),
            Quantity::from_u64(10),
            Decimal::ZERO,
            42,
        );
        let json = serde_json::to_string(&trade).unwrap();
        let deserialized: Trade = serde_json::from_str(&json).unwrap();
        assert_eq!(trade, deserialized);
    }
}
