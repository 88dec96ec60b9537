//! Trade construction and per-book accounting
//!
//! Assigns the per-book trade sequence and keeps the turnover and fee
//! accumulators. Accounting is strictly per book — the totals are read
//! through the owning book, never through process-wide state.

use rust_decimal::Decimal;
use types::ids::{MarketId, OrderId};
use types::numeric::{Price, Quantity};
use types::order::Side;
use types::trade::Trade;

/// Flat taker fee rate, 0.2%
fn taker_fee_rate() -> Decimal {
    Decimal::new(2, 3)
}

#[derive(Debug, Default)]
pub struct MatchExecutor {
    sequence: u64,
    turnover: Decimal,
    fee_income: Decimal,
}

impl MatchExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one execution step and build its trade
    ///
    /// # Panics
    /// Panics if `quantity` is non-positive; the matching loop only calls
    /// this with the positive minimum of two positive leftovers.
    #[allow(clippy::too_many_arguments)]
    pub fn record(
        &mut self,
        market: MarketId,
        maker_order_id: OrderId,
        taker_order_id: OrderId,
        taker_side: Side,
        price: Price,
        quantity: Decimal,
        executed_at: i64,
    ) -> Trade {
        let quantity = Quantity::new(quantity);
        let fee = price.as_decimal() * quantity.as_decimal() * taker_fee_rate();

        self.sequence += 1;
        self.turnover += quantity.as_decimal();
        self.fee_income += fee;

        Trade::new(
            self.sequence,
            market,
            maker_order_id,
            taker_order_id,
            taker_side,
            price,
            quantity,
            fee,
            executed_at,
        )
    }

    /// Total quantity traded through this book
    pub fn turnover(&self) -> Decimal {
        self.turnover
    }

    /// Total fees accrued by this book
    pub fn fee_income(&self) -> Decimal {
        self.fee_income
    }

    /// Sequence of the most recent trade
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}
