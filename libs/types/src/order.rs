//! Order lifecycle types
//!
//! An order carries an immutable identity (id, market, side, price, quantity,
//! creation time) and mutable execution state (executed amount, lifecycle
//! state). Execution state only ever moves forward: executed grows
//! monotonically and `Fulfilled` coincides exactly with zero leftover.

use crate::ids::{MarketId, OrderId};
use crate::numeric::{Price, Quantity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

impl FromStr for Side {
    type Err = crate::errors::OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("BUY") {
            Ok(Side::Buy)
        } else if s.eq_ignore_ascii_case("SELL") {
            Ok(Side::Sell)
        } else {
            Err(crate::errors::OrderError::UnknownSide(s.to_string()))
        }
    }
}

/// Time-in-force policy; only good-till-cancel is supported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeInForce {
    Gtc,
}

/// Order lifecycle state
///
/// `Inactive` → `Active` → (`Fulfilled` | `Cancelled`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderState {
    /// Constructed but not yet submitted to a book
    Inactive,
    /// Submitted; matching or resting
    Active,
    /// Removed by a cancel request (terminal)
    Cancelled,
    /// Completely executed (terminal)
    Fulfilled,
}

/// Current Unix time in nanoseconds
///
/// Stamped onto orders at construction in the ingress thread, so time
/// priority reflects true submission order.
pub fn now_nanos() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as i64)
        .unwrap_or(0)
}

/// A single limit order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub market: MarketId,
    pub side: Side,
    pub price: Price,
    pub quantity: Quantity,
    pub tif: TimeInForce,
    /// Unix nanos, assigned at construction
    pub created_at: i64,
    executed: Decimal,
    state: OrderState,
}

impl Order {
    /// Create a new inactive order
    pub fn new(
        order_id: OrderId,
        market: MarketId,
        side: Side,
        price: Price,
        quantity: Quantity,
        created_at: i64,
    ) -> Self {
        Self {
            order_id,
            market,
            side,
            price,
            quantity,
            tif: TimeInForce::Gtc,
            created_at,
            executed: Decimal::ZERO,
            state: OrderState::Inactive,
        }
    }

    pub fn is_buy(&self) -> bool {
        self.side == Side::Buy
    }

    /// Cumulative executed amount
    pub fn executed(&self) -> Decimal {
        self.executed
    }

    /// Unfilled amount, `quantity − executed`
    pub fn leftover(&self) -> Decimal {
        self.quantity.as_decimal() - self.executed
    }

    pub fn state(&self) -> OrderState {
        self.state
    }

    pub fn is_fulfilled(&self) -> bool {
        self.state == OrderState::Fulfilled
    }

    /// Mark the order as submitted to a book
    pub fn activate(&mut self) {
        self.state = OrderState::Active;
    }

    /// Mark the order as cancelled (terminal)
    pub fn mark_cancelled(&mut self) {
        self.state = OrderState::Cancelled;
    }

    /// Execute `amount` against this order
    ///
    /// Transitions to `Fulfilled` when the leftover reaches zero, keeping the
    /// `Fulfilled ⇔ leftover == 0` invariant local to this method.
    ///
    /// # Panics
    /// Panics if `amount` is non-positive or exceeds the leftover.
    pub fn execute(&mut self, amount: Decimal) {
        assert!(amount > Decimal::ZERO, "execution amount must be positive");
        assert!(
            amount <= self.leftover(),
            "execution amount exceeds leftover"
        );
        self.executed += amount;
        if self.leftover() == Decimal::ZERO {
            self.state = OrderState::Fulfilled;
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}@{} executed={} leftover={}",
            self.order_id,
            self.market,
            self.side,
            self.quantity,
            self.price,
            self.executed,
            self.leftover()
        )
    }
}
