//! Crossing detection
//!
//! An incoming order crosses a resting level when its limit is at least as
//! good as the level's price. Price equality is a cross on both sides.

use types::numeric::Price;
use types::order::Side;

/// Can an incoming order trade against a resting level at `resting_price`?
///
/// Buy cheap, sell expensive: a buyer crosses any level at or below its
/// limit, a seller any level at or above it.
pub fn crosses(taker_side: Side, taker_price: Price, resting_price: Price) -> bool {
    match taker_side {
        Side::Buy => taker_price >= resting_price,
        Side::Sell => taker_price <= resting_price,
    }
}
