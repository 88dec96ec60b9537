//! Seeded order-flow generation
//!
//! Turns a simulated price path into a stream of limit orders: random side
//! and size around each path price, scaled the same way the ingress layer
//! scales external input so prices collapse onto a bounded set of levels.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use types::ids::{MarketId, OrderId};
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

use crate::gbm::geo_brownian;

/// Price scale matching the ingress canonicalisation
const PRICE_DP: u32 = 4;

#[derive(Debug, Clone)]
pub struct FlowConfig {
    pub initial_price: f64,
    pub drift: f64,
    pub volatility: f64,
    pub min_size: Decimal,
    pub max_size: Decimal,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            initial_price: 100.0,
            drift: 0.0,
            volatility: 0.08,
            min_size: Decimal::ONE,
            max_size: Decimal::from(50),
        }
    }
}

/// Deterministic stream of limit orders for one market
pub struct OrderFlow {
    market: MarketId,
    config: FlowConfig,
    path: Vec<f64>,
    cursor: usize,
    next_id: u64,
    rng: ChaCha8Rng,
}

impl OrderFlow {
    pub fn new(market: MarketId, config: FlowConfig, orders: usize, seed: u64) -> Self {
        let path = geo_brownian(
            config.initial_price,
            config.drift,
            config.volatility,
            1.0,
            orders,
            seed,
        );
        Self {
            market,
            config,
            path,
            cursor: 0,
            next_id: 1,
            rng: ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)),
        }
    }

    /// Remaining orders in the stream
    pub fn remaining(&self) -> usize {
        self.path.len() - self.cursor
    }

    /// Next order, or None once the path is exhausted
    pub fn next_order(&mut self) -> Option<Order> {
        let raw_price = *self.path.get(self.cursor)?;
        self.cursor += 1;

        let price = Decimal::from_f64(raw_price)
            .and_then(|d| {
                Price::try_new(d.round_dp_with_strategy(
                    PRICE_DP,
                    RoundingStrategy::MidpointAwayFromZero,
                ))
            })
            .unwrap_or_else(|| Price::from_u64(1));

        let span = self.config.max_size - self.config.min_size;
        let size = self.config.min_size
            + span * Decimal::from(self.rng.gen_range(0..=100)) / Decimal::ONE_HUNDRED;
        let quantity = Quantity::new(size.round_dp(2).max(self.config.min_size));

        let side = if self.rng.gen_bool(0.5) {
            Side::Buy
        } else {
            Side::Sell
        };

        let id = self.next_id;
        self.next_id += 1;
        Some(Order::new(
            OrderId::new(id),
            self.market.clone(),
            side,
            price,
            quantity,
            id as i64,
        ))
    }
}

impl Iterator for OrderFlow {
    type Item = Order;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_order()
    }
}
