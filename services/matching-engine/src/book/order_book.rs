//! Per-market order book
//!
//! Two price-indexed sides plus the matching algorithm. The book has exactly
//! one mutator — the market consumer that owns it — so none of these
//! operations take a lock.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::errors::OrderError;
use types::ids::{MarketId, OrderId};
use types::numeric::Price;
use types::order::{Order, Side};
use types::trade::Trade;

use crate::matching::{crossing, MatchExecutor};

use super::ask_book::AskBook;
use super::bid_book::BidBook;

/// Result of submitting an order
#[derive(Debug)]
pub enum MatchOutcome {
    /// Leftover reached zero entirely through crossing trades
    Filled { trades: Vec<Trade> },
    /// Residual was placed in the book
    Resting { trades: Vec<Trade> },
}

impl MatchOutcome {
    pub fn is_filled(&self) -> bool {
        matches!(self, MatchOutcome::Filled { .. })
    }

    pub fn trades(&self) -> &[Trade] {
        match self {
            MatchOutcome::Filled { trades } | MatchOutcome::Resting { trades } => trades,
        }
    }

    pub fn into_trades(self) -> Vec<Trade> {
        match self {
            MatchOutcome::Filled { trades } | MatchOutcome::Resting { trades } => trades,
        }
    }
}

/// One aggregated price level in a depth snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthLevel {
    pub side: Side,
    pub price: Price,
    pub cumulative_quantity: Decimal,
    pub order_count: usize,
}

/// Best prices and derived quotes at a point in time
///
/// `None` means the side is empty; there is no fallback to the opposite
/// side's price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopOfBook {
    pub best_buy: Option<Price>,
    pub best_sell: Option<Price>,
    pub quote: Option<Price>,
    pub spread: Decimal,
}

/// Order book for a single market
#[derive(Debug)]
pub struct OrderBook {
    market: MarketId,
    bids: BidBook,
    asks: AskBook,
    executor: MatchExecutor,
}

impl OrderBook {
    pub fn new(market: MarketId) -> Self {
        Self {
            market,
            bids: BidBook::new(),
            asks: AskBook::new(),
            executor: MatchExecutor::new(),
        }
    }

    pub fn market(&self) -> &MarketId {
        &self.market
    }

    /// Submit a new order, matching it against the opposite side
    ///
    /// Crossing trades execute at the resting order's price, oldest resting
    /// order first. The residual, if any, rests on the order's own side.
    pub fn submit(&mut self, mut order: Order, timestamp: i64) -> Result<MatchOutcome, OrderError> {
        if order.leftover() <= Decimal::ZERO {
            return Err(OrderError::InvalidQuantity(order.leftover().to_string()));
        }
        order.activate();

        let mut trades = Vec::new();
        match order.side {
            Side::Buy => Self::match_against_asks(
                &self.market,
                &mut self.asks,
                &mut self.executor,
                &mut order,
                &mut trades,
                timestamp,
            ),
            Side::Sell => Self::match_against_bids(
                &self.market,
                &mut self.bids,
                &mut self.executor,
                &mut order,
                &mut trades,
                timestamp,
            ),
        }

        if order.leftover() > Decimal::ZERO {
            match order.side {
                Side::Buy => self.bids.insert(order),
                Side::Sell => self.asks.insert(order),
            }
            Ok(MatchOutcome::Resting { trades })
        } else {
            debug_assert!(order.is_fulfilled());
            Ok(MatchOutcome::Filled { trades })
        }
    }

    /// Match an incoming buy against the ask side
    fn match_against_asks(
        market: &MarketId,
        asks: &mut AskBook,
        executor: &mut MatchExecutor,
        taker: &mut Order,
        trades: &mut Vec<Trade>,
        timestamp: i64,
    ) {
        while taker.leftover() > Decimal::ZERO {
            let level_price = match asks.best_price() {
                Some(p) => p,
                None => break,
            };
            if !crossing::crosses(Side::Buy, taker.price, level_price) {
                break;
            }
            let queue = match asks.level_mut(level_price) {
                Some(q) => q,
                None => break,
            };
            while taker.leftover() > Decimal::ZERO {
                let maker = match queue.front_mut() {
                    Some(m) => m,
                    None => break,
                };
                let fill = taker.leftover().min(maker.leftover());
                taker.execute(fill);
                maker.execute(fill);
                trades.push(executor.record(
                    market.clone(),
                    maker.order_id,
                    taker.order_id,
                    Side::Buy,
                    level_price,
                    fill,
                    timestamp,
                ));
                if maker.leftover() == Decimal::ZERO {
                    queue.pop_front();
                }
            }
            if queue.is_empty() {
                asks.remove_level(level_price);
            }
        }
    }

    /// Match an incoming sell against the bid side
    fn match_against_bids(
        market: &MarketId,
        bids: &mut BidBook,
        executor: &mut MatchExecutor,
        taker: &mut Order,
        trades: &mut Vec<Trade>,
        timestamp: i64,
    ) {
        while taker.leftover() > Decimal::ZERO {
            let level_price = match bids.best_price() {
                Some(p) => p,
                None => break,
            };
            if !crossing::crosses(Side::Sell, taker.price, level_price) {
                break;
            }
            let queue = match bids.level_mut(level_price) {
                Some(q) => q,
                None => break,
            };
            while taker.leftover() > Decimal::ZERO {
                let maker = match queue.front_mut() {
                    Some(m) => m,
                    None => break,
                };
                let fill = taker.leftover().min(maker.leftover());
                taker.execute(fill);
                maker.execute(fill);
                trades.push(executor.record(
                    market.clone(),
                    maker.order_id,
                    taker.order_id,
                    Side::Sell,
                    level_price,
                    fill,
                    timestamp,
                ));
                if maker.leftover() == Decimal::ZERO {
                    queue.pop_front();
                }
            }
            if queue.is_empty() {
                bids.remove_level(level_price);
            }
        }
    }

    /// Remove a resting order
    ///
    /// Returns `true` if found and removed (the order leaves as `Cancelled`);
    /// `false` leaves the book untouched.
    pub fn cancel(&mut self, order_id: OrderId, side: Side, price: Price) -> bool {
        let removed = match side {
            Side::Buy => self.bids.remove(order_id, price),
            Side::Sell => self.asks.remove(order_id, price),
        };
        match removed {
            Some(mut order) => {
                order.mark_cancelled();
                true
            }
            None => false,
        }
    }

    /// Highest bid, or `None` when the bid side is empty
    pub fn best_buy(&self) -> Option<Price> {
        self.bids.best_price()
    }

    /// Lowest ask, or `None` when the ask side is empty
    pub fn best_sell(&self) -> Option<Price> {
        self.asks.best_price()
    }

    /// Mid-quote: the mean of the best prices when both sides are present,
    /// the present side's best when only one is
    pub fn quote(&self) -> Option<Price> {
        match (self.best_buy(), self.best_sell()) {
            (Some(buy), Some(sell)) => {
                Price::try_new((buy.as_decimal() + sell.as_decimal()) / Decimal::TWO)
            }
            (Some(buy), None) => Some(buy),
            (None, Some(sell)) => Some(sell),
            (None, None) => None,
        }
    }

    /// Relative spread, `(ask − bid) / ask`; zero unless both sides quote
    pub fn spread(&self) -> Decimal {
        match (self.best_buy(), self.best_sell()) {
            (Some(buy), Some(sell)) => {
                (sell.as_decimal() - buy.as_decimal()) / sell.as_decimal()
            }
            _ => Decimal::ZERO,
        }
    }

    pub fn top_of_book(&self) -> TopOfBook {
        TopOfBook {
            best_buy: self.best_buy(),
            best_sell: self.best_sell(),
            quote: self.quote(),
            spread: self.spread(),
        }
    }

    /// Up to `depth` top levels per side: bids descending, then asks ascending
    pub fn snapshot(&self, depth: usize) -> Vec<DepthLevel> {
        let mut levels = Vec::new();
        for (price, cumulative_quantity, order_count) in self.bids.depth(depth) {
            levels.push(DepthLevel {
                side: Side::Buy,
                price,
                cumulative_quantity,
                order_count,
            });
        }
        for (price, cumulative_quantity, order_count) in self.asks.depth(depth) {
            levels.push(DepthLevel {
                side: Side::Sell,
                price,
                cumulative_quantity,
                order_count,
            });
        }
        levels
    }

    /// Total quantity traded through this book
    pub fn turnover(&self) -> Decimal {
        self.executor.turnover()
    }

    /// Total fees accrued by this book
    pub fn fee_income(&self) -> Decimal {
        self.executor.fee_income()
    }

    pub fn bid_level_count(&self) -> usize {
        self.bids.level_count()
    }

    pub fn ask_level_count(&self) -> usize {
        self.asks.level_count()
    }
}
