//! Market consumer
//!
//! A consumer owns the order books for its assigned markets and drains one
//! unbounded multi-producer queue. It is the single writer for those books;
//! reads arrive as queue messages and are answered over reply channels.

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use types::ids::{MarketId, OrderId};
use types::numeric::Price;
use types::order::{now_nanos, Order, Side};

use crate::book::{DepthLevel, OrderBook, TopOfBook};
use crate::telemetry::TelemetrySink;

/// How long the consumer blocks on an empty queue before re-checking the
/// shutdown flag
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// A unit of work routed to a consumer
///
/// Everything that touches a book — mutation or read — is a `Command`, so
/// one serial drain loop is the book's only accessor.
pub enum Command {
    Submit(Order),
    Cancel {
        market: MarketId,
        order_id: OrderId,
        side: Side,
        price: Price,
        reply: Sender<bool>,
    },
    TopOfBook {
        market: MarketId,
        reply: Sender<Option<TopOfBook>>,
    },
    Snapshot {
        market: MarketId,
        depth: usize,
        reply: Sender<Option<Vec<DepthLevel>>>,
    },
}

pub struct MarketConsumer {
    books: HashMap<MarketId, OrderBook>,
    rx: Receiver<Command>,
    should_exit: Arc<AtomicBool>,
    telemetry: Arc<dyn TelemetrySink>,
}

impl MarketConsumer {
    pub fn new(
        rx: Receiver<Command>,
        should_exit: Arc<AtomicBool>,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        Self {
            books: HashMap::new(),
            rx,
            should_exit,
            telemetry,
        }
    }

    /// Install an empty book for a market this consumer will own
    pub fn register_market(&mut self, market: MarketId) {
        self.books.insert(market.clone(), OrderBook::new(market));
    }

    /// Drain the queue until shutdown is requested *and* the queue is empty
    ///
    /// Producers may still push while the flag is being set; the drain
    /// condition guarantees no accepted command is dropped.
    pub fn run(mut self) {
        tracing::info!(markets = self.books.len(), "consumer started");
        loop {
            match self.rx.recv_timeout(POLL_INTERVAL) {
                Ok(command) => self.handle(command),
                Err(RecvTimeoutError::Timeout) => {
                    if self.should_exit.load(Ordering::Acquire) && self.rx.is_empty() {
                        break;
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        tracing::info!(markets = self.books.len(), "consumer drained and stopped");
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Submit(order) => {
                let market = order.market.clone();
                let Some(book) = self.books.get_mut(&market) else {
                    tracing::warn!(market = %market, "order for unregistered market dropped");
                    return;
                };
                let start = Instant::now();
                match book.submit(order, now_nanos()) {
                    Ok(outcome) => {
                        let latency_ns = start.elapsed().as_nanos() as u64;
                        for trade in outcome.trades() {
                            self.telemetry.record_trade(trade);
                        }
                        self.telemetry
                            .record_match(&market, latency_ns, self.rx.len());
                    }
                    Err(err) => {
                        tracing::warn!(market = %market, %err, "order rejected by book");
                    }
                }
            }
            Command::Cancel {
                market,
                order_id,
                side,
                price,
                reply,
            } => {
                let cancelled = self
                    .books
                    .get_mut(&market)
                    .map(|book| book.cancel(order_id, side, price))
                    .unwrap_or(false);
                let _ = reply.send(cancelled);
            }
            Command::TopOfBook { market, reply } => {
                let top = self.books.get(&market).map(|book| book.top_of_book());
                let _ = reply.send(top);
            }
            Command::Snapshot {
                market,
                depth,
                reply,
            } => {
                let snapshot = self.books.get(&market).map(|book| book.snapshot(depth));
                let _ = reply.send(snapshot);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::NoopTelemetry;
    use crossbeam_channel::{bounded, unbounded};
    use std::thread;
    use types::numeric::Quantity;

    fn order(id: u64, side: Side, price: u64, qty: u64) -> Order {
        Order::new(
            OrderId::new(id),
            MarketId::new("BTC_USD"),
            side,
            Price::from_u64(price),
            Quantity::from_u64(qty),
            id as i64,
        )
    }

    fn spawn_consumer() -> (Sender<Command>, Arc<AtomicBool>, thread::JoinHandle<()>) {
        let (tx, rx) = unbounded();
        let should_exit = Arc::new(AtomicBool::new(false));
        let mut consumer =
            MarketConsumer::new(rx, Arc::clone(&should_exit), Arc::new(NoopTelemetry));
        consumer.register_market(MarketId::new("BTC_USD"));
        let handle = thread::spawn(move || consumer.run());
        (tx, should_exit, handle)
    }

    #[test]
    fn test_submit_then_query() {
        let (tx, should_exit, handle) = spawn_consumer();

        tx.send(Command::Submit(order(1, Side::Buy, 100, 5))).unwrap();

        let (reply_tx, reply_rx) = bounded(1);
        tx.send(Command::TopOfBook {
            market: MarketId::new("BTC_USD"),
            reply: reply_tx,
        })
        .unwrap();

        let top = reply_rx
            .recv_timeout(Duration::from_secs(5))
            .unwrap()
            .unwrap();
        assert_eq!(top.best_buy, Some(Price::from_u64(100)));

        should_exit.store(true, Ordering::Release);
        handle.join().unwrap();
    }

    #[test]
    fn test_cancel_round_trip() {
        let (tx, should_exit, handle) = spawn_consumer();

        tx.send(Command::Submit(order(1, Side::Sell, 101, 2))).unwrap();

        let (reply_tx, reply_rx) = bounded(1);
        tx.send(Command::Cancel {
            market: MarketId::new("BTC_USD"),
            order_id: OrderId::new(1),
            side: Side::Sell,
            price: Price::from_u64(101),
            reply: reply_tx,
        })
        .unwrap();
        assert!(reply_rx.recv_timeout(Duration::from_secs(5)).unwrap());

        // A second cancel of the same order finds nothing
        let (reply_tx, reply_rx) = bounded(1);
        tx.send(Command::Cancel {
            market: MarketId::new("BTC_USD"),
            order_id: OrderId::new(1),
            side: Side::Sell,
            price: Price::from_u64(101),
            reply: reply_tx,
        })
        .unwrap();
        assert!(!reply_rx.recv_timeout(Duration::from_secs(5)).unwrap());

        should_exit.store(true, Ordering::Release);
        handle.join().unwrap();
    }

    #[test]
    fn test_query_unknown_market_replies_none() {
        let (tx, should_exit, handle) = spawn_consumer();

        let (reply_tx, reply_rx) = bounded(1);
        tx.send(Command::TopOfBook {
            market: MarketId::new("ETH_USD"),
            reply: reply_tx,
        })
        .unwrap();
        assert!(reply_rx.recv_timeout(Duration::from_secs(5)).unwrap().is_none());

        should_exit.store(true, Ordering::Release);
        handle.join().unwrap();
    }

    #[test]
    fn test_shutdown_drains_pending_commands() {
        let (tx, rx) = unbounded();
        let should_exit = Arc::new(AtomicBool::new(false));
        let mut consumer =
            MarketConsumer::new(rx, Arc::clone(&should_exit), Arc::new(NoopTelemetry));
        consumer.register_market(MarketId::new("BTC_USD"));

        // Queue work and request shutdown before the consumer even starts
        for id in 1..=100u64 {
            tx.send(Command::Submit(order(id, Side::Buy, 90 + id % 10, 1)))
                .unwrap();
        }
        should_exit.store(true, Ordering::Release);

        let (reply_tx, reply_rx) = bounded(1);
        tx.send(Command::Snapshot {
            market: MarketId::new("BTC_USD"),
            depth: 100,
            reply: reply_tx,
        })
        .unwrap();

        let handle = thread::spawn(move || consumer.run());
        let snapshot = reply_rx
            .recv_timeout(Duration::from_secs(5))
            .unwrap()
            .unwrap();
        let total: rust_decimal::Decimal =
            snapshot.iter().map(|level| level.cumulative_quantity).sum();
        assert_eq!(total, rust_decimal::Decimal::from(100));

        handle.join().unwrap();
    }
}
