//! Order dispatcher
//!
//! Built once at startup from the configured market list. Markets are
//! distributed round-robin over the consumer pool and the market → consumer
//! binding never changes afterwards, so `send` is a read-only map lookup
//! plus a lock-free enqueue.

use crossbeam_channel::{bounded, unbounded, Sender};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use types::errors::EngineError;
use types::ids::{MarketId, OrderId};
use types::numeric::Price;
use types::order::{Order, Side};

use crate::book::{DepthLevel, TopOfBook};
use crate::telemetry::TelemetrySink;

use super::consumer::{Command, MarketConsumer};

/// Upper bound on waiting for a consumer to answer a routed cancel or read.
/// The reply queues behind every command already in the consumer's queue.
const REPLY_TIMEOUT: Duration = Duration::from_secs(5);

struct ConsumerHandle {
    tx: Sender<Command>,
    should_exit: Arc<AtomicBool>,
}

pub struct Dispatcher {
    registry: HashMap<MarketId, usize>,
    handles: Vec<ConsumerHandle>,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl Dispatcher {
    /// Build the consumer pool and bind every market to one consumer
    ///
    /// `worker_count` is clamped to the number of markets so no consumer
    /// idles without a book.
    pub fn new(
        markets: &[MarketId],
        worker_count: usize,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        let worker_count = worker_count.clamp(1, markets.len().max(1));

        let mut consumers = Vec::with_capacity(worker_count);
        let mut handles = Vec::with_capacity(worker_count);
        for _ in 0..worker_count {
            let (tx, rx) = unbounded();
            let should_exit = Arc::new(AtomicBool::new(false));
            consumers.push(MarketConsumer::new(
                rx,
                Arc::clone(&should_exit),
                Arc::clone(&telemetry),
            ));
            handles.push(ConsumerHandle { tx, should_exit });
        }

        let mut registry = HashMap::new();
        for (index, market) in markets.iter().enumerate() {
            let slot = index % worker_count;
            consumers[slot].register_market(market.clone());
            registry.insert(market.clone(), slot);
        }

        let workers = consumers
            .into_iter()
            .enumerate()
            .map(|(index, consumer)| {
                thread::Builder::new()
                    .name(format!("market-consumer-{index}"))
                    .spawn(move || consumer.run())
                    .expect("spawn consumer worker")
            })
            .collect();

        tracing::info!(
            markets = markets.len(),
            consumers = worker_count,
            "dispatcher started"
        );

        Self {
            registry,
            handles,
            workers: Mutex::new(workers),
        }
    }

    fn handle_for(&self, market: &MarketId) -> Result<&ConsumerHandle, EngineError> {
        let slot = self
            .registry
            .get(market)
            .ok_or_else(|| EngineError::UnknownMarket {
                symbol: market.to_string(),
            })?;
        Ok(&self.handles[*slot])
    }

    /// Route an order to its market's consumer
    pub fn send(&self, order: Order) -> Result<(), EngineError> {
        let handle = self.handle_for(&order.market)?;
        handle
            .tx
            .send(Command::Submit(order))
            .map_err(|_| EngineError::Shutdown)
    }

    /// Route a cancel through the owning consumer's queue
    pub fn cancel(
        &self,
        market: &MarketId,
        order_id: OrderId,
        side: Side,
        price: Price,
    ) -> Result<bool, EngineError> {
        let handle = self.handle_for(market)?;
        let (reply_tx, reply_rx) = bounded(1);
        handle
            .tx
            .send(Command::Cancel {
                market: market.clone(),
                order_id,
                side,
                price,
                reply: reply_tx,
            })
            .map_err(|_| EngineError::Shutdown)?;
        reply_rx
            .recv_timeout(REPLY_TIMEOUT)
            .map_err(|_| EngineError::Shutdown)
    }

    /// Best prices and derived quotes, read through the owning consumer
    pub fn top_of_book(&self, market: &MarketId) -> Result<TopOfBook, EngineError> {
        let handle = self.handle_for(market)?;
        let (reply_tx, reply_rx) = bounded(1);
        handle
            .tx
            .send(Command::TopOfBook {
                market: market.clone(),
                reply: reply_tx,
            })
            .map_err(|_| EngineError::Shutdown)?;
        reply_rx
            .recv_timeout(REPLY_TIMEOUT)
            .map_err(|_| EngineError::Shutdown)?
            .ok_or_else(|| EngineError::UnknownMarket {
                symbol: market.to_string(),
            })
    }

    /// Depth snapshot, read through the owning consumer
    pub fn snapshot(&self, market: &MarketId, depth: usize) -> Result<Vec<DepthLevel>, EngineError> {
        let handle = self.handle_for(market)?;
        let (reply_tx, reply_rx) = bounded(1);
        handle
            .tx
            .send(Command::Snapshot {
                market: market.clone(),
                depth,
                reply: reply_tx,
            })
            .map_err(|_| EngineError::Shutdown)?;
        reply_rx
            .recv_timeout(REPLY_TIMEOUT)
            .map_err(|_| EngineError::Shutdown)?
            .ok_or_else(|| EngineError::UnknownMarket {
                symbol: market.to_string(),
            })
    }

    /// Canonicalise an ingress alias against the registered market set
    pub fn registered_market_name(&self, alias: &str) -> Option<MarketId> {
        let canonical = MarketId::canonical(alias);
        self.registry.contains_key(&canonical).then_some(canonical)
    }

    /// Cooperative shutdown: flag every consumer, then wait for each to
    /// drain its queue and stop
    pub fn shutdown(&self) {
        for handle in &self.handles {
            handle.should_exit.store(true, Ordering::Release);
        }
        let workers = {
            let mut guard = self.workers.lock().unwrap_or_else(|e| e.into_inner());
            std::mem::take(&mut *guard)
        };
        for worker in workers {
            if worker.join().is_err() {
                tracing::error!("consumer worker panicked during shutdown");
            }
        }
        tracing::info!("dispatcher stopped");
    }
}
