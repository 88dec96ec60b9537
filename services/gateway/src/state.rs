use matching_engine::router::Dispatcher;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use types::ids::OrderId;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    /// Snapshot depth from configuration
    pub depth: usize,
    order_ids: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(dispatcher: Arc<Dispatcher>, depth: usize) -> Self {
        Self {
            dispatcher,
            depth,
            order_ids: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Mint the next order id; the gateway owns the counter
    pub fn next_order_id(&self) -> OrderId {
        OrderId::new(self.order_ids.fetch_add(1, Ordering::Relaxed))
    }
}
