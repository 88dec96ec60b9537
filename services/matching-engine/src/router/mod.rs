//! Order routing
//!
//! The dispatcher binds every market to exactly one consumer; each consumer
//! is a dedicated worker that drains its queue serially. Cancels and read
//! queries travel the same queue as orders, so the book never needs a lock.

pub mod consumer;
pub mod dispatcher;

pub use consumer::{Command, MarketConsumer};
pub use dispatcher::Dispatcher;
