//! Continuous limit-order matching engine
//!
//! Price-time priority matching over per-market order books, with a
//! dispatcher that binds every market to exactly one serial consumer.
//!
//! **Key invariants:**
//! - Strict price-time priority; execution at the resting order's price
//! - Single writer per book: all mutation and all reads flow through the
//!   owning consumer's queue
//! - No crossed book and no empty price level survives any operation
//! - Deterministic per-market processing (same inputs → same trades)

pub mod book;
pub mod matching;
pub mod router;
pub mod telemetry;

pub use book::{DepthLevel, MatchOutcome, OrderBook, TopOfBook};
pub use router::{Command, Dispatcher, MarketConsumer};
pub use telemetry::{LogTelemetry, NoopTelemetry, TelemetrySink};
