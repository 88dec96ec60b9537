//! Matching logic
//!
//! Crossing detection and trade construction, shared by the order book.

pub mod crossing;
pub mod executor;

pub use executor::MatchExecutor;
