//! Telemetry hooks
//!
//! The consumer reports execution latency, queue depth, and trades through
//! a sink trait. Sinks must never fail into the hot path; anything that can
//! go wrong inside a sink is logged and swallowed there.

use types::ids::MarketId;
use types::trade::Trade;

/// Receiver for per-match measurements and executed trades
pub trait TelemetrySink: Send + Sync {
    /// One `submit` call completed: execution latency and the depth of the
    /// consumer's inbound queue at completion time.
    fn record_match(&self, market: &MarketId, latency_ns: u64, queue_depth: usize) {
        let _ = (market, latency_ns, queue_depth);
    }

    /// One trade executed.
    fn record_trade(&self, trade: &Trade) {
        let _ = trade;
    }
}

/// Discards everything; the default sink
#[derive(Debug, Default)]
pub struct NoopTelemetry;

impl TelemetrySink for NoopTelemetry {}

/// Emits measurements as tracing events
#[derive(Debug, Default)]
pub struct LogTelemetry;

impl TelemetrySink for LogTelemetry {
    fn record_match(&self, market: &MarketId, latency_ns: u64, queue_depth: usize) {
        tracing::debug!(
            market = %market,
            latency_ns,
            queue_depth,
            "order matched"
        );
    }

    fn record_trade(&self, trade: &Trade) {
        tracing::debug!(
            market = %trade.market,
            sequence = trade.sequence,
            price = %trade.price,
            quantity = %trade.quantity,
            "trade executed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[derive(Default)]
    struct CountingSink {
        matches: AtomicU64,
        trades: AtomicU64,
    }

    impl TelemetrySink for CountingSink {
        fn record_match(&self, _market: &MarketId, _latency_ns: u64, _queue_depth: usize) {
            self.matches.fetch_add(1, Ordering::Relaxed);
        }

        fn record_trade(&self, _trade: &Trade) {
            self.trades.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn test_custom_sink_receives_calls() {
        let sink = CountingSink::default();
        let market = MarketId::new("BTC_USD");

        sink.record_match(&market, 100, 0);
        sink.record_match(&market, 200, 1);

        assert_eq!(sink.matches.load(Ordering::Relaxed), 2);
        assert_eq!(sink.trades.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_noop_sink_is_callable() {
        let sink = NoopTelemetry;
        sink.record_match(&MarketId::new("BTC_USD"), 1, 0);
    }
}
