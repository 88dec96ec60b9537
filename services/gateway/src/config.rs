use clap::Parser;
use types::ids::MarketId;

/// Matching engine gateway
#[derive(Debug, Parser)]
#[command(name = "gateway", about = "HTTP ingress for the matching engine")]
pub struct Config {
    /// Markets to serve, comma separated (e.g. BTC_USD,ETH_USD)
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "BTC_USD,ETH_USD,USD_JPY"
    )]
    pub markets: Vec<String>,

    /// Listening port
    #[arg(long, default_value_t = 8989)]
    pub port: u16,

    /// Number of consumer workers; defaults to the number of hardware threads
    #[arg(long)]
    pub workers: Option<usize>,

    /// Depth reported by book snapshots
    #[arg(long, default_value_t = 10)]
    pub depth: usize,
}

impl Config {
    /// Canonicalised market identifiers
    pub fn market_ids(&self) -> Vec<MarketId> {
        self.markets
            .iter()
            .map(|symbol| MarketId::canonical(symbol))
            .collect()
    }

    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}
