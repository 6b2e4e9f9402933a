use crate::{candle::Candle, error::DataError, symbol::Symbol};
use async_trait::async_trait;
use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};

/// Current liquidity metrics for one symbol.
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug, Default, Deserialize, Serialize)]
pub struct MarketDatum {
    /// Open interest, used as a market capitalisation proxy.
    pub market_cap: f64,
    /// Quote currency turnover over the trailing 24 hours.
    pub volume_24h: f64,
}

/// Request scoped liquidity metrics keyed by [`Symbol`].
pub type MarketData = FnvHashMap<Symbol, MarketDatum>;

/// Minimum liquidity a symbol must exceed to take part in an analysis.
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug, Deserialize, Serialize)]
pub struct LiquidityFilter {
    pub min_market_cap: f64,
    pub min_volume_24h: f64,
}

impl Default for LiquidityFilter {
    fn default() -> Self {
        Self {
            min_market_cap: 1_000_000.0,
            min_volume_24h: 500_000.0,
        }
    }
}

impl LiquidityFilter {
    /// Both thresholds are strict. Symbols absent from `data` count as zero and never pass.
    pub fn passes(&self, datum: Option<&MarketDatum>) -> bool {
        datum.is_some_and(|datum| {
            datum.market_cap > self.min_market_cap && datum.volume_24h > self.min_volume_24h
        })
    }

    /// Filter `symbols`, preserving their order, to those passing the thresholds.
    pub fn apply<'a>(&self, symbols: &'a [Symbol], data: &MarketData) -> Vec<&'a Symbol> {
        symbols
            .iter()
            .filter(|symbol| self.passes(data.get(*symbol)))
            .collect()
    }
}

/// Market data and price history source for the primary exchange.
#[async_trait]
pub trait MarketFeed: Send + Sync + std::fmt::Debug {
    /// Fetch liquidity metrics restricted to `symbols`.
    ///
    /// Total request failure yields an empty map, it is never retried.
    async fn fetch_market_data(&self, symbols: &[Symbol]) -> MarketData;

    /// Fetch the most recent hourly candles for `symbol`, oldest first.
    async fn fetch_candles(&self, symbol: &Symbol) -> Result<Vec<Candle>, DataError>;
}
