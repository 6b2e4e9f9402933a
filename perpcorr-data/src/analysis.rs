use crate::{
    cache::SymbolCache,
    candle::close_prices,
    correlation::pearson,
    error::AnalysisError,
    market::{LiquidityFilter, MarketData, MarketFeed},
    symbol::Symbol,
};
use futures::{StreamExt, stream};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default maximum number of ranked results returned by an analysis.
pub const DEFAULT_MAX_RESULTS: usize = 20;

/// Default number of candidate candle fetches in flight per analysis.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// [`Analyzer`] configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyzerConfig {
    pub liquidity: LiquidityFilter,
    pub max_results: usize,
    pub concurrency: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            liquidity: LiquidityFilter::default(),
            max_results: DEFAULT_MAX_RESULTS,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl AnalyzerConfig {
    pub fn with_liquidity(mut self, liquidity: LiquidityFilter) -> Self {
        self.liquidity = liquidity;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }
}

/// Correlation of one liquid candidate symbol against the analysed base.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnalysisResult {
    pub symbol: Symbol,
    pub market_cap: f64,
    pub volume_24h: f64,
    /// Pearson correlation of hourly closes, `NaN` if either series is constant.
    pub correlation: f64,
}

/// Ranks liquid symbols by how weakly their price history correlates with a base symbol.
#[derive(Debug, Clone)]
pub struct Analyzer {
    symbols: Arc<SymbolCache>,
    feed: Arc<dyn MarketFeed>,
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(
        symbols: Arc<SymbolCache>,
        feed: Arc<dyn MarketFeed>,
        config: AnalyzerConfig,
    ) -> Self {
        Self {
            symbols,
            feed,
            config,
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Resolve the symbol universe, failing with [`AnalysisError::NoDataAvailable`] if neither
    /// the cache nor any provider has symbols.
    pub async fn pairs(&self) -> Result<Vec<Symbol>, AnalysisError> {
        let symbols = self.symbols.get_symbols().await;
        if symbols.is_empty() {
            Err(AnalysisError::NoDataAvailable)
        } else {
            Ok(symbols)
        }
    }

    /// Determine if any symbols are currently available.
    pub async fn is_available(&self) -> bool {
        !self.symbols.get_symbols().await.is_empty()
    }

    /// Rank every other liquid symbol by absolute correlation with `base`.
    ///
    /// `base` must be part of the symbol universe and pass the liquidity filter, otherwise
    /// [`AnalysisError::InvalidInput`]. Failing to fetch the base candles aborts the analysis
    /// with [`AnalysisError::UpstreamUnavailable`]. Candidates whose candles cannot be fetched,
    /// or whose series length differs from the base, are skipped.
    pub async fn analyze(&self, base: &Symbol) -> Result<Vec<AnalysisResult>, AnalysisError> {
        let universe = self.symbols.get_symbols().await;
        if !universe.contains(base) {
            return Err(AnalysisError::InvalidInput(
                "Invalid or unavailable symbol.".to_string(),
            ));
        }

        let market = self.feed.fetch_market_data(&universe).await;
        let qualified = self.config.liquidity.apply(&universe, &market);
        if !qualified.contains(&base) {
            return Err(AnalysisError::InvalidInput(
                "Base symbol does not meet liquidity requirements.".to_string(),
            ));
        }

        let base_closes = match self.feed.fetch_candles(base).await {
            Ok(candles) => close_prices(&candles),
            Err(error) => {
                warn!(%base, %error, "failed to fetch base candles");
                return Err(AnalysisError::UpstreamUnavailable(
                    "Failed to fetch price data for base symbol.".to_string(),
                ));
            }
        };

        let evaluations = qualified
            .into_iter()
            .filter(|symbol| *symbol != base)
            .map(|symbol| self.evaluate(symbol, &base_closes, &market))
            .collect::<Vec<_>>();
        let candidate_count = evaluations.len();

        // Ordered fan-out keeps results in universe order ahead of the stable sort
        let results = stream::iter(evaluations)
            .buffered(self.config.concurrency.max(1))
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();

        info!(
            %base,
            candidates = candidate_count,
            correlated = results.len(),
            "analysis complete"
        );

        Ok(rank(results, self.config.max_results))
    }

    async fn evaluate(
        &self,
        symbol: &Symbol,
        base_closes: &[f64],
        market: &MarketData,
    ) -> Option<AnalysisResult> {
        let candles = match self.feed.fetch_candles(symbol).await {
            Ok(candles) => candles,
            Err(error) => {
                debug!(%symbol, %error, "skipping candidate without candles");
                return None;
            }
        };

        let Some(correlation) = pearson(base_closes, &close_prices(&candles)) else {
            debug!(
                %symbol,
                base_len = base_closes.len(),
                candidate_len = candles.len(),
                "skipping candidate with misaligned candle series"
            );
            return None;
        };

        let datum = market.get(symbol).copied().unwrap_or_default();

        Some(AnalysisResult {
            symbol: symbol.clone(),
            market_cap: datum.market_cap,
            volume_24h: datum.volume_24h,
            correlation,
        })
    }
}

/// Sort ascending by absolute correlation, ties broken by descending 24h volume, then truncate.
///
/// `NaN` correlations sort after every finite value. The sort is stable.
pub fn rank(results: Vec<AnalysisResult>, max_results: usize) -> Vec<AnalysisResult> {
    results
        .into_iter()
        .sorted_by(|a, b| {
            a.correlation
                .abs()
                .total_cmp(&b.correlation.abs())
                .then_with(|| b.volume_24h.total_cmp(&a.volume_24h))
        })
        .take(max_results)
        .collect()
}
