use crate::config::ServerConfig;
use parking_lot::RwLock;
use perpcorr_data::{
    analysis::{AnalysisResult, Analyzer, AnalyzerConfig},
    cache::{SymbolCache, SymbolCacheConfig},
    clock::SystemClock,
    error::DataError,
    exchange::mexc::{Mexc, MexcConfig},
    provider::{SymbolProvider, coingecko::CoinGecko, coinmarketcap::CoinMarketCap},
    rest::RestClient,
};
use std::sync::Arc;
use url::Url;

/// Shared application state, passed to all route handlers via `axum::extract::State`.
#[derive(Debug)]
pub struct AppState {
    pub config: ServerConfig,
    pub analyzer: Analyzer,
    /// Result set of the most recent successful analysis, served by the CSV export.
    pub last_results: RwLock<Vec<AnalysisResult>>,
}

impl AppState {
    /// Wire the upstream integrations: MEXC first, then CoinGecko, then CoinMarketCap.
    pub fn new(config: ServerConfig) -> Result<Arc<Self>, DataError> {
        let rest = RestClient::new(config.http_timeout);

        let mexc = Arc::new(Mexc::new(
            rest.clone(),
            MexcConfig::new(Url::parse(&config.mexc_contract_url)?)
                .with_candle_limit(config.candle_limit)
                .with_attempts(config.fetch_attempts),
        ));
        let coingecko = CoinGecko::new(
            rest.clone(),
            Url::parse(&config.coingecko_url)?,
            config.coingecko_api_key.clone(),
        );
        let coinmarketcap = CoinMarketCap::new(
            rest,
            Url::parse(&config.coinmarketcap_url)?,
            config.coinmarketcap_api_key.clone(),
        );

        let providers: Vec<Arc<dyn SymbolProvider>> = vec![
            Arc::clone(&mexc) as Arc<dyn SymbolProvider>,
            Arc::new(coingecko),
            Arc::new(coinmarketcap),
        ];

        let symbols = SymbolCache::new(
            providers,
            Arc::new(SystemClock),
            SymbolCacheConfig::default()
                .with_ttl(config.symbol_cache_ttl)
                .with_attempts(config.fetch_attempts),
        );

        let analyzer = Analyzer::new(
            Arc::new(symbols),
            mexc,
            AnalyzerConfig::default()
                .with_liquidity(config.liquidity)
                .with_max_results(config.max_results)
                .with_concurrency(config.analyze_concurrency),
        );

        Ok(Arc::new(Self {
            config,
            analyzer,
            last_results: RwLock::new(Vec::new()),
        }))
    }
}
