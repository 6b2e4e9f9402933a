use self::{
    contract::{MexcContract, usdt_symbols},
    kline::MexcKline,
    ticker::{MexcTicker, market_data_from_tickers},
};
use crate::{
    candle::{CANDLE_LIMIT_14D_HOURLY, Candle},
    de::items_lenient,
    error::DataError,
    market::{MarketData, MarketFeed},
    provider::SymbolProvider,
    rest::{RestClient, endpoint},
    symbol::Symbol,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

/// Contract detail types used to derive the USDT perpetual universe.
pub mod contract;

/// Kline types for [`Mexc`] hourly candles.
pub mod kline;

/// Ticker types carrying open interest and 24h turnover.
pub mod ticker;

/// [`Mexc`] contract REST API base url.
///
/// See docs: <https://mexcdevelop.github.io/apidocs/contract_v1_en/>
pub const BASE_URL_MEXC_CONTRACT: &str = "https://contract.mexc.com";

/// Kline interval requested from [`Mexc`].
pub const KLINE_INTERVAL_1H: &str = "1H";

/// Default number of attempts for a [`Mexc`] candle fetch.
pub const DEFAULT_FETCH_ATTEMPTS: usize = 3;

/// [`Mexc`] integration configuration.
#[derive(Clone, Debug)]
pub struct MexcConfig {
    pub base_url: Url,
    /// Number of hourly candles requested per symbol.
    pub candle_limit: usize,
    /// Immediate attempts made per candle fetch before giving up.
    pub attempts: usize,
}

impl Default for MexcConfig {
    fn default() -> Self {
        Self {
            // Infallible: constant is a valid absolute url
            base_url: Url::parse(BASE_URL_MEXC_CONTRACT).expect("valid MEXC base url"),
            candle_limit: CANDLE_LIMIT_14D_HOURLY,
            attempts: DEFAULT_FETCH_ATTEMPTS,
        }
    }
}

impl MexcConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            ..Default::default()
        }
    }

    pub fn with_candle_limit(mut self, limit: usize) -> Self {
        self.candle_limit = limit;
        self
    }

    pub fn with_attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts;
        self
    }
}

/// Generic [`Mexc`] REST response envelope.
///
/// ### Raw Payload Examples
/// ```json
/// {"success": true, "code": 0, "data": [...]}
/// {"success": false, "code": 1001, "message": "contract does not exist"}
/// ```
#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
pub struct MexcResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> MexcResponse<T> {
    /// Unwrap the `data` of a successful response.
    pub fn into_data(self, url: &Url) -> Result<T, DataError> {
        if !self.success {
            return Err(DataError::Rejected {
                url: url.to_string(),
            });
        }

        self.data.ok_or_else(|| DataError::Empty {
            url: url.to_string(),
        })
    }
}

/// Primary exchange integration.
///
/// Acts both as the primary [`SymbolProvider`] and as the [`MarketFeed`] for tickers and
/// candles.
#[derive(Clone, Debug)]
pub struct Mexc {
    rest: RestClient,
    config: MexcConfig,
}

impl Mexc {
    pub fn new(rest: RestClient, config: MexcConfig) -> Self {
        Self { rest, config }
    }

    pub fn config(&self) -> &MexcConfig {
        &self.config
    }

    async fn fetch_contracts(&self) -> Result<Vec<MexcContract>, DataError> {
        let url = endpoint(&self.config.base_url, "api/v1/contract/detail")?;
        let items = self
            .rest
            .get_json::<MexcResponse<Vec<Value>>>(&url, &[])
            .await?
            .into_data(&url)?;

        Ok(items_lenient(items))
    }

    async fn fetch_tickers(&self) -> Result<Vec<MexcTicker>, DataError> {
        let url = endpoint(&self.config.base_url, "api/v1/contract/ticker")?;
        let items = self
            .rest
            .get_json::<MexcResponse<Vec<Value>>>(&url, &[])
            .await?
            .into_data(&url)?;
        let tickers = items_lenient::<MexcTicker>(items);

        if tickers.is_empty() {
            return Err(DataError::Empty {
                url: url.to_string(),
            });
        }

        Ok(tickers)
    }

    fn kline_url(&self, symbol: &Symbol) -> Result<Url, DataError> {
        let mut url = endpoint(&self.config.base_url, "api/v1/contract/kline")?;
        url.path_segments_mut()
            .map_err(|_| DataError::Url("cannot-be-a-base url".to_string()))?
            .push(symbol.as_str());
        url.query_pairs_mut()
            .append_pair("interval", KLINE_INTERVAL_1H)
            .append_pair("start", "0")
            .append_pair("end", "0")
            .append_pair("limit", &self.config.candle_limit.to_string());
        Ok(url)
    }

    async fn fetch_candles_once(&self, symbol: &Symbol) -> Result<Vec<Candle>, DataError> {
        let url = self.kline_url(symbol)?;
        let klines = self
            .rest
            .get_json::<MexcResponse<Vec<MexcKline>>>(&url, &[])
            .await?
            .into_data(&url)?;

        if klines.is_empty() {
            return Err(DataError::Empty {
                url: url.to_string(),
            });
        }

        klines
            .into_iter()
            .map(|kline| {
                let time = kline.0;
                Candle::try_from(kline).map_err(|_| DataError::Deserialise {
                    url: url.to_string(),
                    error: format!("invalid kline timestamp: {time}"),
                })
            })
            .collect()
    }
}

#[async_trait]
impl SymbolProvider for Mexc {
    fn name(&self) -> &'static str {
        "mexc"
    }

    async fn fetch_symbols(&self) -> Result<Vec<Symbol>, DataError> {
        self.fetch_contracts().await.map(usdt_symbols)
    }
}

#[async_trait]
impl MarketFeed for Mexc {
    async fn fetch_market_data(&self, symbols: &[Symbol]) -> MarketData {
        match self.fetch_tickers().await {
            Ok(tickers) => market_data_from_tickers(tickers, symbols),
            Err(error) => {
                warn!(%error, "failed to fetch market data");
                MarketData::default()
            }
        }
    }

    async fn fetch_candles(&self, symbol: &Symbol) -> Result<Vec<Candle>, DataError> {
        let attempts = self.config.attempts.max(1);

        let mut last_error = None;
        for attempt in 1..=attempts {
            match self.fetch_candles_once(symbol).await {
                Ok(candles) => return Ok(candles),
                Err(error) => {
                    debug!(
                        %symbol,
                        attempt,
                        transient = error.is_transient(),
                        %error,
                        "candle fetch attempt failed"
                    );
                    last_error = Some(error);
                }
            }
        }

        Err(DataError::Exhausted {
            symbol: symbol.to_string(),
            attempts,
            last: Box::new(last_error.unwrap_or_else(|| DataError::Empty {
                url: self.config.base_url.to_string(),
            })),
        })
    }
}
