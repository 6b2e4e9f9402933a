use super::SymbolProvider;
use crate::{
    error::DataError,
    rest::{RestClient, endpoint},
    symbol::Symbol,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use url::Url;

/// [`CoinGecko`] public API base url.
///
/// See docs: <https://docs.coingecko.com/reference/derivatives-exchanges-id>
pub const BASE_URL_COINGECKO: &str = "https://api.coingecko.com";

/// CoinGecko derivatives exchange id of the primary exchange.
pub const COINGECKO_EXCHANGE_ID_MEXC: &str = "mexc";

/// Header carrying an optional CoinGecko demo API key.
const HEADER_API_KEY: &str = "x-cg-demo-api-key";

/// Secondary [`SymbolProvider`]: lists the primary exchange's derivatives via CoinGecko.
#[derive(Clone, Debug)]
pub struct CoinGecko {
    rest: RestClient,
    base_url: Url,
    exchange_id: SmolStr,
    api_key: Option<String>,
}

impl CoinGecko {
    pub fn new(rest: RestClient, base_url: Url, api_key: Option<String>) -> Self {
        Self {
            rest,
            base_url,
            exchange_id: SmolStr::new_static(COINGECKO_EXCHANGE_ID_MEXC),
            api_key,
        }
    }

    pub fn with_exchange_id(mut self, exchange_id: &str) -> Self {
        self.exchange_id = SmolStr::new(exchange_id);
        self
    }
}

/// Derivative entry returned by the CoinGecko derivatives exchange endpoint.
///
/// Only the fields required to derive the symbol universe are modelled.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize)]
pub struct CoinGeckoDerivative {
    #[serde(default)]
    pub symbol: Option<String>,
}

/// Select derivatives whose symbol exists and contains "USDT".
pub fn usdt_symbols(derivatives: Vec<CoinGeckoDerivative>) -> Vec<Symbol> {
    derivatives
        .into_iter()
        .filter_map(|derivative| derivative.symbol)
        .map(Symbol::from)
        .filter(Symbol::contains_usdt)
        .collect()
}

#[async_trait]
impl SymbolProvider for CoinGecko {
    fn name(&self) -> &'static str {
        "coingecko"
    }

    async fn fetch_symbols(&self) -> Result<Vec<Symbol>, DataError> {
        let url = endpoint(
            &self.base_url,
            &format!("api/v3/derivatives/exchanges/{}", self.exchange_id),
        )?;

        let headers = self
            .api_key
            .as_deref()
            .map(|key| vec![(HEADER_API_KEY, key)])
            .unwrap_or_default();

        let derivatives = self
            .rest
            .get_json::<Vec<CoinGeckoDerivative>>(&url, &headers)
            .await?;

        Ok(usdt_symbols(derivatives))
    }
}
