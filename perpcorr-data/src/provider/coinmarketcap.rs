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

/// [`CoinMarketCap`] pro API base url.
///
/// See docs: <https://coinmarketcap.com/api/documentation/v1/>
pub const BASE_URL_COINMARKETCAP: &str = "https://pro-api.coinmarketcap.com";

/// Header carrying the mandatory CoinMarketCap API key.
const HEADER_API_KEY: &str = "X-CMC_PRO_API_KEY";

/// Tertiary [`SymbolProvider`]: finds the primary exchange in the CoinMarketCap derivatives
/// exchange listing and yields its USDT contracts.
#[derive(Clone, Debug)]
pub struct CoinMarketCap {
    rest: RestClient,
    base_url: Url,
    exchange_name_prefix: SmolStr,
    api_key: Option<String>,
}

impl CoinMarketCap {
    pub fn new(rest: RestClient, base_url: Url, api_key: Option<String>) -> Self {
        Self {
            rest,
            base_url,
            exchange_name_prefix: SmolStr::new_static("mexc"),
            api_key,
        }
    }

    /// Case-insensitive prefix identifying the exchange entry.
    pub fn with_exchange_name_prefix(mut self, prefix: &str) -> Self {
        self.exchange_name_prefix = SmolStr::new(prefix.to_lowercase());
        self
    }
}

#[derive(Clone, PartialEq, Debug, Default, Deserialize, Serialize)]
pub struct CoinMarketCapResponse {
    #[serde(default)]
    pub data: Vec<CoinMarketCapExchange>,
}

#[derive(Clone, PartialEq, Debug, Default, Deserialize, Serialize)]
pub struct CoinMarketCapExchange {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub contracts: Vec<CoinMarketCapContract>,
}

#[derive(Clone, PartialEq, Debug, Default, Deserialize, Serialize)]
pub struct CoinMarketCapContract {
    #[serde(default)]
    pub symbol: Option<String>,
}

/// Select USDT contracts of the first exchange whose lower-cased name starts with `prefix`.
///
/// Returns an empty sequence if no exchange matches.
pub fn usdt_symbols(response: CoinMarketCapResponse, prefix: &str) -> Vec<Symbol> {
    response
        .data
        .into_iter()
        .find(|exchange| exchange.name.to_lowercase().starts_with(prefix))
        .map(|exchange| {
            exchange
                .contracts
                .into_iter()
                .filter_map(|contract| contract.symbol)
                .map(Symbol::from)
                .filter(Symbol::contains_usdt)
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl SymbolProvider for CoinMarketCap {
    fn name(&self) -> &'static str {
        "coinmarketcap"
    }

    async fn fetch_symbols(&self) -> Result<Vec<Symbol>, DataError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| DataError::MissingCredential("COINMARKETCAP_API_KEY".to_string()))?;

        let url = endpoint(&self.base_url, "v1/derivatives/exchange")?;
        let response = self
            .rest
            .get_json::<CoinMarketCapResponse>(&url, &[(HEADER_API_KEY, api_key)])
            .await?;

        Ok(usdt_symbols(response, &self.exchange_name_prefix))
    }
}
