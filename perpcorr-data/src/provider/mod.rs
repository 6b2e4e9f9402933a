use crate::{error::DataError, symbol::Symbol};
use async_trait::async_trait;
use tracing::warn;

/// CoinGecko derivatives exchange [`SymbolProvider`].
pub mod coingecko;

/// CoinMarketCap derivatives exchange listing [`SymbolProvider`].
pub mod coinmarketcap;

/// Source of the USDT-quoted perpetual symbol universe.
///
/// Implementors only need to provide [`SymbolProvider::fetch_symbols`]. Callers wanting the
/// fallback friendly contract use [`SymbolProvider::fetch`], which never fails.
#[async_trait]
pub trait SymbolProvider: Send + Sync + std::fmt::Debug {
    /// Short, stable name used in logs.
    fn name(&self) -> &'static str;

    /// Query the upstream and normalise its response into USDT-quoted perpetual symbols.
    async fn fetch_symbols(&self) -> Result<Vec<Symbol>, DataError>;

    /// Like [`SymbolProvider::fetch_symbols`], but any failure is logged and swallowed into an
    /// empty sequence so the caller can fall back to the next provider.
    async fn fetch(&self) -> Vec<Symbol> {
        match self.fetch_symbols().await {
            Ok(symbols) => symbols,
            Err(error) => {
                warn!(provider = self.name(), %error, "symbol provider failed");
                vec![]
            }
        }
    }
}
