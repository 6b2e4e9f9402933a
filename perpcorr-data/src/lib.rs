#![warn(
    unused,
    clippy::cast_possible_truncation,
    clippy::unused_self,
    clippy::cast_possible_wrap,
    missing_debug_implementations,
    rust_2018_idioms
)]

//! # Perpcorr-Data
//! REST integration layer for USDT-quoted perpetual futures.
//!
//! * **Symbols**: resolves the tradable universe from an ordered list of [`SymbolProvider`]s,
//!   cached behind a TTL by the [`SymbolCache`](cache::SymbolCache).
//! * **Market data**: open interest and 24h turnover per symbol via [`MarketFeed`].
//! * **Candles**: the most recent hourly candles per symbol via [`MarketFeed`].
//! * **Analysis**: ranks candidate symbols by absolute Pearson correlation of close prices
//!   against a base symbol, see [`Analyzer`](analysis::Analyzer).
//!
//! [`SymbolProvider`]: provider::SymbolProvider
//! [`MarketFeed`]: market::MarketFeed

/// All [`Error`](std::error::Error)s generated in Perpcorr-Data.
pub mod error;

/// Lenient serde deserialisers for upstream payloads.
pub mod de;

/// [`Symbol`](symbol::Symbol) ticker type.
pub mod symbol;

/// Normalised hourly [`Candle`](candle::Candle) model.
pub mod candle;

/// [`MarketDatum`](market::MarketDatum) model and the [`MarketFeed`](market::MarketFeed)
/// abstraction over the primary exchange.
pub mod market;

/// Injectable wall clock.
pub mod clock;

/// Thin JSON-over-HTTP client shared by every upstream integration.
pub mod rest;

/// [`SymbolProvider`](provider::SymbolProvider) trait and the market aggregator providers.
pub mod provider;

/// Exchange integrations.
pub mod exchange;

/// TTL cache over an ordered fallback list of symbol providers.
pub mod cache;

/// Pearson correlation routines.
pub mod correlation;

/// Base symbol correlation analysis and ranking.
pub mod analysis;

/// CSV rendering of analysis results.
pub mod export;
