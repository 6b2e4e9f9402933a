/// `Mexc` perpetual futures REST integration: contract universe, tickers and klines.
pub mod mexc;
