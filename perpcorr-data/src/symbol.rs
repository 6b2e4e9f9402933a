use derive_more::Display;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Quote currency every tradable perpetual must settle in.
pub const QUOTE_USDT: &str = "USDT";

/// Ticker identifying a USDT-quoted perpetual contract, eg/ "BTCUSDT" or "BTC_USDT".
///
/// No structure is assumed beyond exact string matching.
#[derive(
    Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display, Deserialize, Serialize,
)]
#[serde(transparent)]
pub struct Symbol(SmolStr);

impl Symbol {
    pub fn new<S>(symbol: S) -> Self
    where
        S: AsRef<str>,
    {
        Self(SmolStr::new(symbol.as_ref()))
    }

    /// Normalise user input: surrounding whitespace is trimmed and the ticker upper-cased.
    pub fn normalised(input: &str) -> Self {
        Self(SmolStr::new(input.trim().to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Determine if the ticker mentions the USDT quote currency anywhere.
    pub fn contains_usdt(&self) -> bool {
        self.0.contains(QUOTE_USDT)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Symbol {
    fn from(value: String) -> Self {
        Self(SmolStr::from(value))
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
