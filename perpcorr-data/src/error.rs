use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upstream errors generated while talking to an exchange or market aggregator.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize, Error)]
pub enum DataError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("HTTP status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("failed to deserialise payload from {url}: {error}")]
    Deserialise { url: String, error: String },

    #[error("upstream rejected request to {url}")]
    Rejected { url: String },

    #[error("upstream returned no data from {url}")]
    Empty { url: String },

    #[error("missing credential: {0}")]
    MissingCredential(String),

    #[error("invalid url: {0}")]
    Url(String),

    #[error("data unavailable for {symbol} after {attempts} attempts: {last}")]
    Exhausted {
        symbol: String,
        attempts: usize,
        last: Box<DataError>,
    },
}

impl DataError {
    /// Determine if retrying the same request may plausibly succeed.
    #[allow(clippy::match_like_matches_macro)]
    pub fn is_transient(&self) -> bool {
        match self {
            DataError::Http(_) | DataError::Empty { .. } | DataError::Rejected { .. } => true,
            DataError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for DataError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value.to_string())
    }
}

impl From<url::ParseError> for DataError {
    fn from(value: url::ParseError) -> Self {
        Self::Url(value.to_string())
    }
}

/// Domain errors surfaced by the [`Analyzer`](crate::analysis::Analyzer).
#[derive(Debug, Clone, Eq, PartialEq, Hash, Deserialize, Serialize, Error)]
pub enum AnalysisError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    UpstreamUnavailable(String),

    #[error("no perpetual pairs available")]
    NoDataAvailable,
}
