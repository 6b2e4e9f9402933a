use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of hourly candles covering the 14 day correlation window.
pub const CANDLE_LIMIT_14D_HOURLY: usize = 14 * 24;

/// Normalised hourly OHLCV candle for one symbol.
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug, Deserialize, Serialize)]
pub struct Candle {
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    /// Quote currency value traded during the bucket.
    pub turnover: f64,
}

/// Extract the close price series, preserving order.
pub fn close_prices(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|candle| candle.close).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_prices_preserves_order() {
        let candles = (0_i64..)
            .zip([100.0, 101.5, 99.25])
            .map(|(hour, close)| Candle {
                time: DateTime::from_timestamp(3600 * hour, 0).unwrap(),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1.0,
                turnover: close,
            })
            .collect::<Vec<_>>();

        assert_eq!(close_prices(&candles), vec![100.0, 101.5, 99.25]);
    }

    #[test]
    fn test_candle_limit_covers_fourteen_days() {
        assert_eq!(CANDLE_LIMIT_14D_HOURLY, 336);
    }
}
