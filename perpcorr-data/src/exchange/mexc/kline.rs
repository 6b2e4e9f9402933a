use crate::{
    candle::Candle,
    de::{de_f64_lenient, de_i64_lenient},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Epoch values above this are interpreted as milliseconds rather than seconds.
const EPOCH_MILLIS_THRESHOLD: i64 = 100_000_000_000;

/// [`Mexc`](super::Mexc) kline row.
///
/// ### Raw Payload Examples
/// ```json
/// [1700000000, 37000.5, 37210.0, 36950.1, 37120.4, 1523.2, 56400123.5]
/// ```
#[derive(Clone, PartialEq, PartialOrd, Debug, Deserialize, Serialize)]
pub struct MexcKline(
    #[serde(deserialize_with = "de_i64_lenient")] pub i64,
    #[serde(deserialize_with = "de_f64_lenient")] pub f64,
    #[serde(deserialize_with = "de_f64_lenient")] pub f64,
    #[serde(deserialize_with = "de_f64_lenient")] pub f64,
    #[serde(deserialize_with = "de_f64_lenient")] pub f64,
    #[serde(deserialize_with = "de_f64_lenient")] pub f64,
    #[serde(deserialize_with = "de_f64_lenient")] pub f64,
);

/// Kline timestamp could not be represented as a [`DateTime<Utc>`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct InvalidKlineTime(pub i64);

impl TryFrom<MexcKline> for Candle {
    type Error = InvalidKlineTime;

    fn try_from(
        MexcKline(time, open, high, low, close, volume, turnover): MexcKline,
    ) -> Result<Self, Self::Error> {
        let time = datetime_utc_from_epoch(time).ok_or(InvalidKlineTime(time))?;

        Ok(Candle {
            time,
            open,
            high,
            low,
            close,
            volume,
            turnover,
        })
    }
}

fn datetime_utc_from_epoch(epoch: i64) -> Option<DateTime<Utc>> {
    if epoch.abs() >= EPOCH_MILLIS_THRESHOLD {
        DateTime::from_timestamp_millis(epoch)
    } else {
        DateTime::from_timestamp(epoch, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::mexc::MexcResponse;

    #[test]
    fn test_mexc_kline() {
        struct TestCase {
            input: &'static str,
            expected: Option<MexcKline>,
        }

        let tests = vec![
            TestCase {
                // TC0: numeric row
                input: r#"[1700000000, 37000.5, 37210.0, 36950.1, 37120.4, 1523.2, 56400123.5]"#,
                expected: Some(MexcKline(
                    1700000000, 37000.5, 37210.0, 36950.1, 37120.4, 1523.2, 56400123.5,
                )),
            },
            TestCase {
                // TC1: quoted numbers
                input: r#"["1700000000", "1.5", "2", "1", "1.75", "10", "17.5"]"#,
                expected: Some(MexcKline(1700000000, 1.5, 2.0, 1.0, 1.75, 10.0, 17.5)),
            },
            TestCase {
                // TC2: malformed close is a parse error
                input: r#"[1700000000, 1.5, 2, 1, "n/a", 10, 17.5]"#,
                expected: None,
            },
            TestCase {
                // TC3: truncated row is a parse error
                input: r#"[1700000000, 1.5, 2, 1]"#,
                expected: None,
            },
        ];

        for (index, test) in tests.into_iter().enumerate() {
            let actual = serde_json::from_str::<MexcKline>(test.input).ok();
            assert_eq!(actual, test.expected, "TC{} failed", index);
        }
    }

    #[test]
    fn test_candle_from_mexc_kline() {
        struct TestCase {
            input: MexcKline,
            expected: Result<DateTime<Utc>, InvalidKlineTime>,
        }

        let tests = vec![
            TestCase {
                // TC0: epoch seconds
                input: MexcKline(1700000000, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0),
                expected: Ok(DateTime::from_timestamp(1700000000, 0).unwrap()),
            },
            TestCase {
                // TC1: epoch milliseconds
                input: MexcKline(1700000000123, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0),
                expected: Ok(DateTime::from_timestamp_millis(1700000000123).unwrap()),
            },
            TestCase {
                // TC2: out of range
                input: MexcKline(i64::MAX, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0),
                expected: Err(InvalidKlineTime(i64::MAX)),
            },
        ];

        for (index, test) in tests.into_iter().enumerate() {
            let actual = Candle::try_from(test.input).map(|candle| candle.time);
            assert_eq!(actual, test.expected, "TC{} failed", index);
        }
    }

    #[test]
    fn test_kline_payload_preserves_order() {
        let input = r#"
            {
                "success": true,
                "code": 0,
                "data": [
                    [1700000000, 1, 1, 1, 10.5, 100, 1050],
                    [1700003600, 1, 1, 1, 11.0, 200, 2200],
                    [1700007200, 1, 1, 1, 10.0, 300, 3000]
                ]
            }
        "#;

        let response = serde_json::from_str::<MexcResponse<Vec<MexcKline>>>(input).unwrap();
        let candles = response
            .data
            .unwrap()
            .into_iter()
            .map(Candle::try_from)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(
            candles.iter().map(|candle| candle.close).collect::<Vec<_>>(),
            vec![10.5, 11.0, 10.0]
        );
        assert!(candles.windows(2).all(|pair| pair[0].time < pair[1].time));
    }
}
