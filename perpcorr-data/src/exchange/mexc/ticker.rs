use crate::{
    de::de_f64_lenient_or_zero,
    market::{MarketData, MarketDatum},
    symbol::Symbol,
};
use fnv::FnvHashSet;
use serde::{Deserialize, Serialize};

/// Subset of [`Mexc`](super::Mexc) ticker fields required to derive liquidity metrics.
///
/// Missing numeric fields count as zero.
///
/// See docs: <https://mexcdevelop.github.io/apidocs/contract_v1_en/#get-contract-trend-data>
#[derive(Clone, PartialEq, PartialOrd, Debug, Deserialize, Serialize)]
pub struct MexcTicker {
    #[serde(default)]
    pub symbol: Option<String>,

    #[serde(
        rename = "positionOpenInterest",
        default,
        deserialize_with = "de_f64_lenient_or_zero"
    )]
    pub open_interest: f64,

    #[serde(
        rename = "turnover24h",
        default,
        deserialize_with = "de_f64_lenient_or_zero"
    )]
    pub turnover_24h: f64,
}

impl From<&MexcTicker> for MarketDatum {
    fn from(ticker: &MexcTicker) -> Self {
        Self {
            market_cap: ticker.open_interest,
            volume_24h: ticker.turnover_24h,
        }
    }
}

/// Build [`MarketData`] restricted to the `requested` symbols.
pub fn market_data_from_tickers(tickers: Vec<MexcTicker>, requested: &[Symbol]) -> MarketData {
    let requested = requested.iter().collect::<FnvHashSet<_>>();

    tickers
        .iter()
        .filter_map(|ticker| {
            let symbol = Symbol::from(ticker.symbol.as_deref()?);
            requested
                .contains(&symbol)
                .then(|| (symbol, MarketDatum::from(ticker)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{de::items_lenient, exchange::mexc::MexcResponse};
    use serde_json::Value;

    fn tickers(input: &str) -> Vec<MexcTicker> {
        let items = serde_json::from_str::<MexcResponse<Vec<Value>>>(input)
            .unwrap()
            .data
            .unwrap();
        items_lenient(items)
    }

    #[test]
    fn test_mexc_ticker() {
        struct TestCase {
            input: &'static str,
            expected: Option<MexcTicker>,
        }

        let tests = vec![
            TestCase {
                // TC0: numeric fields
                input: r#"{"symbol": "BTC_USDT", "positionOpenInterest": 2000000, "turnover24h": 1000000.5}"#,
                expected: Some(MexcTicker {
                    symbol: Some("BTC_USDT".to_string()),
                    open_interest: 2_000_000.0,
                    turnover_24h: 1_000_000.5,
                }),
            },
            TestCase {
                // TC1: quoted fields
                input: r#"{"symbol": "ETH_USDT", "positionOpenInterest": "500", "turnover24h": "10"}"#,
                expected: Some(MexcTicker {
                    symbol: Some("ETH_USDT".to_string()),
                    open_interest: 500.0,
                    turnover_24h: 10.0,
                }),
            },
            TestCase {
                // TC2: missing metrics default to zero
                input: r#"{"symbol": "SOL_USDT", "lastPrice": 61.2}"#,
                expected: Some(MexcTicker {
                    symbol: Some("SOL_USDT".to_string()),
                    open_interest: 0.0,
                    turnover_24h: 0.0,
                }),
            },
            TestCase {
                // TC3: malformed metric is a parse error
                input: r#"{"symbol": "SOL_USDT", "positionOpenInterest": "lots"}"#,
                expected: None,
            },
        ];

        for (index, test) in tests.into_iter().enumerate() {
            let actual = serde_json::from_str::<MexcTicker>(test.input).ok();
            assert_eq!(actual, test.expected, "TC{} failed", index);
        }
    }

    #[test]
    fn test_market_data_from_tickers_restricted_to_requested() {
        let input = r#"
            {
                "success": true,
                "data": [
                    {"symbol": "BTCUSDT", "positionOpenInterest": 2000000, "turnover24h": 1000000},
                    {"symbol": "ETHUSDT", "positionOpenInterest": 500, "turnover24h": 10},
                    {"symbol": "XRPUSDT", "positionOpenInterest": 9000000, "turnover24h": 9000000},
                    {"positionOpenInterest": 1, "turnover24h": 1}
                ]
            }
        "#;
        let requested = vec![
            Symbol::from("BTCUSDT"),
            Symbol::from("ETHUSDT"),
            Symbol::from("DOGEUSDT"),
        ];
        let actual = market_data_from_tickers(tickers(input), &requested);

        assert_eq!(actual.len(), 2);
        assert_eq!(
            actual.get(&Symbol::from("BTCUSDT")),
            Some(&MarketDatum {
                market_cap: 2_000_000.0,
                volume_24h: 1_000_000.0
            })
        );
        assert_eq!(
            actual.get(&Symbol::from("ETHUSDT")),
            Some(&MarketDatum {
                market_cap: 500.0,
                volume_24h: 10.0
            })
        );
        assert!(!actual.contains_key(&Symbol::from("XRPUSDT")));
        assert!(!actual.contains_key(&Symbol::from("DOGEUSDT")));
    }

    #[test]
    fn test_market_data_survives_malformed_ticker_rows() {
        let input = r#"
            {
                "success": true,
                "data": [
                    {"symbol": "BTC_USDT", "positionOpenInterest": 2000000, "turnover24h": 1000000},
                    {"symbol": "WEIRD_USD", "positionOpenInterest": "n/a", "turnover24h": 5},
                    {"symbol": ["ETH_USDT"]},
                    {"symbol": "SOL_USDT", "positionOpenInterest": "3000000", "turnover24h": "750000"}
                ]
            }
        "#;

        let requested = vec![
            Symbol::from("BTC_USDT"),
            Symbol::from("WEIRD_USD"),
            Symbol::from("SOL_USDT"),
        ];
        let actual = market_data_from_tickers(tickers(input), &requested);

        assert_eq!(actual.len(), 2);
        assert_eq!(
            actual.get(&Symbol::from("BTC_USDT")),
            Some(&MarketDatum {
                market_cap: 2_000_000.0,
                volume_24h: 1_000_000.0
            })
        );
        assert_eq!(
            actual.get(&Symbol::from("SOL_USDT")),
            Some(&MarketDatum {
                market_cap: 3_000_000.0,
                volume_24h: 750_000.0
            })
        );
        assert!(!actual.contains_key(&Symbol::from("WEIRD_USD")));
    }
}
