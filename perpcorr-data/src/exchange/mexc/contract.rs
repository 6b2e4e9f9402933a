use crate::symbol::{QUOTE_USDT, Symbol};
use serde::{Deserialize, Serialize};

/// Subset of [`Mexc`](super::Mexc) contract detail fields required to derive the symbol
/// universe.
///
/// `symbol` is only required of USDT quoted contracts.
///
/// See docs: <https://mexcdevelop.github.io/apidocs/contract_v1_en/#get-the-contract-information>
#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize)]
pub struct MexcContract {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(rename = "quoteCoin", default)]
    pub quote_coin: Option<String>,
}

/// Select contracts quoted in USDT, preserving upstream order.
pub fn usdt_symbols(contracts: Vec<MexcContract>) -> Vec<Symbol> {
    contracts
        .into_iter()
        .filter(|contract| contract.quote_coin.as_deref() == Some(QUOTE_USDT))
        .filter_map(|contract| contract.symbol)
        .map(Symbol::from)
        .collect()
}
