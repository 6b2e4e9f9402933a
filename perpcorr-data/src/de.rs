use serde::{
    Deserialize, Deserializer,
    de::{DeserializeOwned, Error},
};
use serde_json::Value;
use tracing::debug;

/// Deserialise each element of a JSON array payload independently.
///
/// Malformed elements are logged and dropped, so one bad row never discards the rest.
pub fn items_lenient<T>(items: Vec<Value>) -> Vec<T>
where
    T: DeserializeOwned,
{
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<T>(item) {
            Ok(parsed) => Some(parsed),
            Err(error) => {
                debug!(item = std::any::type_name::<T>(), %error, "dropping malformed item");
                None
            }
        })
        .collect()
}

/// Deserialise a JSON number or numeric string as an `f64`.
///
/// Exchanges are inconsistent about quoting decimals, eg/ MEXC kline rows carry bare numbers
/// while some ticker fields are quoted.
pub fn de_f64_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    value_as_f64(&value).map_err(D::Error::custom)
}

/// Deserialise an optional JSON number or numeric string as an `f64`, treating `null`, absent
/// and blank strings as zero.
pub fn de_f64_lenient_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::String(raw)) if raw.trim().is_empty() => Ok(0.0),
        Some(value) => value_as_f64(&value).map_err(D::Error::custom),
    }
}

/// Deserialise a JSON number or numeric string as an `i64`, eg/ an epoch timestamp.
pub fn de_i64_lenient<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match &value {
        Value::Number(number) => number
            .as_i64()
            .ok_or_else(|| D::Error::custom(format!("invalid integer: {number}"))),
        Value::String(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|error| D::Error::custom(format!("invalid integer {raw:?}: {error}"))),
        other => Err(D::Error::custom(format!("expected integer, found {other}"))),
    }
}

fn value_as_f64(value: &Value) -> Result<f64, String> {
    match value {
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| format!("invalid number: {number}")),
        Value::String(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|error| format!("invalid number {raw:?}: {error}")),
        other => Err(format!("expected number, found {other}")),
    }
}
