use perpcorr_data::{
    analysis::{DEFAULT_CONCURRENCY, DEFAULT_MAX_RESULTS},
    cache::{DEFAULT_PROVIDER_ATTEMPTS, DEFAULT_SYMBOL_CACHE_TTL},
    candle::CANDLE_LIMIT_14D_HOURLY,
    exchange::mexc::BASE_URL_MEXC_CONTRACT,
    market::LiquidityFilter,
    provider::{coingecko::BASE_URL_COINGECKO, coinmarketcap::BASE_URL_COINMARKETCAP},
    rest::DEFAULT_HTTP_TIMEOUT,
};
use std::{env, fmt, time::Duration};

/// Server configuration derived from environment variables, read once at startup.
#[derive(Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,

    // Credentials, never logged
    pub mexc_api_key_access: Option<String>,
    pub mexc_api_key_secret: Option<String>,
    pub coingecko_api_key: Option<String>,
    pub coinmarketcap_api_key: Option<String>,

    // Upstream base URLs
    pub mexc_contract_url: String,
    pub coingecko_url: String,
    pub coinmarketcap_url: String,

    pub http_timeout: Duration,
    pub symbol_cache_ttl: Duration,
    /// Attempts per symbol provider and per candle fetch.
    pub fetch_attempts: usize,
    pub liquidity: LiquidityFilter,
    pub max_results: usize,
    pub candle_limit: usize,
    pub analyze_concurrency: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup, falling back to defaults for absent or
    /// unparsable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars: Lookup<'_> = &lookup;
        let liquidity = LiquidityFilter::default();

        Self {
            bind: env_str(vars, "BIND", "0.0.0.0"),
            port: env_u16(vars, "PORT", 8000),
            mexc_api_key_access: env_opt(vars, "MEXC_API_KEY_ACCESS"),
            mexc_api_key_secret: env_opt(vars, "MEXC_API_KEY_SECRET"),
            coingecko_api_key: env_opt(vars, "COINGECKO_API_KEY"),
            coinmarketcap_api_key: env_opt(vars, "COINMARKETCAP_API_KEY"),
            mexc_contract_url: env_str(vars, "MEXC_CONTRACT_URL", BASE_URL_MEXC_CONTRACT),
            coingecko_url: env_str(vars, "COINGECKO_URL", BASE_URL_COINGECKO),
            coinmarketcap_url: env_str(vars, "COINMARKETCAP_URL", BASE_URL_COINMARKETCAP),
            http_timeout: Duration::from_secs(env_u64(
                vars,
                "HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT.as_secs(),
            )),
            symbol_cache_ttl: Duration::from_secs(env_u64(
                vars,
                "SYMBOL_CACHE_TTL_SECS",
                DEFAULT_SYMBOL_CACHE_TTL.as_secs(),
            )),
            fetch_attempts: env_usize(vars, "FETCH_ATTEMPTS", DEFAULT_PROVIDER_ATTEMPTS),
            liquidity: LiquidityFilter {
                min_market_cap: env_f64(vars, "MIN_MARKET_CAP", liquidity.min_market_cap),
                min_volume_24h: env_f64(vars, "MIN_VOLUME_24H", liquidity.min_volume_24h),
            },
            max_results: env_usize(vars, "MAX_RESULTS", DEFAULT_MAX_RESULTS),
            candle_limit: env_usize(vars, "CANDLE_LIMIT", CANDLE_LIMIT_14D_HOURLY),
            analyze_concurrency: env_usize(vars, "ANALYZE_CONCURRENCY", DEFAULT_CONCURRENCY),
        }
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(secret: &Option<String>) -> &'static str {
            if secret.is_some() { "<redacted>" } else { "<unset>" }
        }

        f.debug_struct("ServerConfig")
            .field("bind", &self.bind)
            .field("port", &self.port)
            .field("mexc_api_key_access", &redact(&self.mexc_api_key_access))
            .field("mexc_api_key_secret", &redact(&self.mexc_api_key_secret))
            .field("coingecko_api_key", &redact(&self.coingecko_api_key))
            .field("coinmarketcap_api_key", &redact(&self.coinmarketcap_api_key))
            .field("mexc_contract_url", &self.mexc_contract_url)
            .field("coingecko_url", &self.coingecko_url)
            .field("coinmarketcap_url", &self.coinmarketcap_url)
            .field("http_timeout", &self.http_timeout)
            .field("symbol_cache_ttl", &self.symbol_cache_ttl)
            .field("fetch_attempts", &self.fetch_attempts)
            .field("liquidity", &self.liquidity)
            .field("max_results", &self.max_results)
            .field("candle_limit", &self.candle_limit)
            .field("analyze_concurrency", &self.analyze_concurrency)
            .finish()
    }
}

/// Environment variable lookup, `std::env::var` outside of tests.
type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Trimmed, nonempty value of `name`.
fn env_opt(vars: Lookup<'_>, name: &str) -> Option<String> {
    vars(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn env_str(vars: Lookup<'_>, name: &str, default: &str) -> String {
    env_opt(vars, name).unwrap_or_else(|| default.to_string())
}

fn env_u16(vars: Lookup<'_>, name: &str, default: u16) -> u16 {
    env_opt(vars, name)
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn env_u64(vars: Lookup<'_>, name: &str, default: u64) -> u64 {
    env_opt(vars, name)
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn env_usize(vars: Lookup<'_>, name: &str, default: usize) -> usize {
    env_opt(vars, name)
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn env_f64(vars: Lookup<'_>, name: &str, default: f64) -> f64 {
    env_opt(vars, name)
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
