use crate::{clock::Clock, provider::SymbolProvider, symbol::Symbol};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::{sync::Arc, time::Duration};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Default freshness window of the symbol universe (6 hours).
pub const DEFAULT_SYMBOL_CACHE_TTL: Duration = Duration::from_secs(6 * 60 * 60);

/// Default number of immediate attempts made per provider during a refresh.
pub const DEFAULT_PROVIDER_ATTEMPTS: usize = 3;

/// [`SymbolCache`] configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolCacheConfig {
    pub ttl: Duration,
    pub attempts: usize,
}

impl Default for SymbolCacheConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_SYMBOL_CACHE_TTL,
            attempts: DEFAULT_PROVIDER_ATTEMPTS,
        }
    }
}

impl SymbolCacheConfig {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts;
        self
    }
}

/// Cached symbol universe and the time it was last successfully refreshed.
///
/// `symbols` and `last_refresh` are only ever replaced together.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct SymbolSnapshot {
    pub symbols: Vec<Symbol>,
    pub last_refresh: Option<DateTime<Utc>>,
}

impl SymbolSnapshot {
    fn is_fresh(&self, now: DateTime<Utc>, ttl: TimeDelta) -> bool {
        match self.last_refresh {
            Some(last_refresh) => !self.symbols.is_empty() && now - last_refresh < ttl,
            None => false,
        }
    }
}

/// TTL cache of the USDT perpetual universe backed by an ordered list of
/// [`SymbolProvider`]s.
///
/// The lock is held for the whole refresh attempt, so concurrent callers arriving while a
/// refresh is in flight wait for it and are then served from the refreshed cache.
#[derive(Debug)]
pub struct SymbolCache {
    providers: Vec<Arc<dyn SymbolProvider>>,
    clock: Arc<dyn Clock>,
    config: SymbolCacheConfig,
    state: Mutex<SymbolSnapshot>,
}

impl SymbolCache {
    /// Construct an empty [`SymbolCache`]. `providers` are consulted in the provided order.
    pub fn new(
        providers: Vec<Arc<dyn SymbolProvider>>,
        clock: Arc<dyn Clock>,
        config: SymbolCacheConfig,
    ) -> Self {
        Self {
            providers,
            clock,
            config,
            state: Mutex::new(SymbolSnapshot::default()),
        }
    }

    /// Resolve the current symbol universe. Never fails, worst case returns an empty sequence.
    ///
    /// Fresh cache contents are served without any network call. Otherwise each provider is
    /// tried in order, up to `attempts` times, until one yields a nonempty sequence. If every
    /// provider comes back empty the previous contents are returned and `last_refresh` is left
    /// untouched, so the next call retries immediately.
    pub async fn get_symbols(&self) -> Vec<Symbol> {
        let mut state = self.state.lock().await;

        let now = self.clock.now();
        let ttl = TimeDelta::from_std(self.config.ttl).unwrap_or(TimeDelta::MAX);
        if state.is_fresh(now, ttl) {
            return state.symbols.clone();
        }

        for provider in &self.providers {
            for attempt in 1..=self.config.attempts.max(1) {
                let symbols = provider.fetch().await;
                if !symbols.is_empty() {
                    info!(
                        provider = provider.name(),
                        attempt,
                        count = symbols.len(),
                        "refreshed symbol cache"
                    );
                    *state = SymbolSnapshot {
                        symbols: symbols.clone(),
                        last_refresh: Some(now),
                    };
                    return symbols;
                }

                debug!(
                    provider = provider.name(),
                    attempt, "symbol provider returned no symbols"
                );
            }
        }

        warn!(
            cached = state.symbols.len(),
            last_refresh = ?state.last_refresh,
            "all symbol providers exhausted, serving previous symbols"
        );
        state.symbols.clone()
    }

    /// Current cache contents, without triggering a refresh.
    pub async fn snapshot(&self) -> SymbolSnapshot {
        self.state.lock().await.clone()
    }
}
