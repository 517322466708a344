//! Database settings, read from the environment.

use crate::error::{StoreError, StoreResult};
use std::time::Duration;

const DEFAULT_MAX_POOL_SIZE: usize = 16;

/// Connection and instrumentation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub database_url: String,
    pub max_pool_size: usize,
    /// Statements slower than this are logged at `WARN`. `None` disables the check.
    pub slow_query_threshold: Option<Duration>,
}

impl DbConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_pool_size: DEFAULT_MAX_POOL_SIZE,
            slow_query_threshold: None,
        }
    }

    pub fn with_max_pool_size(mut self, size: usize) -> Self {
        self.max_pool_size = size;
        self
    }

    pub fn with_slow_query_threshold(mut self, threshold: Duration) -> Self {
        self.slow_query_threshold = Some(threshold);
        self
    }

    /// Load `.env` if present, then read:
    ///
    /// - `DATABASE_URL` (required)
    /// - `DB_POOL_MAX_SIZE` (default 16)
    /// - `DB_SLOW_QUERY_MS` (unset disables slow-query warnings)
    pub fn from_env() -> StoreResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> StoreResult<Self> {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| StoreError::Config("DATABASE_URL is not set".to_string()))?;

        let mut config = Self::new(database_url);
        if let Some(size) = lookup("DB_POOL_MAX_SIZE") {
            config.max_pool_size = parse_var("DB_POOL_MAX_SIZE", &size)?;
            if config.max_pool_size == 0 {
                return Err(StoreError::Config(
                    "DB_POOL_MAX_SIZE must be at least 1".to_string(),
                ));
            }
        }
        if let Some(ms) = lookup("DB_SLOW_QUERY_MS") {
            config.slow_query_threshold = Some(Duration::from_millis(parse_var(
                "DB_SLOW_QUERY_MS",
                &ms,
            )?));
        }
        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> StoreResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| StoreError::Config(format!("{key} must be a non-negative integer, got '{value}'")))
}
