//! Runtime knobs for the scoring engine, read from the environment.

use std::env;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_WRITE_DEADLINE_MS: u64 = 5_000;
pub const DEFAULT_FEED_CAPACITY: usize = 64;
pub const DEFAULT_BILLING_TIMEOUT_MS: u64 = 3_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Best-effort bound on sheet creation and first writes of empty cells.
    /// `None` waits indefinitely.
    pub write_deadline: Option<Duration>,
    /// Buffered snapshots per sheet before slow subscribers start lagging.
    pub feed_capacity: usize,
    pub billing_url: Option<String>,
    pub billing_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            write_deadline: Some(Duration::from_millis(DEFAULT_WRITE_DEADLINE_MS)),
            feed_capacity: DEFAULT_FEED_CAPACITY,
            billing_url: None,
            billing_timeout: Duration::from_millis(DEFAULT_BILLING_TIMEOUT_MS),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let deadline_ms: u64 = parse_var("KNIFFEL_WRITE_DEADLINE_MS", DEFAULT_WRITE_DEADLINE_MS)?;
        let feed_capacity: usize = parse_var("KNIFFEL_FEED_CAPACITY", DEFAULT_FEED_CAPACITY)?;
        if feed_capacity == 0 {
            return Err(AppError::config("KNIFFEL_FEED_CAPACITY must be at least 1"));
        }
        let billing_timeout_ms: u64 =
            parse_var("KNIFFEL_BILLING_TIMEOUT_MS", DEFAULT_BILLING_TIMEOUT_MS)?;

        let billing_url = env::var("KNIFFEL_BILLING_URL")
            .ok()
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty());

        Ok(Self {
            write_deadline: (deadline_ms > 0).then(|| Duration::from_millis(deadline_ms)),
            feed_capacity,
            billing_url,
            billing_timeout: Duration::from_millis(billing_timeout_ms),
        })
    }

    pub fn with_write_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.write_deadline = deadline;
        self
    }

    pub fn with_feed_capacity(mut self, capacity: usize) -> Self {
        self.feed_capacity = capacity.max(1);
        self
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw.trim().parse::<T>().map_err(|_| {
            AppError::config(format!("Environment variable '{name}' has invalid value '{raw}'"))
        }),
        _ => Ok(default),
    }
}
