//! Tunables for the scan engine.

use crate::error::{ConfigError, ConfigResult};
use std::time::Duration;
use tokio::sync::Semaphore;

/// Default number of connect attempts allowed in flight.
pub const DEFAULT_CONCURRENCY: usize = 200;
/// Largest concurrency limit the engine's semaphore can hold.
pub const MAX_CONCURRENCY: usize = Semaphore::MAX_PERMITS;
/// Default per-attempt connect deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(500);
/// Default deadline for the banner read after a successful connect.
pub const DEFAULT_BANNER_TIMEOUT: Duration = Duration::from_millis(500);

/// Immutable engine configuration, validated at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    concurrency: usize,
    timeout: Duration,
    banner_timeout: Duration,
}

impl ScanConfig {
    /// Create a configuration; both values must be non-zero and the
    /// concurrency limit must fit in a [`Semaphore`].
    pub fn new(concurrency: usize, timeout: Duration) -> ConfigResult<Self> {
        if concurrency == 0 {
            return Err(ConfigError::Invalid("concurrency limit must be positive".into()));
        }
        if concurrency > MAX_CONCURRENCY {
            return Err(ConfigError::Invalid(format!(
                "concurrency limit must be at most {MAX_CONCURRENCY}"
            )));
        }
        if timeout.is_zero() {
            return Err(ConfigError::Invalid("timeout must be positive".into()));
        }
        Ok(Self {
            concurrency,
            timeout,
            banner_timeout: DEFAULT_BANNER_TIMEOUT,
        })
    }

    /// Set the banner read deadline. It never exceeds the connect timeout.
    pub fn with_banner_timeout(mut self, banner_timeout: Duration) -> ConfigResult<Self> {
        if banner_timeout.is_zero() {
            return Err(ConfigError::Invalid("banner timeout must be positive".into()));
        }
        self.banner_timeout = banner_timeout;
        Ok(self)
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Effective banner deadline: `min(banner_timeout, timeout)`.
    pub fn banner_timeout(&self) -> Duration {
        self.banner_timeout.min(self.timeout)
    }

    /// Upper bound on the wall-clock time one work item may take.
    pub fn attempt_budget(&self) -> Duration {
        self.timeout + self.banner_timeout()
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout: DEFAULT_TIMEOUT,
            banner_timeout: DEFAULT_BANNER_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScanConfig::default();
        assert_eq!(config.concurrency(), 200);
        assert_eq!(config.timeout(), Duration::from_millis(500));
    }

    #[test]
    fn test_rejects_zero_values() {
        assert!(ScanConfig::new(0, DEFAULT_TIMEOUT).is_err());
        assert!(ScanConfig::new(10, Duration::ZERO).is_err());
        assert!(ScanConfig::default().with_banner_timeout(Duration::ZERO).is_err());
    }

    #[test]
    fn test_rejects_concurrency_above_semaphore_limit() {
        assert!(ScanConfig::new(usize::MAX, DEFAULT_TIMEOUT).is_err());
        assert!(ScanConfig::new(MAX_CONCURRENCY + 1, DEFAULT_TIMEOUT).is_err());

        let config = ScanConfig::new(MAX_CONCURRENCY, DEFAULT_TIMEOUT).unwrap();
        assert_eq!(config.concurrency(), MAX_CONCURRENCY);
    }

    #[test]
    fn test_banner_timeout_capped_by_connect_timeout() {
        let config = ScanConfig::new(10, Duration::from_millis(100))
            .unwrap()
            .with_banner_timeout(Duration::from_secs(5))
            .unwrap();
        assert_eq!(config.banner_timeout(), Duration::from_millis(100));
        assert_eq!(config.attempt_budget(), Duration::from_millis(200));
    }
}
