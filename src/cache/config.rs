//! DNS cache configuration.
//!
//! [`DnsCacheConfig`] is what the storage is built from. [`DnsCacheSettings`]
//! is the serialized form a service keeps in its config file, with integer
//! seconds and a non-positive check interval meaning "never sweep".

use crate::base::neterror::NetError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;

/// Default record lifetime.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Default period between sweeps of expired records.
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// Configuration options for the DNS cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsCacheConfig {
    /// Lifetime of every record from the moment it is written.
    pub ttl: Duration,

    /// Sweeper period. `None` or zero disables the sweeper; expired records
    /// then stay in storage until cleared.
    pub check_interval: Option<Duration>,

    /// Upper bound on a single resolution (None = resolver's own timeout).
    pub resolve_timeout: Option<Duration>,
}

impl Default for DnsCacheConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            check_interval: Some(DEFAULT_CHECK_INTERVAL),
            resolve_timeout: None,
        }
    }
}

impl DnsCacheConfig {
    /// Create a config with the given TTL and sweeper period.
    pub fn new(ttl: Duration, check_interval: Option<Duration>) -> Self {
        Self {
            ttl,
            check_interval,
            resolve_timeout: None,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_check_interval(mut self, interval: Duration) -> Self {
        self.check_interval = Some(interval);
        self
    }

    /// Keep expired records around until the cache is cleared.
    pub fn without_sweeper(mut self) -> Self {
        self.check_interval = None;
        self
    }

    pub fn with_resolve_timeout(mut self, timeout: Duration) -> Self {
        self.resolve_timeout = Some(timeout);
        self
    }

    /// The sweeper period, if sweeping is enabled.
    pub fn sweep_interval(&self) -> Option<Duration> {
        self.check_interval.filter(|interval| !interval.is_zero())
    }

    /// Reject a zero TTL, and any TTL or sweep period too large to turn
    /// into a deadline.
    pub fn validate(&self) -> Result<(), NetError> {
        let now = Instant::now();
        if self.ttl.is_zero() || now.checked_add(self.ttl).is_none() {
            return Err(NetError::InvalidCacheTtl);
        }
        if let Some(interval) = self.sweep_interval() {
            if now.checked_add(interval).is_none() {
                return Err(NetError::InvalidCheckInterval);
            }
        }
        Ok(())
    }
}

/// Operator-facing DNS cache settings.
///
/// ```json
/// { "enabled": true, "ttl": 3600, "check_interval": -1 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DnsCacheSettings {
    /// Whether lookups go through the cache at all.
    pub enabled: bool,
    /// Record lifetime in seconds. Must be positive.
    pub ttl: i64,
    /// Sweeper period in seconds; zero or negative disables the sweeper.
    pub check_interval: i64,
    /// Optional per-resolution timeout in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolve_timeout_ms: Option<u64>,
}

impl Default for DnsCacheSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            ttl: DEFAULT_TTL.as_secs() as i64,
            check_interval: DEFAULT_CHECK_INTERVAL.as_secs() as i64,
            resolve_timeout_ms: None,
        }
    }
}

impl DnsCacheSettings {
    /// Parse settings from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, NetError> {
        serde_json::from_str(json).map_err(|e| NetError::InvalidSettings {
            reason: e.to_string(),
        })
    }

    /// Convert to a validated [`DnsCacheConfig`].
    pub fn into_config(self) -> Result<DnsCacheConfig, NetError> {
        if self.ttl <= 0 {
            return Err(NetError::InvalidCacheTtl);
        }

        let check_interval = (self.check_interval > 0)
            .then(|| Duration::from_secs(self.check_interval as u64));

        let config = DnsCacheConfig {
            ttl: Duration::from_secs(self.ttl as u64),
            check_interval,
            resolve_timeout: self.resolve_timeout_ms.map(Duration::from_millis),
        };
        config.validate()?;
        Ok(config)
    }
}
