//! Hostname-to-record storage with lazy and background expiry.
//!
//! Reads filter out expired records on the fly; the optional [`Sweeper`]
//! physically removes them every check interval. With the sweeper off,
//! expired records stay in the map and remain visible through
//! [`DnsCacheStorage::items`] with `include_expired = true`.

use super::config::DnsCacheConfig;
use super::record::Record;
use super::sweeper::{self, Sweeper};
use crate::base::neterror::NetError;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tokio::time::Instant;

/// Thread-safe DNS record store.
///
/// Entries are sharded through a `DashMap`, so readers and writers on
/// different hosts rarely contend. Writers additionally share a `closed`
/// gate that [`clear`](Self::clear) takes exclusively; once `clear`
/// returns, no earlier write can land and every later write fails with
/// [`NetError::CacheClosed`].
pub struct DnsCacheStorage {
    entries: Arc<DashMap<String, Record>>,
    closed: RwLock<bool>,
    sweeper: Option<Sweeper>,
    config: DnsCacheConfig,
}

impl DnsCacheStorage {
    /// Create a storage with the given TTL and sweeper period.
    ///
    /// A `check_interval` of `None` or zero disables the sweeper. Starting
    /// the sweeper requires a tokio runtime.
    pub fn new(ttl: Duration, check_interval: Option<Duration>) -> Result<Self, NetError> {
        Self::with_config(DnsCacheConfig::new(ttl, check_interval))
    }

    /// Create a storage from a full configuration.
    pub fn with_config(config: DnsCacheConfig) -> Result<Self, NetError> {
        config.validate()?;

        let entries = Arc::new(DashMap::new());
        let sweeper = match config.sweep_interval() {
            Some(interval) => Some(Sweeper::spawn(Arc::downgrade(&entries), interval)?),
            None => {
                tracing::debug!("DNS cache sweeper disabled");
                None
            }
        };

        Ok(Self {
            entries,
            closed: RwLock::new(false),
            sweeper,
            config,
        })
    }

    /// Lookup the record for `host`, treating expired records as absent.
    ///
    /// The expiry check does not depend on the sweeper, which may not have
    /// run yet or may be disabled.
    pub fn get(&self, host: &str) -> Option<Record> {
        let record = self.entries.get(host)?;
        if record.is_expired() {
            return None;
        }
        Some(record.clone())
    }

    /// Insert or replace the record for `host`, expiring one TTL from now.
    ///
    /// No resolution happens here. Fails on an empty host, an empty address
    /// list, or a cleared storage.
    pub fn set<I, S>(&self, host: &str, addresses: I) -> Result<Record, NetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if host.is_empty() {
            return Err(NetError::InvalidHostName);
        }

        let addresses: Vec<String> = addresses.into_iter().map(Into::into).collect();
        if addresses.is_empty() {
            return Err(NetError::EmptyAddressList {
                domain: host.to_string(),
            });
        }

        let closed = self.closed.read().unwrap_or_else(PoisonError::into_inner);
        if *closed {
            return Err(NetError::CacheClosed);
        }

        let record = Record::new(addresses, self.config.ttl)?;
        tracing::debug!(host = %host, count = record.addresses().len(), "caching DNS record");
        self.entries.insert(host.to_string(), record.clone());
        Ok(record)
    }

    /// Remove the record for `host`, expired or not.
    pub fn remove(&self, host: &str) -> Option<Record> {
        self.entries.remove(host).map(|(_, record)| record)
    }

    /// Snapshot of the stored records.
    ///
    /// With `include_expired` false, expired records are left out of the
    /// snapshot but not deleted. With it true, every stored record is
    /// returned as-is, which is how expired records are inspected when the
    /// sweeper is disabled.
    pub fn items(&self, include_expired: bool) -> HashMap<String, Record> {
        let now = Instant::now();
        self.entries
            .iter()
            .filter(|entry| include_expired || !entry.value().is_expired_at(now))
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    /// Delete every record expired at this moment.
    ///
    /// Same pass the sweeper runs on each tick; useful when the sweeper is
    /// disabled. Returns the number of records removed.
    pub fn purge_expired(&self) -> usize {
        sweeper::purge_expired(&self.entries, Instant::now())
    }

    /// Remove all records and stop the sweeper.
    ///
    /// The storage is closed afterwards: reads see nothing and writes fail
    /// with [`NetError::CacheClosed`]. Calling it again is a no-op.
    pub fn clear(&self) {
        let mut closed = self.closed.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(sweeper) = &self.sweeper {
            sweeper.stop();
        }
        self.entries.clear();
        if !*closed {
            tracing::debug!("DNS cache cleared");
        }
        *closed = true;
    }

    /// Check if [`clear`](Self::clear) has been called.
    pub fn is_closed(&self) -> bool {
        *self.closed.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of stored records, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if storage holds no records at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lifetime given to each record.
    pub fn ttl(&self) -> Duration {
        self.config.ttl
    }

    pub fn config(&self) -> &DnsCacheConfig {
        &self.config
    }

    pub fn is_sweeper_running(&self) -> bool {
        self.sweeper.as_ref().is_some_and(Sweeper::is_running)
    }
}

impl std::fmt::Debug for DnsCacheStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DnsCacheStorage")
            .field("ttl", &self.config.ttl)
            .field(
                "check_interval",
                &self.sweeper.as_ref().map(Sweeper::interval),
            )
            .field("len", &self.entries.len())
            .field("closed", &self.is_closed())
            .finish()
    }
}
