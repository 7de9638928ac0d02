//! Cached DNS record.

use crate::base::neterror::NetError;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Addresses for one hostname plus the instant they stop being served.
///
/// Records are immutable once created. Writing the same hostname again
/// replaces the record instead of updating it. Equality compares the
/// address sets and ignores order and expiry, since resolvers do not
/// return addresses in a stable order.
#[derive(Debug, Clone)]
pub struct Record {
    addresses: Arc<[String]>,
    expires_at: Instant,
}

impl Record {
    /// Create a record that expires `ttl` from now.
    ///
    /// Fails with `InvalidCacheTtl` if the deadline does not fit in an `Instant`.
    pub(crate) fn new(addresses: Vec<String>, ttl: Duration) -> Result<Self, NetError> {
        let expires_at = Instant::now()
            .checked_add(ttl)
            .ok_or(NetError::InvalidCacheTtl)?;
        Ok(Self {
            addresses: addresses.into(),
            expires_at,
        })
    }

    /// Resolved addresses in the order they were stored.
    pub fn addresses(&self) -> &[String] {
        &self.addresses
    }

    /// Absolute instant this record expires.
    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    /// Check if this record has expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// A record is expired from `expires_at` onward.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at <= now
    }

    /// Time left before expiry, zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }

    /// Order-insensitive comparison against a candidate address list.
    pub fn is_equal_to<S: AsRef<str>>(&self, addresses: &[S]) -> bool {
        let ours: HashSet<&str> = self.addresses.iter().map(String::as_str).collect();
        let theirs: HashSet<&str> = addresses.iter().map(AsRef::as_ref).collect();
        ours == theirs
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal_to(other.addresses())
    }
}

impl Eq for Record {}
