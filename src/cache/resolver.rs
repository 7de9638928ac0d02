//! Caching front for a resolution capability.

use super::config::{DnsCacheConfig, DnsCacheSettings};
use super::storage::DnsCacheStorage;
use crate::base::neterror::NetError;
use crate::dns::{Addrs, Name, Resolve, Resolving};
use futures::FutureExt;
use std::sync::Arc;
use std::time::Duration;

/// Resolver that answers from a [`DnsCacheStorage`] and falls back to an
/// inner resolver on a miss.
///
/// Only successful resolutions are cached. A failure is returned to the
/// caller untouched and the next lookup for the same host resolves again.
/// Concurrent misses for one host each resolve independently; the last
/// write wins.
///
/// # Example
///
/// ```rust,ignore
/// use dnscache::cache::{CachedResolver, DnsCacheConfig};
/// use dnscache::dns::HickoryResolver;
/// use std::sync::Arc;
///
/// let inner = Arc::new(HickoryResolver::new());
/// let resolver = CachedResolver::new(inner, DnsCacheConfig::default())?;
/// let addrs = resolver.fetch_item("example.com").await?;
/// ```
#[derive(Clone)]
pub struct CachedResolver {
    storage: Arc<DnsCacheStorage>,
    inner: Arc<dyn Resolve>,
    resolve_timeout: Option<Duration>,
}

impl CachedResolver {
    /// Create a cached resolver with its own storage.
    pub fn new(inner: Arc<dyn Resolve>, config: DnsCacheConfig) -> Result<Self, NetError> {
        let resolve_timeout = config.resolve_timeout;
        let storage = Arc::new(DnsCacheStorage::with_config(config)?);
        Ok(Self {
            storage,
            inner,
            resolve_timeout,
        })
    }

    /// Create a cached resolver on top of an existing storage.
    pub fn with_storage(inner: Arc<dyn Resolve>, storage: Arc<DnsCacheStorage>) -> Self {
        let resolve_timeout = storage.config().resolve_timeout;
        Self {
            storage,
            inner,
            resolve_timeout,
        }
    }

    /// Build the resolver a service should use for the given settings.
    ///
    /// Returns `inner` unchanged when the cache is disabled.
    pub fn from_settings(
        settings: DnsCacheSettings,
        inner: Arc<dyn Resolve>,
    ) -> Result<Arc<dyn Resolve>, NetError> {
        if !settings.enabled {
            tracing::debug!("DNS cache disabled, using resolver directly");
            return Ok(inner);
        }
        let config = settings.into_config()?;
        Ok(Arc::new(Self::new(inner, config)?))
    }

    /// The backing storage.
    pub fn storage(&self) -> &Arc<DnsCacheStorage> {
        &self.storage
    }

    /// Return cached addresses for `host`, resolving and caching on a miss.
    pub async fn fetch_item(&self, host: &str) -> Result<Addrs, NetError> {
        if host.is_empty() {
            return Err(NetError::InvalidHostName);
        }
        if self.storage.is_closed() {
            return Err(NetError::CacheClosed);
        }

        if let Some(record) = self.storage.get(host) {
            tracing::trace!(host = %host, "DNS cache hit");
            return Ok(record.addresses().to_vec());
        }

        tracing::debug!(host = %host, "DNS cache miss");
        let addrs = self.resolve_uncached(host).await?;
        if addrs.is_empty() {
            return Err(NetError::NameNotResolved {
                domain: host.to_string(),
            });
        }

        self.storage.set(host, addrs.iter().cloned())?;
        Ok(addrs)
    }

    async fn resolve_uncached(&self, host: &str) -> Result<Addrs, NetError> {
        let resolving = self.inner.resolve(Name::new(host));
        match self.resolve_timeout {
            Some(timeout) => tokio::time::timeout(timeout, resolving)
                .await
                .map_err(|_| NetError::DnsTimedOut {
                    domain: host.to_string(),
                })?,
            None => resolving.await,
        }
    }
}

impl Resolve for CachedResolver {
    fn resolve(&self, name: Name) -> Resolving {
        let resolver = self.clone();
        async move { resolver.fetch_item(name.as_str()).await }.boxed()
    }
}

impl std::fmt::Debug for CachedResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedResolver")
            .field("storage", &self.storage)
            .field("resolve_timeout", &self.resolve_timeout)
            .finish_non_exhaustive()
    }
}
