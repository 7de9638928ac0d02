//! Core DNS resolution types and traits.
//!
//! This module defines the `Resolve` trait and supporting types that form
//! the boundary between the cache and whatever actually performs lookups.

use crate::base::neterror::NetError;
use std::{borrow::Cow, collections::HashMap, fmt, future::Future, pin::Pin, sync::Arc};

/// A domain name to resolve into IP addresses.
///
/// This is a lightweight wrapper around a hostname string that provides
/// a type-safe way to pass domain names to resolvers.
#[derive(Clone, Hash, Eq, PartialEq)]
pub struct Name {
    host: Box<str>,
}

impl Name {
    /// Creates a new [`Name`] from any string-like type.
    #[inline]
    pub fn new(host: impl Into<Box<str>>) -> Self {
        Self { host: host.into() }
    }

    /// View the hostname as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.host
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Name::new(value)
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Name::new(value)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.host, f)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.host, f)
    }
}

/// Ordered list of resolved addresses, rendered as strings.
pub type Addrs = Vec<String>;

/// Alias for the `Future` type returned by a DNS resolver.
pub type Resolving = Pin<Box<dyn Future<Output = Result<Addrs, NetError>> + Send>>;

/// Trait for DNS resolution.
///
/// This is the outbound capability the cache sits in front of.
/// Implementations must be thread-safe.
///
/// # Design Notes
///
/// - Uses `&self` for concurrent resolution without mutable access.
/// - Returns boxed futures for trait object compatibility.
/// - A successful resolution should yield at least one address; failures
///   carry a resolution [`NetError`] such as `DnsServerFailed`.
pub trait Resolve: Send + Sync {
    /// Resolves a domain name to its addresses.
    fn resolve(&self, name: Name) -> Resolving;
}

/// Blanket implementation for Arc-wrapped resolvers.
impl<R: Resolve + ?Sized> Resolve for Arc<R> {
    fn resolve(&self, name: Name) -> Resolving {
        (**self).resolve(name)
    }
}

/// In-memory resolver backed by a hosts map.
///
/// Answers from a fixed hostname-to-addresses table, like a hosts file.
/// Hosts listed in the error table fail with the given DNS response code;
/// anything else fails with `NameNotResolved`. Useful for tests and
/// local development without a network.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    hosts: Arc<HashMap<String, Vec<String>>>,
    errors: Arc<HashMap<String, u16>>,
}

impl StaticResolver {
    /// Creates a resolver answering from `hosts`.
    pub fn new(hosts: HashMap<String, Vec<String>>) -> Self {
        Self {
            hosts: Arc::new(hosts),
            errors: Arc::new(HashMap::new()),
        }
    }

    /// Makes lookups for the given hosts fail with a DNS response code.
    pub fn with_errors(mut self, errors: HashMap<String, u16>) -> Self {
        self.errors = Arc::new(errors);
        self
    }

    /// Returns the number of hosts with addresses.
    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }
}

impl Resolve for StaticResolver {
    fn resolve(&self, name: Name) -> Resolving {
        let domain = name.as_str();
        let result = if let Some(rcode) = self.errors.get(domain) {
            Err(NetError::from_rcode(domain, *rcode))
        } else {
            match self.hosts.get(domain) {
                Some(addrs) if !addrs.is_empty() => Ok(addrs.clone()),
                _ => Err(NetError::NameNotResolved {
                    domain: domain.to_string(),
                }),
            }
        };
        Box::pin(std::future::ready(result))
    }
}

/// DNS resolver wrapper that supports hostname overrides.
///
/// This resolver first checks a map of hostname-to-address overrides before
/// falling back to the underlying resolver. Useful for:
/// - Testing without real DNS
/// - Forcing specific IPs for certain domains
/// - Local development with custom hostnames
///
/// # Example
///
/// ```rust,ignore
/// use dnscache::dns::{DnsResolverWithOverrides, HickoryResolver};
/// use std::collections::HashMap;
///
/// let mut overrides = HashMap::new();
/// overrides.insert("api.local".into(), vec!["127.0.0.1".to_string()]);
///
/// let resolver = DnsResolverWithOverrides::new(
///     Arc::new(HickoryResolver::new()),
///     overrides,
/// );
/// ```
pub struct DnsResolverWithOverrides {
    inner: Arc<dyn Resolve>,
    overrides: Arc<HashMap<Cow<'static, str>, Addrs>>,
}

impl DnsResolverWithOverrides {
    /// Creates a new resolver with the given overrides.
    ///
    /// # Arguments
    ///
    /// * `inner` - The fallback resolver for non-overridden hostnames.
    /// * `overrides` - Map of hostnames to their resolved addresses.
    pub fn new(inner: Arc<dyn Resolve>, overrides: HashMap<Cow<'static, str>, Addrs>) -> Self {
        Self {
            inner,
            overrides: Arc::new(overrides),
        }
    }

    /// Returns the number of configured overrides.
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }
}

impl Resolve for DnsResolverWithOverrides {
    fn resolve(&self, name: Name) -> Resolving {
        // Check overrides first
        if let Some(addrs) = self.overrides.get(name.as_str()) {
            return Box::pin(std::future::ready(Ok(addrs.clone())));
        }
        // Fall back to inner resolver
        self.inner.resolve(name)
    }
}

impl fmt::Debug for DnsResolverWithOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DnsResolverWithOverrides")
            .field("override_count", &self.overrides.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::neterror::RCODE_SERVER_FAILURE;

    #[test]
    fn test_name_from_str() {
        let name = Name::from("example.com");
        assert_eq!(name.as_str(), "example.com");
        assert_eq!(name.to_string(), "example.com");
    }

    #[test]
    fn test_name_from_string() {
        let domain = String::from("test.example.com");
        let name = Name::from(domain);
        assert_eq!(name.as_str(), "test.example.com");
    }

    #[test]
    fn test_name_equality() {
        let name1 = Name::new("example.com");
        let name2 = Name::new("example.com");
        let name3 = Name::new("other.com");

        assert_eq!(name1, name2);
        assert_ne!(name1, name3);
    }

    fn hosts() -> HashMap<String, Vec<String>> {
        let mut hosts = HashMap::new();
        hosts.insert(
            "orig-host.com.".to_string(),
            vec!["127.0.0.1".into(), "127.0.0.2".into()],
        );
        hosts
    }

    #[tokio::test]
    async fn test_static_resolver_hit() {
        let resolver = StaticResolver::new(hosts());
        let addrs = resolver.resolve(Name::new("orig-host.com.")).await.unwrap();

        assert_eq!(addrs, vec!["127.0.0.1", "127.0.0.2"]);
    }

    #[tokio::test]
    async fn test_static_resolver_unknown_host() {
        let resolver = StaticResolver::new(hosts());
        let err = resolver
            .resolve(Name::new("missing.com."))
            .await
            .unwrap_err();

        assert!(matches!(err, NetError::NameNotResolved { .. }));
    }

    #[tokio::test]
    async fn test_static_resolver_error_table() {
        let mut errors = HashMap::new();
        errors.insert("unknown.orig-host.com.".to_string(), RCODE_SERVER_FAILURE);
        let resolver = StaticResolver::new(hosts()).with_errors(errors);

        let err = resolver
            .resolve(Name::new("unknown.orig-host.com."))
            .await
            .unwrap_err();
        assert!(matches!(err, NetError::DnsServerFailed { .. }));
    }

    struct MockResolver {
        response: Addrs,
    }

    impl Resolve for MockResolver {
        fn resolve(&self, _name: Name) -> Resolving {
            let addrs = self.response.clone();
            Box::pin(async move { Ok(addrs) })
        }
    }

    #[tokio::test]
    async fn test_override_resolver_hit() {
        let mock = Arc::new(MockResolver {
            response: vec!["8.8.8.8".to_string()],
        });

        let mut overrides = HashMap::new();
        overrides.insert(
            Cow::Borrowed("override.local"),
            vec!["127.0.0.1".to_string()],
        );

        let resolver = DnsResolverWithOverrides::new(mock, overrides);
        let addrs = resolver.resolve(Name::new("override.local")).await.unwrap();

        assert_eq!(addrs, vec!["127.0.0.1"]);
    }

    #[tokio::test]
    async fn test_override_resolver_miss() {
        let mock = Arc::new(MockResolver {
            response: vec!["8.8.8.8".to_string()],
        });

        let resolver = DnsResolverWithOverrides::new(mock, HashMap::new());
        let addrs = resolver
            .resolve(Name::new("not-overridden.com"))
            .await
            .unwrap();

        assert_eq!(addrs, vec!["8.8.8.8"]);
    }
}
