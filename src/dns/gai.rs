//! System DNS resolver using getaddrinfo.
//!
//! This resolver uses the operating system's native DNS resolution via
//! `getaddrinfo`, executed in a thread pool to avoid blocking the async runtime.
//!
//! # When to Use
//!
//! - When you need to respect system DNS configuration (/etc/resolv.conf, /etc/hosts)
//! - When DoH/DoT is not required
//! - As a fallback when hickory-dns is not available

use super::{Addrs, Name, Resolve, Resolving};
use crate::base::context::IoResultExt;
use crate::base::neterror::NetError;
use std::net::{IpAddr, ToSocketAddrs};

/// System DNS resolver using `getaddrinfo` in a thread pool.
///
/// This resolver wraps the standard library's `ToSocketAddrs` trait and
/// executes resolution in `tokio::task::spawn_blocking` to avoid blocking
/// the async runtime. Addresses are returned in resolver order with
/// duplicates removed.
#[derive(Clone, Debug, Default)]
pub struct GaiResolver;

impl GaiResolver {
    /// Creates a new `GaiResolver`.
    pub fn new() -> Self {
        Self
    }
}

impl Resolve for GaiResolver {
    fn resolve(&self, name: Name) -> Resolving {
        Box::pin(async move {
            // IP literals never need a lookup
            if let Some(addrs) = try_parse_ip(name.as_str()) {
                return Ok(addrs);
            }

            let host = name.as_str().to_string();
            let domain = host.clone();

            let result = tokio::task::spawn_blocking(move || {
                tracing::debug!(host = %host, "resolving via getaddrinfo");
                (host.as_str(), 0u16)
                    .to_socket_addrs()
                    .map(|iter| iter.map(|addr| addr.ip()).collect::<Vec<_>>())
            })
            .await;

            // Handle task join error (cancellation, panic)
            let ips = result
                .map_err(|e| {
                    tracing::error!(error = %e, "DNS resolution task failed");
                    NetError::NameResolutionFailed {
                        domain: domain.clone(),
                        reason: e.to_string(),
                    }
                })?
                .dns_context(&domain)
                .inspect_err(|e| {
                    tracing::debug!(domain = %domain, error = %e, "DNS resolution failed");
                })?;

            let addrs = dedup_ips(ips);
            if addrs.is_empty() {
                return Err(NetError::NameNotResolved { domain });
            }

            tracing::debug!(domain = %domain, count = addrs.len(), "DNS resolution complete");
            Ok(addrs)
        })
    }
}

/// Returns the host itself if it is an IPv4 or IPv6 literal.
fn try_parse_ip(host: &str) -> Option<Addrs> {
    let trimmed = host.trim_start_matches('[').trim_end_matches(']');
    trimmed
        .parse::<IpAddr>()
        .ok()
        .map(|ip| vec![ip.to_string()])
}

/// getaddrinfo reports one entry per socket type; keep the first of each IP.
fn dedup_ips(ips: Vec<IpAddr>) -> Addrs {
    let mut addrs: Addrs = Vec::with_capacity(ips.len());
    for ip in ips {
        let ip = ip.to_string();
        if !addrs.contains(&ip) {
            addrs.push(ip);
        }
    }
    addrs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn test_try_parse_ipv4() {
        assert_eq!(
            try_parse_ip("127.0.0.1"),
            Some(vec!["127.0.0.1".to_string()])
        );
    }

    #[test]
    fn test_try_parse_ipv6() {
        assert_eq!(try_parse_ip("[::1]"), Some(vec!["::1".to_string()]));
        assert_eq!(try_parse_ip("::1"), Some(vec!["::1".to_string()]));
    }

    #[test]
    fn test_try_parse_hostname() {
        assert!(try_parse_ip("example.com").is_none());
    }

    #[test]
    fn test_dedup_keeps_order() {
        let ips = vec![
            IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2)),
            IpAddr::V6(Ipv6Addr::LOCALHOST),
            IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2)),
            IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)),
        ];

        assert_eq!(dedup_ips(ips), vec!["10.0.0.2", "::1", "10.0.0.1"]);
    }

    #[tokio::test]
    async fn test_gai_resolver_ip_literal() {
        let resolver = GaiResolver::new();
        let addrs = resolver.resolve(Name::new("10.1.2.3")).await.unwrap();
        assert_eq!(addrs, vec!["10.1.2.3"]);
    }

    #[tokio::test]
    async fn test_gai_resolver_localhost() {
        let resolver = GaiResolver::new();
        let result = resolver.resolve(Name::new("localhost")).await;

        // localhost should always resolve
        assert!(result.is_ok());
        assert!(!result.unwrap().is_empty());
    }
}
