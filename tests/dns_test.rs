//! DNS Module Tests
//!
//! Covers:
//! - `Name` struct
//! - `DnsResolverWithOverrides` using a MockResolver
//! - `StaticResolver` hosts and error tables
//! - `GaiResolver` (Basic System Resolver)

use dnscache::base::neterror::{NetError, RCODE_SERVER_FAILURE};
use dnscache::dns::{
    Addrs, DnsResolverWithOverrides, GaiResolver, Name, Resolve, Resolving, StaticResolver,
};

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

struct MockResolver {
    response: Addrs,
}

impl Resolve for MockResolver {
    fn resolve(&self, _name: Name) -> Resolving {
        let addrs = self.response.clone();
        Box::pin(async move { Ok(addrs) })
    }
}

#[test]
fn test_name_api() {
    let name = Name::new("example.com");
    assert_eq!(name.as_str(), "example.com");
    assert_eq!(name.to_string(), "example.com");
}

#[tokio::test]
async fn test_dns_overrides() {
    let mock = Arc::new(MockResolver {
        response: vec!["8.8.8.8".to_string()],
    });

    let mut overrides = HashMap::new();
    overrides.insert(
        Cow::Borrowed("local.override"),
        vec!["127.0.0.1".to_string()],
    );

    let resolver = DnsResolverWithOverrides::new(mock, overrides);
    assert_eq!(resolver.override_count(), 1);

    // Test override hit
    let addrs = resolver.resolve(Name::new("local.override")).await.unwrap();
    assert_eq!(addrs, vec!["127.0.0.1"]);

    // Test passthrough (miss)
    let addrs = resolver.resolve(Name::new("other.com")).await.unwrap();
    assert_eq!(addrs, vec!["8.8.8.8"]);
}

#[tokio::test]
async fn test_static_resolver_hosts_file() {
    let mut hosts = HashMap::new();
    hosts.insert(
        "orig-host2.com.".to_string(),
        vec![
            "10.0.2.0".to_string(),
            "10.0.2.1".to_string(),
            "10.0.2.2".to_string(),
        ],
    );
    let mut errors = HashMap::new();
    errors.insert("unknown.orig-host.com.".to_string(), RCODE_SERVER_FAILURE);

    let resolver = StaticResolver::new(hosts).with_errors(errors);
    assert_eq!(resolver.host_count(), 1);

    let addrs = resolver
        .resolve(Name::new("orig-host2.com."))
        .await
        .unwrap();
    assert_eq!(addrs, vec!["10.0.2.0", "10.0.2.1", "10.0.2.2"]);

    let err = resolver
        .resolve(Name::new("unknown.orig-host.com."))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        NetError::DnsServerFailed {
            domain: "unknown.orig-host.com.".into()
        }
    );
    assert!(err.is_resolution_failure());
}

#[tokio::test]
async fn test_gai_resolver_ip_literal() {
    let resolver = GaiResolver::new();

    // IP literals never reach the system resolver
    let addrs = resolver.resolve(Name::new("127.0.0.1")).await.unwrap();
    assert_eq!(addrs, vec!["127.0.0.1"]);

    let addrs = resolver.resolve(Name::new("::1")).await.unwrap();
    assert_eq!(addrs, vec!["::1"]);
}
