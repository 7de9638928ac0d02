//! # dnscache
//!
//! A time-to-live cache for DNS resolution results.
//!
//! `dnscache` sits in front of a hostname-to-address lookup so a
//! network-facing service does not pay a resolver round-trip for every
//! connection. Successful lookups are cached for a fixed TTL; failures are
//! handed back untouched and never cached.
//!
//! ## Features
//!
//! - **Lazy expiry**: reads never return a record past its TTL
//! - **Background sweeper**: expired records are removed every check interval,
//!   or kept for inspection when the sweeper is disabled
//! - **Pluggable resolution**: system (getaddrinfo), hickory-dns, static
//!   hosts map, or any custom [`dns::Resolve`] implementation
//! - **Concurrent access**: sharded storage, no lock held across resolution
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dnscache::cache::{CachedResolver, DnsCacheConfig};
//! use dnscache::dns::GaiResolver;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = DnsCacheConfig::new(Duration::from_secs(60), Some(Duration::from_secs(10)));
//!     let resolver = CachedResolver::new(Arc::new(GaiResolver::new()), config).unwrap();
//!
//!     let addrs = resolver.fetch_item("example.com").await.unwrap();
//!     println!("Resolved: {:?}", addrs);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Core types and error definitions
//! - [`cache`] - Record storage, sweeper, and the caching resolver
//! - [`dns`] - Resolution capability and resolver implementations

pub mod base;
pub mod cache;
pub mod dns;

pub use base::neterror::NetError;
pub use cache::{CachedResolver, DnsCacheConfig, DnsCacheSettings, DnsCacheStorage, Record};
