//! DNS Resolution Module
//!
//! Provides the pluggable resolution capability the cache sits in front of:
//! - System resolver (getaddrinfo via thread pool)
//! - Async hickory-dns resolver (DoH/DoT capable)
//! - Static hosts-map resolver for tests and local development
//! - Hostname-to-address override mechanism
//!
//! # Architecture
//!
//! The `Resolve` trait is the core abstraction that allows different
//! resolver implementations to be used interchangeably, including the
//! caching resolver in [`crate::cache`].
//!
//! # Example
//!
//! ```rust,ignore
//! use dnscache::dns::{Name, Resolve, HickoryResolver};
//!
//! let resolver = HickoryResolver::new();
//! for addr in resolver.resolve(Name::new("example.com")).await? {
//!     println!("Resolved: {}", addr);
//! }
//! ```

mod gai;
mod hickory;
mod resolve;

pub use gai::GaiResolver;
pub use hickory::HickoryResolver;
pub use resolve::{Addrs, DnsResolverWithOverrides, Name, Resolve, Resolving, StaticResolver};
