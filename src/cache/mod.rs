//! TTL cache for DNS resolution results.
//!
//! - [`DnsCacheStorage`]: hostname-to-[`Record`] map with lazy expiry on read
//! - sweeper: background task that deletes expired records
//! - [`CachedResolver`]: check the cache, else resolve and populate it
//!
//! Expiry is enforced twice: every read skips expired records, and the
//! sweeper physically removes them each check interval so the map cannot
//! grow without bound. Disabling the sweeper keeps expired records around
//! for inspection through [`DnsCacheStorage::items`].

pub mod config;
mod record;
mod resolver;
mod storage;
mod sweeper;

pub use config::{DnsCacheConfig, DnsCacheSettings, DEFAULT_CHECK_INTERVAL, DEFAULT_TTL};
pub use record::Record;
pub use resolver::CachedResolver;
pub use storage::DnsCacheStorage;
