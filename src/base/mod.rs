//! Base types and error handling.
//!
//! Provides foundational types shared by the resolvers and the cache:
//! - [`NetError`](neterror::NetError): error codes for resolution and cache failures
//! - [`IoResultExt`](context::IoResultExt): IO error context helpers

pub mod context;
pub mod neterror;
