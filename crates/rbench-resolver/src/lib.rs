//! Module resolution engines for resolve-bench
//!
//! This crate provides the two engines the benchmark compares: a caching
//! asynchronous engine and a straight-through synchronous engine. Both
//! apply the same Node-style resolution rules and are exposed through one
//! uniform async adapter contract.

pub mod adapter;
pub mod cached;
pub mod direct;

// Re-export main types
pub use adapter::{CachedAdapter, DirectAdapter, ResolveAdapter};
pub use cached::{CacheConfig, CachedFileSystem, CachedResolver, PathKind};
pub use direct::DirectResolver;

use rbench_core::error::RbenchError;

/// Result type for resolver operations
pub type ResolverResult<T> = Result<T, RbenchError>;

/// Knobs shared by both engines
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveOptions {
    /// Extensions appended to extensionless file candidates, in probe order
    pub extensions: Vec<String>,

    /// Basename probed when a directory has no usable manifest entry
    pub index_name: String,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            extensions: vec![".js".to_string(), ".mjs".to_string(), ".json".to_string()],
            index_name: "index".to_string(),
        }
    }
}
