//! Configuration parsing for resolve-bench
//!
//! This crate handles parsing of package.json manifests (consumed by the
//! resolution engines) and the optional rbench.toml benchmark settings,
//! providing a unified configuration interface for the workspace.

pub mod json;
pub mod settings;

// Re-export main types
pub use json::PackageJson;
pub use settings::BenchSettings;

use rbench_core::error::RbenchError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, RbenchError>;
