//! Error types and result aliases for resolve-bench operations.
//!
//! Provides a unified error type that covers all error conditions across
//! the workspace with actionable error messages.

use thiserror::Error;

/// Unified error type for all resolve-bench operations
#[derive(Error, Debug)]
pub enum RbenchError {
    // Config errors
    #[error("Failed to parse rbench.toml: {message}")]
    TomlParse { message: String },

    #[error("Failed to parse {path}: {message}")]
    JsonParse { path: String, message: String },

    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    // Resolution errors
    #[error("Invalid module specifier '{request}': {reason}")]
    InvalidSpecifier { request: String, reason: String },

    #[error("Module not found: '{specifier}' from {base}")]
    ModuleNotFound { specifier: String, base: String },

    #[error("Path is not valid UTF-8: {}", path.display())]
    NonUtf8Path { path: std::path::PathBuf },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for resolve-bench operations
pub type RbenchResult<T> = Result<T, RbenchError>;

impl RbenchError {
    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Create an invalid-specifier error
    pub fn invalid_specifier(request: &str, reason: &str) -> Self {
        Self::InvalidSpecifier {
            request: request.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a module-not-found error
    pub fn module_not_found(specifier: &str, base: &str) -> Self {
        Self::ModuleNotFound {
            specifier: specifier.to_string(),
            base: base.to_string(),
        }
    }

    /// Check if this error means the request itself was well-formed but
    /// no file satisfied it
    pub fn is_not_found(&self) -> bool {
        matches!(self, RbenchError::ModuleNotFound { .. })
    }
}
