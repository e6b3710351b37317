//! Path utilities for the resolution engines.
//!
//! Provides lexical path normalization so candidate paths can be probed
//! and cached under one canonical spelling.

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use std::path::PathBuf;

use crate::error::{RbenchError, RbenchResult};

/// Normalize a path by resolving . and .. components lexically
pub fn normalize_path(path: &Utf8Path) -> Utf8PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Utf8Component::CurDir => {
                // Skip current directory
            },
            Utf8Component::ParentDir => {
                // Pop last normal component if possible
                match components.last() {
                    Some(Utf8Component::Normal(_)) => {
                        components.pop();
                    },
                    _ => {
                        components.push(component);
                    },
                }
            },
            other => {
                components.push(other);
            },
        }
    }

    let mut normalized = Utf8PathBuf::new();
    for component in components {
        normalized.push(component.as_str());
    }
    normalized
}

/// Convert a std PathBuf into a UTF-8 path, failing on non-UTF-8 names
pub fn to_utf8(path: PathBuf) -> RbenchResult<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).map_err(|path| RbenchError::NonUtf8Path { path })
}
