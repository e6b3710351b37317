//! package.json manifest parsing.
//!
//! Only the fields the resolution engines consult are modeled; everything
//! else in a manifest is ignored.

use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::ConfigResult;
use rbench_core::error::RbenchError;

/// The slice of a package.json manifest that resolution cares about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageJson {
    /// Package name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Package version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Main entry point, relative to the package directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,

    /// Runtime dependencies
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub dependencies: HashMap<String, String>,
}

impl PackageJson {
    /// Parse manifest text; `path` is used only for error context
    pub fn parse(path: &str, text: &str) -> ConfigResult<Self> {
        serde_json::from_str(text).map_err(|e| RbenchError::JsonParse {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Read and parse a manifest from disk
    pub fn load_from_file(path: &Utf8Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| RbenchError::io(format!("Failed to read {}", path), e))?;
        Self::parse(path.as_str(), &text)
    }
}
