//! Caching asynchronous resolution engine.
//!
//! Applies the same rules as the direct engine but routes every
//! filesystem probe through a TTL- and size-bounded cache, so repeated
//! resolutions of the same tree avoid redundant stat and read calls.

pub mod fs;

pub use fs::{CachedFileSystem, PathKind};

use camino::{Utf8Path, Utf8PathBuf};
use std::time::Duration;
use tracing::debug;

use rbench_core::error::RbenchError;
use rbench_core::types::Specifier;
use rbench_core::utils::{normalize_path, to_utf8};

use crate::{ResolveOptions, ResolverResult};

/// Cache knobs for the caching engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Time-to-live of cached filesystem entries
    pub ttl: Duration,
    /// Upper bound on entries per cache map
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_millis(4_000),
            capacity: 4_096,
        }
    }
}

/// Caching asynchronous resolution engine
#[derive(Debug)]
pub struct CachedResolver {
    options: ResolveOptions,
    fs: CachedFileSystem,
}

impl CachedResolver {
    /// Create a new engine with the given options and cache configuration
    pub fn new(options: ResolveOptions, cache: CacheConfig) -> Self {
        Self {
            options,
            fs: CachedFileSystem::new(cache.ttl, cache.capacity),
        }
    }

    /// The underlying cached filesystem layer
    pub fn file_system(&self) -> &CachedFileSystem {
        &self.fs
    }

    /// Resolve `request` against the `base` directory to a canonical file path
    pub async fn resolve(&self, base: &Utf8Path, request: &str) -> ResolverResult<Utf8PathBuf> {
        let found = match Specifier::parse(request)? {
            Specifier::Relative(rel) => self.probe_path(&normalize_path(&base.join(rel))).await?,
            Specifier::Absolute(path) => self.probe_path(&normalize_path(&path)).await?,
            Specifier::Package { name, subpath } => {
                self.probe_package(base, &name, subpath.as_deref()).await?
            },
        };

        match found {
            Some(path) => {
                debug!(request, resolved = %path, "resolved module");
                canonicalize(&path).await
            },
            None => Err(RbenchError::module_not_found(request, base.as_str())),
        }
    }

    /// Probe a candidate as a file first, then as a directory
    async fn probe_path(&self, path: &Utf8Path) -> ResolverResult<Option<Utf8PathBuf>> {
        if let Some(file) = self.probe_file(path).await? {
            return Ok(Some(file));
        }
        if self.fs.path_kind(path).await? == PathKind::Dir {
            return self.probe_dir(path).await;
        }
        Ok(None)
    }

    /// Probe a candidate as an exact file, then with each extension appended
    async fn probe_file(&self, path: &Utf8Path) -> ResolverResult<Option<Utf8PathBuf>> {
        if self.fs.path_kind(path).await? == PathKind::File {
            return Ok(Some(path.to_owned()));
        }
        for extension in &self.options.extensions {
            let candidate = Utf8PathBuf::from(format!("{}{}", path, extension));
            if self.fs.path_kind(&candidate).await? == PathKind::File {
                return Ok(Some(candidate));
            }
        }
        Ok(None)
    }

    /// Resolve a directory through its manifest `main`, then index files
    async fn probe_dir(&self, dir: &Utf8Path) -> ResolverResult<Option<Utf8PathBuf>> {
        if let Some(manifest) = self.fs.manifest(dir).await? {
            if let Some(main) = &manifest.main {
                let target = normalize_path(&dir.join(main));
                if let Some(file) = self.probe_file(&target).await? {
                    return Ok(Some(file));
                }
            }
        }
        self.probe_file(&dir.join(&self.options.index_name)).await
    }

    /// Walk ancestor node_modules directories for the named package
    async fn probe_package(
        &self,
        base: &Utf8Path,
        name: &str,
        subpath: Option<&Utf8Path>,
    ) -> ResolverResult<Option<Utf8PathBuf>> {
        for dir in base.ancestors() {
            let package_dir = dir.join("node_modules").join(name);
            if self.fs.path_kind(&package_dir).await? != PathKind::Dir {
                continue;
            }
            // First matching package directory wins
            return match subpath {
                Some(sub) => self.probe_path(&normalize_path(&package_dir.join(sub))).await,
                None => self.probe_dir(&package_dir).await,
            };
        }
        Ok(None)
    }
}

async fn canonicalize(path: &Utf8Path) -> ResolverResult<Utf8PathBuf> {
    let canonical = tokio::fs::canonicalize(path)
        .await
        .map_err(|e| RbenchError::io(format!("Failed to canonicalize {}", path), e))?;
    to_utf8(canonical)
}
