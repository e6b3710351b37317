//! Synchronous straight-through resolution engine.
//!
//! Every probe goes directly to the filesystem; nothing is cached between
//! calls. This is the baseline the caching engine is measured against.

use camino::{Utf8Path, Utf8PathBuf};

use rbench_config::PackageJson;
use rbench_core::error::RbenchError;
use rbench_core::types::Specifier;
use rbench_core::utils::{normalize_path, to_utf8};

use crate::{ResolveOptions, ResolverResult};

/// Synchronous resolution engine
#[derive(Debug)]
pub struct DirectResolver {
    options: ResolveOptions,
}

impl DirectResolver {
    /// Create a new engine with the given options
    pub fn new(options: ResolveOptions) -> Self {
        Self { options }
    }

    /// Resolve `request` against the `base` directory to a canonical file path
    pub fn resolve(&self, base: &Utf8Path, request: &str) -> ResolverResult<Utf8PathBuf> {
        let found = match Specifier::parse(request)? {
            Specifier::Relative(rel) => self.probe_path(&normalize_path(&base.join(rel)))?,
            Specifier::Absolute(path) => self.probe_path(&normalize_path(&path))?,
            Specifier::Package { name, subpath } => {
                self.probe_package(base, &name, subpath.as_deref())?
            },
        };

        match found {
            Some(path) => canonicalize(&path),
            None => Err(RbenchError::module_not_found(request, base.as_str())),
        }
    }

    /// Probe a candidate as a file first, then as a directory
    fn probe_path(&self, path: &Utf8Path) -> ResolverResult<Option<Utf8PathBuf>> {
        if let Some(file) = self.probe_file(path)? {
            return Ok(Some(file));
        }
        if is_dir(path)? {
            return self.probe_dir(path);
        }
        Ok(None)
    }

    /// Probe a candidate as an exact file, then with each extension appended
    fn probe_file(&self, path: &Utf8Path) -> ResolverResult<Option<Utf8PathBuf>> {
        if is_file(path)? {
            return Ok(Some(path.to_owned()));
        }
        for extension in &self.options.extensions {
            let candidate = Utf8PathBuf::from(format!("{}{}", path, extension));
            if is_file(&candidate)? {
                return Ok(Some(candidate));
            }
        }
        Ok(None)
    }

    /// Resolve a directory through its manifest `main`, then index files
    fn probe_dir(&self, dir: &Utf8Path) -> ResolverResult<Option<Utf8PathBuf>> {
        let manifest_path = dir.join("package.json");
        if is_file(&manifest_path)? {
            let manifest = PackageJson::load_from_file(&manifest_path)?;
            if let Some(main) = &manifest.main {
                let target = normalize_path(&dir.join(main));
                if let Some(file) = self.probe_file(&target)? {
                    return Ok(Some(file));
                }
            }
        }
        self.probe_file(&dir.join(&self.options.index_name))
    }

    /// Walk ancestor node_modules directories for the named package
    fn probe_package(
        &self,
        base: &Utf8Path,
        name: &str,
        subpath: Option<&Utf8Path>,
    ) -> ResolverResult<Option<Utf8PathBuf>> {
        for dir in base.ancestors() {
            let package_dir = dir.join("node_modules").join(name);
            if !is_dir(&package_dir)? {
                continue;
            }
            // First matching package directory wins
            return match subpath {
                Some(sub) => self.probe_path(&normalize_path(&package_dir.join(sub))),
                None => self.probe_dir(&package_dir),
            };
        }
        Ok(None)
    }
}

fn is_file(path: &Utf8Path) -> ResolverResult<bool> {
    stat(path).map(|meta| meta.map(|m| m.is_file()).unwrap_or(false))
}

fn is_dir(path: &Utf8Path) -> ResolverResult<bool> {
    stat(path).map(|meta| meta.map(|m| m.is_dir()).unwrap_or(false))
}

fn stat(path: &Utf8Path) -> ResolverResult<Option<std::fs::Metadata>> {
    match std::fs::metadata(path) {
        Ok(meta) => Ok(Some(meta)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(RbenchError::io(format!("Failed to stat {}", path), e)),
    }
}

fn canonicalize(path: &Utf8Path) -> ResolverResult<Utf8PathBuf> {
    let canonical = path
        .canonicalize()
        .map_err(|e| RbenchError::io(format!("Failed to canonicalize {}", path), e))?;
    to_utf8(canonical)
}
