//! Filesystem probe layer with TTL-based entry caching.
//!
//! Stat results and parsed manifests are cached per path. Entries expire
//! after a time-to-live and the maps are size-bounded: when an insert
//! would grow a map past its capacity, stale entries are dropped first
//! and the map is cleared wholesale if that is not enough.

use camino::{Utf8Path, Utf8PathBuf};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use rbench_config::PackageJson;
use rbench_core::error::RbenchError;

use crate::ResolverResult;

/// What a path turned out to be when probed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// Regular file (or anything stat-able that is not a directory)
    File,
    /// Directory
    Dir,
    /// Nothing at this path
    Missing,
}

/// Cache entry with TTL
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: T,
    stored_at: SystemTime,
    ttl: Duration,
}

impl<T> CacheEntry<T> {
    fn new(value: T, ttl: Duration) -> Self {
        Self {
            value,
            stored_at: SystemTime::now(),
            ttl,
        }
    }

    /// Check if the entry is still fresh
    fn is_fresh(&self) -> bool {
        match self.stored_at.elapsed() {
            Ok(elapsed) => elapsed < self.ttl,
            Err(_) => false, // Clock went backwards, consider stale
        }
    }
}

/// Cached filesystem access shared by one engine's calls
#[derive(Debug)]
pub struct CachedFileSystem {
    ttl: Duration,
    capacity: usize,
    kinds: DashMap<Utf8PathBuf, CacheEntry<PathKind>>,
    manifests: DashMap<Utf8PathBuf, CacheEntry<Option<Arc<PackageJson>>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CachedFileSystem {
    /// Create a cache with the given entry TTL and per-map capacity
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            ttl,
            capacity,
            kinds: DashMap::new(),
            manifests: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Stat a path, consulting the cache first
    pub async fn path_kind(&self, path: &Utf8Path) -> ResolverResult<PathKind> {
        if let Some(kind) = self.fresh_kind(path) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(kind);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        let kind = match tokio::fs::metadata(path).await {
            Ok(meta) if meta.is_dir() => PathKind::Dir,
            Ok(_) => PathKind::File,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => PathKind::Missing,
            Err(e) => return Err(RbenchError::io(format!("Failed to stat {}", path), e)),
        };

        enforce_capacity(&self.kinds, self.capacity);
        self.kinds
            .insert(path.to_owned(), CacheEntry::new(kind, self.ttl));
        Ok(kind)
    }

    /// Load the manifest in `dir`, consulting the cache first.
    /// Returns None when the directory has no package.json.
    pub async fn manifest(&self, dir: &Utf8Path) -> ResolverResult<Option<Arc<PackageJson>>> {
        if let Some(manifest) = self.fresh_manifest(dir) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(manifest);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        let manifest_path = dir.join("package.json");
        let manifest = match tokio::fs::read_to_string(&manifest_path).await {
            Ok(text) => Some(Arc::new(PackageJson::parse(manifest_path.as_str(), &text)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                return Err(RbenchError::io(
                    format!("Failed to read {}", manifest_path),
                    e,
                ))
            },
        };

        enforce_capacity(&self.manifests, self.capacity);
        self.manifests
            .insert(dir.to_owned(), CacheEntry::new(manifest.clone(), self.ttl));
        Ok(manifest)
    }

    /// Number of cache hits since creation
    pub fn hit_count(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Number of cache misses since creation
    pub fn miss_count(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Total entries currently cached across both maps
    pub fn entry_count(&self) -> usize {
        self.kinds.len() + self.manifests.len()
    }

    /// Drop every cached entry
    pub fn clear(&self) {
        self.kinds.clear();
        self.manifests.clear();
    }

    fn fresh_kind(&self, path: &Utf8Path) -> Option<PathKind> {
        let stale = {
            match self.kinds.get(path) {
                Some(entry) if entry.is_fresh() => return Some(entry.value),
                Some(_) => true,
                None => false,
            }
        };
        if stale {
            self.kinds.remove(path);
        }
        None
    }

    fn fresh_manifest(&self, dir: &Utf8Path) -> Option<Option<Arc<PackageJson>>> {
        let stale = {
            match self.manifests.get(dir) {
                Some(entry) if entry.is_fresh() => return Some(entry.value.clone()),
                Some(_) => true,
                None => false,
            }
        };
        if stale {
            self.manifests.remove(dir);
        }
        None
    }
}

/// Keep a map under its configured capacity before inserting
fn enforce_capacity<T>(map: &DashMap<Utf8PathBuf, CacheEntry<T>>, capacity: usize) {
    if map.len() < capacity {
        return;
    }
    map.retain(|_, entry| entry.is_fresh());
    if map.len() >= capacity {
        map.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_entry_freshness() {
        let entry = CacheEntry::new(PathKind::File, Duration::from_secs(60));
        assert!(entry.is_fresh());

        let expired = CacheEntry::new(PathKind::File, Duration::ZERO);
        assert!(!expired.is_fresh());
    }

    #[tokio::test]
    async fn test_repeated_probe_hits_cache() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        std::fs::write(root.join("entry.js"), "export default 1;\n").unwrap();

        let fs = CachedFileSystem::new(Duration::from_secs(60), 1024);
        let target = root.join("entry.js");

        assert_eq!(fs.path_kind(&target).await.unwrap(), PathKind::File);
        assert_eq!(fs.hit_count(), 0);

        assert_eq!(fs.path_kind(&target).await.unwrap(), PathKind::File);
        assert_eq!(fs.hit_count(), 1);
        assert_eq!(fs.miss_count(), 1);
    }

    #[tokio::test]
    async fn test_zero_ttl_never_hits() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();

        let fs = CachedFileSystem::new(Duration::ZERO, 1024);
        let target = root.join("missing.js");

        assert_eq!(fs.path_kind(&target).await.unwrap(), PathKind::Missing);
        assert_eq!(fs.path_kind(&target).await.unwrap(), PathKind::Missing);
        assert_eq!(fs.hit_count(), 0);
        assert_eq!(fs.miss_count(), 2);
    }

    #[tokio::test]
    async fn test_capacity_bound_holds() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();

        let fs = CachedFileSystem::new(Duration::from_secs(60), 4);
        for i in 0..32 {
            let target = root.join(format!("file-{}.js", i));
            fs.path_kind(&target).await.unwrap();
            assert!(fs.entry_count() <= 4);
        }
    }

    #[tokio::test]
    async fn test_manifest_absent_is_cached() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();

        let fs = CachedFileSystem::new(Duration::from_secs(60), 1024);
        assert!(fs.manifest(&root).await.unwrap().is_none());
        assert!(fs.manifest(&root).await.unwrap().is_none());
        assert_eq!(fs.hit_count(), 1);
    }
}
