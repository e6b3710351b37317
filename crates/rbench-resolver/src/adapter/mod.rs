//! Uniform asynchronous adapter contract over the two engines.
//!
//! The benchmark pipeline never talks to an engine directly; it sees two
//! values with the same `resolve` signature, one per engine, regardless
//! of whether the engine underneath is natively async or synchronous.

use camino::{Utf8Path, Utf8PathBuf};
use std::future::Future;
use std::sync::Arc;

use crate::cached::CachedResolver;
use crate::direct::DirectResolver;
use crate::ResolverResult;

/// Uniform suspend-until-complete resolution contract
pub trait ResolveAdapter {
    /// Task name used in sanity messages and the report table
    fn name(&self) -> &'static str;

    /// Resolve `request` against the explicit `base` directory
    fn resolve(
        &self,
        base: &Utf8Path,
        request: &str,
    ) -> impl Future<Output = ResolverResult<Utf8PathBuf>>;
}

/// Adapter over the caching asynchronous engine
#[derive(Debug, Clone)]
pub struct CachedAdapter {
    inner: Arc<CachedResolver>,
}

impl CachedAdapter {
    pub fn new(resolver: CachedResolver) -> Self {
        Self {
            inner: Arc::new(resolver),
        }
    }

    /// The wrapped engine
    pub fn engine(&self) -> &CachedResolver {
        &self.inner
    }
}

impl ResolveAdapter for CachedAdapter {
    fn name(&self) -> &'static str {
        "cached"
    }

    fn resolve(
        &self,
        base: &Utf8Path,
        request: &str,
    ) -> impl Future<Output = ResolverResult<Utf8PathBuf>> {
        self.inner.resolve(base, request)
    }
}

/// Adapter over the synchronous engine
#[derive(Debug, Clone)]
pub struct DirectAdapter {
    inner: Arc<DirectResolver>,
}

impl DirectAdapter {
    pub fn new(resolver: DirectResolver) -> Self {
        Self {
            inner: Arc::new(resolver),
        }
    }

    /// The wrapped engine
    pub fn engine(&self) -> &DirectResolver {
        &self.inner
    }
}

impl ResolveAdapter for DirectAdapter {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn resolve(
        &self,
        base: &Utf8Path,
        request: &str,
    ) -> impl Future<Output = ResolverResult<Utf8PathBuf>> {
        // The sync engine runs to completion here; the returned future
        // only hands back the finished result.
        let result = self.inner.resolve(base, request);
        async move { result }
    }
}
