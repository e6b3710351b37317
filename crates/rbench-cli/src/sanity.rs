//! One-time agreement check between the two adapters.
//!
//! Runs before any benchmarking: every specifier must resolve through
//! both adapters to the same canonical path. The first failure or
//! disagreement is fatal; there is no retry and no partial reporting.

use anyhow::{ensure, Context, Result};
use camino::Utf8Path;

use rbench_resolver::ResolveAdapter;

/// Resolve every specifier with both adapters and require identical
/// canonical paths
pub async fn crosscheck<L, R>(
    left: &L,
    right: &R,
    base: &Utf8Path,
    specifiers: &[&str],
) -> Result<()>
where
    L: ResolveAdapter,
    R: ResolveAdapter,
{
    for request in specifiers {
        let left_path = left
            .resolve(base, request)
            .await
            .with_context(|| format!("{} failed to resolve '{}'", left.name(), request))?;
        let right_path = right
            .resolve(base, request)
            .await
            .with_context(|| format!("{} failed to resolve '{}'", right.name(), request))?;

        ensure!(
            left_path == right_path,
            "resolvers disagree on '{}': {} returned {}, {} returned {}",
            request,
            left.name(),
            left_path,
            right.name(),
            right_path
        );
    }
    Ok(())
}
