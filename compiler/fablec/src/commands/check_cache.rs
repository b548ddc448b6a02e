//! The `check-cache` command: report stale or unreadable program caches.

use std::fmt::Write;
use std::path::Path;

use super::CommandError;
use crate::loader::{cache_status, CacheStatus};

/// Append one line per cache under `dir` to `out`.
///
/// Fails with [`CommandError::UnusableCaches`] when any cache is stale or
/// cannot be read; `out` still holds the full report.
pub fn check_cache(dir: &Path, out: &mut String) -> Result<(), CommandError> {
    let statuses = cache_status(dir)?;
    let mut unusable = 0;
    for (path, status) in &statuses {
        let _ = match status {
            CacheStatus::Fresh => writeln!(out, "fresh   {}", path.display()),
            CacheStatus::Stale => {
                unusable += 1;
                writeln!(out, "stale   {}", path.display())
            }
            CacheStatus::Broken(reason) => {
                unusable += 1;
                writeln!(out, "broken  {}: {reason}", path.display())
            }
        };
    }
    if unusable > 0 {
        return Err(CommandError::UnusableCaches(unusable));
    }
    Ok(())
}
