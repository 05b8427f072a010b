//! # Cache Module
//!
//! File-backed cache of the last successful usage snapshot. Freshness is
//! derived from the file's modification time, so independent statusline
//! invocations share one entry without coordination. Concurrent writers may
//! race; last writer wins, and a torn write surfaces as a parse failure on
//! the next read, which counts as a cache miss.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use crate::usage_api::{FetchError, UsageSnapshot};

/// Default cache TTL in seconds
const CACHE_TTL_SECONDS: u64 = 60;

const CACHE_FILE_NAME: &str = "claude-usageline-usage.json";

pub struct UsageCache {
    path: PathBuf,
    ttl: Duration,
}

impl UsageCache {
    /// Cache at the fixed path in the platform temp dir with the 60 s TTL.
    pub fn new() -> Self {
        Self::at(std::env::temp_dir().join(CACHE_FILE_NAME), CACHE_TTL_SECONDS)
    }

    pub fn at(path: PathBuf, ttl_seconds: u64) -> Self {
        UsageCache {
            path,
            ttl: Duration::from_secs(ttl_seconds),
        }
    }

    /// Fresh hit, else refresh via `fetch`, else stale fallback.
    ///
    /// A successful fetch is persisted best-effort: a write failure never
    /// affects the returned snapshot. A failed fetch returns whatever the
    /// file holds regardless of age, or `None` on a cold cache.
    pub fn resolve<F>(&self, fetch: F) -> Option<UsageSnapshot>
    where
        F: FnOnce() -> Result<UsageSnapshot, FetchError>,
    {
        if self.is_fresh() {
            if let Some(snapshot) = self.read() {
                return Some(snapshot);
            }
        }
        match fetch() {
            Ok(snapshot) => {
                self.store(&snapshot);
                Some(snapshot)
            }
            Err(_) => self.read(),
        }
    }

    fn is_fresh(&self) -> bool {
        let age = fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .ok()
            .and_then(|mtime| SystemTime::now().duration_since(mtime).ok());
        match age {
            Some(age) => age < self.ttl,
            None => false,
        }
    }

    fn read(&self) -> Option<UsageSnapshot> {
        let raw = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&raw).ok()
    }

    fn store(&self, snapshot: &UsageSnapshot) {
        if let Ok(json) = serde_json::to_string(snapshot) {
            let _ = fs::write(&self.path, json);
        }
    }
}

impl Default for UsageCache {
    fn default() -> Self {
        Self::new()
    }
}
