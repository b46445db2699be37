// Local fallback cache for the content snapshot.
//
// A JSON file under the platform cache directory, written after every
// successful mutation and read only when the initial backend load comes
// back empty-handed. The remote store stays the sole source of truth;
// this file is disposable.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::{debug, warn};

use super::snapshot::ContentSnapshot;
use crate::error::CoreError;

/// Disk-backed snapshot cache.
pub struct FallbackCache {
    path: PathBuf,
}

impl FallbackCache {
    /// Cache at the platform-conventional location
    /// (e.g. `~/.cache/soundcheck/content.json`).
    pub fn new() -> Self {
        let path = ProjectDirs::from("dev", "makana", "soundcheck").map_or_else(
            || PathBuf::from(".soundcheck-content.json"),
            |dirs| dirs.cache_dir().join("content.json"),
        );
        Self { path }
    }

    /// Cache at an explicit path (tests, alternate deployments).
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Persist the snapshot. Failures are reported but callers treat
    /// them as non-fatal — losing the cache only costs a fallback.
    pub fn store(&self, snapshot: &ContentSnapshot) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| CoreError::Cache {
                message: format!("create {}: {e}", parent.display()),
            })?;
        }
        let json = serde_json::to_string(snapshot).map_err(|e| CoreError::Cache {
            message: format!("serialize snapshot: {e}"),
        })?;
        fs::write(&self.path, json).map_err(|e| CoreError::Cache {
            message: format!("write {}: {e}", self.path.display()),
        })?;
        debug!(path = %self.path.display(), "snapshot cached");
        Ok(())
    }

    /// Load the cached snapshot, or `None` if it is absent or unreadable.
    pub fn load(&self) -> Option<ContentSnapshot> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "discarding unreadable snapshot cache");
                None
            }
        }
    }
}

impl Default for FallbackCache {
    fn default() -> Self {
        Self::new()
    }
}
