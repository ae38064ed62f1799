//! JSON snapshot persistence for a [`Registry`].
//!
//! The whole registry (owner, level bounds, grants, slots, and the
//! revocation cursor) is one JSON document. Persisting the cursor is what
//! lets a bulk revocation resume across separate process invocations.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::registry::Registry;
use crate::types::Identity;

/// Loads a registry snapshot and checks its invariants.
pub fn load(path: &Path) -> Result<Registry> {
    if !path.exists() {
        return Err(Error::SnapshotNotFound {
            path: path.display().to_string(),
        });
    }
    let content = fs::read_to_string(path)?;
    let registry: Registry = serde_json::from_str(&content)?;
    registry.check_consistency().map_err(|e| {
        Error::config(format!("Corrupt snapshot {}: {e}", path.display()))
    })?;
    log::debug!(
        "Loaded snapshot {} ({} grants)",
        path.display(),
        registry.active_count()
    );
    Ok(registry)
}

/// Loads the snapshot at `path`, or starts a fresh registry owned by
/// `owner` if none exists yet.
pub fn load_or_init(path: &Path, owner: &Identity) -> Result<Registry> {
    match load(path) {
        Err(Error::SnapshotNotFound { .. }) => {
            log::info!("No snapshot at {}, starting fresh", path.display());
            Ok(Registry::new(owner.clone()))
        }
        other => other,
    }
}

/// Writes a snapshot, replacing any existing file in one rename.
pub fn save(path: &Path, registry: &Registry) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(registry)?;
    let staging = staging_path(path);
    fs::write(&staging, json)?;
    fs::rename(&staging, path)?;
    log::debug!("Saved snapshot {}", path.display());
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
