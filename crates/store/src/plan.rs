//! Plan files
//!
//! A plan is a JSON document describing how to compose a dashboard. Source
//! paths inside a plan are relative to the plan file's own directory.

use crate::{Result, StoreError};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Load and deserialize a plan file
pub fn load_plan<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(StoreError::FileNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    let plan = serde_json::from_str(&content)?;
    tracing::debug!(path = %path.display(), "Loaded plan");
    Ok(plan)
}

/// Resolve `target` against the directory containing `plan_path`.
///
/// Absolute targets are returned unchanged.
pub fn resolve_relative(plan_path: &Path, target: &Path) -> PathBuf {
    if target.is_absolute() {
        return target.to_path_buf();
    }
    match plan_path.parent() {
        Some(dir) => dir.join(target),
        None => target.to_path_buf(),
    }
}
