//! File I/O operations

use crate::{Result, StoreError};
use dash_model::{Dashboard, Panel};
use serde_json::Value;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Load a dashboard from a file
pub fn load_dashboard(path: impl AsRef<Path>) -> Result<Dashboard> {
    let path = path.as_ref();
    let json = read_existing(path)?;
    let dashboard = crate::deserialize(&json, path)?;

    tracing::debug!(
        path = %path.display(),
        panels = dashboard.panel_count(),
        "Loaded dashboard"
    );
    Ok(dashboard)
}

/// Load a list of panels from a file holding either a bare JSON array of
/// panels or a whole dashboard
pub fn load_panels(path: impl AsRef<Path>) -> Result<Vec<Panel>> {
    let path = path.as_ref();
    let json = read_existing(path)?;
    let value: Value = serde_json::from_str(&json)?;

    let dashboard = match value {
        Value::Array(items) => {
            let mut wrapper = serde_json::Map::new();
            wrapper.insert("panels".to_string(), Value::Array(items));
            Dashboard::from_value(Value::Object(wrapper))
        }
        other => Dashboard::from_value(other),
    }
    .map_err(|source| StoreError::Model {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(dashboard.panels().to_vec())
}

/// Write a dashboard, replacing `path` atomically.
///
/// The document is serialized completely before the file system is touched,
/// then written to a temporary file next to `path` and renamed over it. A
/// failure at any step leaves an existing file at `path` unchanged.
pub fn write_dashboard(dashboard: &Dashboard, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = crate::serialize(dashboard)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;

    let mut file = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
    writeln!(file, "{json}").map_err(|e| StoreError::io(dir, e))?;
    file.persist(path).map_err(|e| StoreError::io(path, e.error))?;

    tracing::debug!(
        path = %path.display(),
        panels = dashboard.panel_count(),
        bytes = json.len(),
        "Wrote dashboard"
    );
    Ok(())
}

fn read_existing(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(StoreError::FileNotFound(path.display().to_string()));
    }
    std::fs::read_to_string(path).map_err(|e| StoreError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_model::{DashboardTemplate, GridPos};
    use tempfile::TempDir;

    #[test]
    fn test_write_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("demo.json");

        let mut dashboard = DashboardTemplate::new("Demo", "demo").build();
        dashboard.push_panel(Panel::section_header(1, "Intro", 0));
        write_dashboard(&dashboard, &path).unwrap();

        let loaded = load_dashboard(&path).unwrap();
        assert_eq!(loaded, dashboard);
        assert_eq!(loaded.panels()[0].grid_pos(), GridPos::full_width(0, 2));

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n    \"annotations\""));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        std::fs::write(&path, "old contents").unwrap();

        let dashboard = DashboardTemplate::new("New", "new").build();
        write_dashboard(&dashboard, &path).unwrap();

        assert_eq!(load_dashboard(&path).unwrap().title(), "New");
        // No temporary files are left behind
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_dashboard(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, StoreError::FileNotFound(_)));
    }

    #[test]
    fn test_load_dashboard_without_panels() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"title": "x"}"#).unwrap();

        let err = load_dashboard(&path).unwrap_err();
        assert!(matches!(err, StoreError::Model { .. }));
    }

    #[test]
    fn test_load_panels_from_array_or_dashboard() {
        let dir = TempDir::new().unwrap();
        let panel = r#"{"id": 100, "gridPos": {"h": 8, "w": 12, "x": 0, "y": 0}, "title": "MongoDB Operations"}"#;

        let array_path = dir.path().join("array.json");
        std::fs::write(&array_path, format!("[{panel}]")).unwrap();
        let panels = load_panels(&array_path).unwrap();
        assert_eq!(panels.len(), 1);
        assert_eq!(panels[0].title(), "MongoDB Operations");

        let doc_path = dir.path().join("doc.json");
        std::fs::write(&doc_path, format!(r#"{{"panels": [{panel}, {panel}]}}"#)).unwrap();
        assert_eq!(load_panels(&doc_path).unwrap().len(), 2);
    }
}
