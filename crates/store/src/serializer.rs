//! Dashboard serialization

use crate::{Result, StoreError};
use dash_model::Dashboard;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::path::Path;

const INDENT: &[u8] = b"    ";

/// Serialize any value as pretty JSON with 4-space indentation
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut serializer)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Serialize a dashboard to its on-disk text form
pub fn serialize(dashboard: &Dashboard) -> Result<String> {
    to_pretty_json(dashboard)
}

/// Parse a dashboard from JSON text read from `origin`
pub fn deserialize(json: &str, origin: &Path) -> Result<Dashboard> {
    let value: Value = serde_json::from_str(json)?;
    Dashboard::from_value(value).map_err(|source| StoreError::Model {
        path: origin.to_path_buf(),
        source,
    })
}
