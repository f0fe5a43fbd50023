//! Dashboard panels

use crate::{GridPos, ModelError, Result};
use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

/// Panel identifier, unique within one dashboard
pub type PanelId = u64;

/// Largest id a dashboard can carry; ids are JSON numbers read by a
/// JavaScript frontend, so they stay within its exact integer range
pub const MAX_PANEL_ID: PanelId = (1 << 53) - 1;

/// Height of a section header panel in grid units
pub const HEADER_HEIGHT: u32 = 2;

/// A single panel.
///
/// `id` and `gridPos` are kept typed; the JSON body always mirrors them so
/// the panel serializes with its keys in their original positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    id: PanelId,
    grid_pos: GridPos,
    body: Map<String, Value>,
}

impl Panel {
    /// Build a panel from an opaque body, stamping the given id and position
    pub fn new(id: PanelId, grid_pos: GridPos, body: Map<String, Value>) -> Self {
        let mut panel = Self {
            id,
            grid_pos,
            body,
        };
        panel.set_grid_pos(grid_pos);
        panel.set_id(id);
        panel
    }

    /// Parse the panel at `index` of a dashboard's `panels` array
    pub fn from_value(index: usize, value: Value) -> Result<Self> {
        let Value::Object(body) = value else {
            return Err(ModelError::MalformedPanel {
                index,
                title: String::new(),
                reason: "panel is not an object".to_string(),
            });
        };

        let title = body
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let malformed = |reason: String| ModelError::MalformedPanel {
            index,
            title: title.clone(),
            reason,
        };

        let id = match body.get("id") {
            Some(value) => value
                .as_u64()
                .ok_or_else(|| malformed(format!("`id` is not a non-negative integer: {value}")))?,
            None => return Err(malformed("missing `id`".to_string())),
        };
        if id > MAX_PANEL_ID {
            return Err(malformed(format!("`id` {id} exceeds {MAX_PANEL_ID}")));
        }

        let grid_pos = match body.get("gridPos") {
            Some(value) => serde_json::from_value::<GridPos>(value.clone())
                .map_err(|e| malformed(format!("invalid `gridPos`: {e}")))?,
            None => return Err(malformed("missing `gridPos`".to_string())),
        };

        Ok(Self { id, grid_pos, body })
    }

    /// A full-width markdown header introducing a section at row `y`
    pub fn section_header(id: PanelId, title: &str, y: u32) -> Self {
        let grid_pos = GridPos::full_width(y, HEADER_HEIGHT);
        let mut body = Map::new();
        body.insert("datasource".to_string(), json!({"type": "prometheus"}));
        body.insert("gridPos".to_string(), json!(grid_pos));
        body.insert("id".to_string(), Value::from(id));
        body.insert(
            "options".to_string(),
            json!({
                "code": {"language": "plaintext", "showLineNumbers": false, "showMiniMap": false},
                "content": format!("# {title}"),
                "mode": "markdown"
            }),
        );
        body.insert("pluginVersion".to_string(), json!("10.0.0"));
        body.insert("type".to_string(), json!("text"));
        body.insert("transparent".to_string(), json!(true));

        Self::new(id, grid_pos, body)
    }

    pub fn id(&self) -> PanelId {
        self.id
    }

    pub fn grid_pos(&self) -> GridPos {
        self.grid_pos
    }

    /// Visualization type tag (`stat`, `timeseries`, `text`, ...)
    pub fn panel_type(&self) -> Option<&str> {
        self.body.get("type").and_then(Value::as_str)
    }

    /// Panel title, empty when absent
    pub fn title(&self) -> &str {
        self.body
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn body(&self) -> &Map<String, Value> {
        &self.body
    }

    pub fn set_id(&mut self, id: PanelId) {
        self.id = id;
        self.body.insert("id".to_string(), Value::from(id));
    }

    /// Move and resize the panel. Other keys of an existing `gridPos`
    /// object (e.g. `static`) are kept.
    pub fn set_grid_pos(&mut self, grid_pos: GridPos) {
        self.grid_pos = grid_pos;
        match self.body.get_mut("gridPos") {
            Some(Value::Object(existing)) => {
                existing.insert("h".to_string(), Value::from(grid_pos.h));
                existing.insert("w".to_string(), Value::from(grid_pos.w));
                existing.insert("x".to_string(), Value::from(grid_pos.x));
                existing.insert("y".to_string(), Value::from(grid_pos.y));
            }
            _ => {
                self.body.insert("gridPos".to_string(), json!(grid_pos));
            }
        }
    }

    /// Consume the panel, returning it with a new id and position
    pub fn placed(mut self, id: PanelId, grid_pos: GridPos) -> Self {
        self.set_grid_pos(grid_pos);
        self.set_id(id);
        self
    }

    /// Short human-readable identification used in error messages
    pub fn label(&self) -> String {
        format!("panel {} {:?}", self.id, self.title())
    }
}

impl Serialize for Panel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.body.serialize(serializer)
    }
}
