//! HTTP status code panels
//!
//! Generates one `stat` panel per configured status code and inserts them
//! into an existing dashboard as category bands (one band per status class)
//! at a fixed row. Panels below the insertion row are pushed down to make
//! room.

use crate::{ComposeReport, Composition, Result};
use dash_model::{Dashboard, GridPos, Panel, PanelId};
use layout_engine::{
    clear_row, collapse_band, shift_down, CategoryLayout, CategorySlot, IdAllocator, SlotConfig,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashSet;

/// Threshold steps for a status panel: green below `warn`, then the
/// class's warning color, then its critical color from `critical` on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub warn: f64,
    pub critical: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCode {
    pub code: u16,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Defaults depend on the status class
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<Thresholds>,
}

impl StatusCode {
    pub fn new(code: u16, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code,
            title: title.into(),
            description: description.into(),
            thresholds: None,
        }
    }

    /// Status class tag, e.g. `"4xx"`
    pub fn class(&self) -> String {
        format!("{}xx", self.code / 100)
    }

    fn is_server_error(&self) -> bool {
        self.code >= 500
    }

    fn threshold_steps(&self) -> Value {
        if self.is_server_error() {
            let t = self.thresholds.unwrap_or(Thresholds {
                warn: 1.0,
                critical: 5.0,
            });
            json!([
                {"color": "green", "value": null},
                {"color": "orange", "value": t.warn},
                {"color": "red", "value": t.critical}
            ])
        } else {
            let t = self.thresholds.unwrap_or(Thresholds {
                warn: 1.0,
                critical: 10.0,
            });
            json!([
                {"color": "green", "value": null},
                {"color": "yellow", "value": t.warn},
                {"color": "orange", "value": t.critical}
            ])
        }
    }

    /// Build the stat panel for this code
    pub fn to_panel(&self, id: PanelId, grid_pos: GridPos, config: &StatusPanelConfig) -> Panel {
        let expr = format!(
            "sum(rate({}{{http_response_status_code=\"{}\"}}[{}])) or vector(0)",
            config.metric, self.code, config.rate_window
        );

        let mut body = Map::new();
        body.insert("datasource".to_string(), json!({"type": "prometheus"}));
        body.insert("description".to_string(), json!(self.description));
        body.insert(
            "fieldConfig".to_string(),
            json!({
                "defaults": {
                    "color": {"mode": "thresholds"},
                    "mappings": [],
                    "thresholds": {"mode": "absolute", "steps": self.threshold_steps()},
                    "unit": "reqps"
                },
                "overrides": []
            }),
        );
        body.insert("gridPos".to_string(), json!(grid_pos));
        body.insert("id".to_string(), json!(id));
        body.insert(
            "options".to_string(),
            json!({
                "colorMode": "value",
                "graphMode": "area",
                "justifyMode": "auto",
                "orientation": "auto",
                "reduceOptions": {"values": false, "calcs": ["lastNotNull"], "fields": ""},
                "textMode": "auto"
            }),
        );
        body.insert("pluginVersion".to_string(), json!("10.0.0"));
        body.insert("targets".to_string(), json!([{"expr": expr, "refId": "A"}]));
        body.insert("title".to_string(), json!(self.title));
        body.insert("type".to_string(), json!("stat"));

        Panel::new(id, grid_pos, body)
    }
}

/// Configuration for status code panel insertion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusPanelConfig {
    /// Row at which the status bands are inserted
    pub insert_at: u32,
    /// Counter metric carrying an `http_response_status_code` label
    pub metric: String,
    pub rate_window: String,
    pub codes: Vec<StatusCode>,
    /// Tile geometry per status class
    pub layout: CategoryLayout,
}

impl Default for StatusPanelConfig {
    fn default() -> Self {
        Self {
            insert_at: 12,
            metric: "http_server_request_duration_seconds_count".to_string(),
            rate_window: "1m".to_string(),
            codes: vec![
                StatusCode::new(
                    400,
                    "400 Bad Request",
                    "Invalid request syntax or validation errors",
                ),
                StatusCode::new(401, "401 Unauthorized", "Authentication required or failed"),
                StatusCode::new(404, "404 Not Found", "Resource doesn't exist"),
                StatusCode::new(
                    409,
                    "409 Conflict",
                    "Resource already exists or conflicting state",
                ),
                StatusCode::new(410, "410 Gone", "Resource permanently deleted"),
                StatusCode::new(422, "422 Validation Error", "Validation failed"),
                StatusCode::new(500, "500 Internal Server Error", "Unhandled exceptions"),
                StatusCode::new(503, "503 Service Unavailable", "Dependencies down or overloaded"),
            ],
            layout: CategoryLayout::new(vec![
                CategorySlot::new("4xx", SlotConfig::new(4, 4)),
                CategorySlot::new("5xx", SlotConfig::new(6, 4)),
            ]),
        }
    }
}

/// Insert (or refresh) the status code panels of `target`.
///
/// Panels from an earlier run are recognized by title, removed, and the
/// band they occupied closed, so running twice yields the same layout.
/// New ids are allocated above every id in `target`.
pub fn insert_status_panels(target: &Dashboard, config: &StatusPanelConfig) -> Result<Composition> {
    let mut dashboard = target.clone();
    let mut ids = IdAllocator::for_dashboard(target);
    let mut report = ComposeReport {
        source_panels: target.panel_count(),
        ..ComposeReport::default()
    };

    let titles: HashSet<&str> = config.codes.iter().map(|c| c.title.as_str()).collect();
    let removed = dashboard.remove_panels_where(|panel| titles.contains(panel.title()));
    if let Some((top, bottom)) = band_of(&removed) {
        let band_is_clear = dashboard
            .panels()
            .iter()
            .all(|p| p.grid_pos().bottom() <= top || p.grid_pos().y >= bottom);
        if band_is_clear {
            collapse_band(dashboard.panels_mut(), top, bottom - top);
        }
        tracing::info!(removed = removed.len(), top, bottom, "Replacing existing status panels");
    }

    let classes: Vec<String> = config.codes.iter().map(StatusCode::class).collect();
    let tags: Vec<&str> = classes.iter().map(String::as_str).collect();
    let row = clear_row(dashboard.panels(), config.insert_at);
    if row != config.insert_at {
        tracing::debug!(
            requested = config.insert_at,
            row,
            "Insertion row lowered below a spanning panel"
        );
    }
    let placement = config.layout.place(row, &tags)?;

    let moved = shift_down(dashboard.panels_mut(), row, placement.height);
    tracing::debug!(moved, by = placement.height, "Shifted panels below insertion row");

    for (code, pos) in config.codes.iter().zip(placement.positions) {
        dashboard.push_panel(code.to_panel(ids.allocate()?, pos, config));
    }

    report.placed_panels = config.codes.len();
    let report = report.finish(&dashboard);
    Ok(Composition { dashboard, report })
}

/// Vertical extent `[top, bottom)` covered by `panels`
fn band_of(panels: &[Panel]) -> Option<(u32, u32)> {
    let top = panels.iter().map(|p| p.grid_pos().y).min()?;
    let bottom = panels.iter().map(|p| p.grid_pos().bottom()).max()?;
    Some((top, bottom))
}
