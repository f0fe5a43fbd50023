//! Dashboard documents and templates for new dashboards

use crate::{ModelError, Panel, PanelId, Result};
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Map, Value};

/// A dashboard document: ordered panels plus opaque top-level metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    /// Top-level object; the `panels` entry is a placeholder that marks
    /// where the panel list is written back
    body: Map<String, Value>,
    panels: Vec<Panel>,
}

impl Dashboard {
    /// Parse a dashboard from its JSON value
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut body) = value else {
            return Err(ModelError::NotAnObject);
        };

        let raw_panels = match body.get_mut("panels") {
            Some(Value::Array(items)) => std::mem::take(items),
            _ => return Err(ModelError::MissingPanels),
        };

        let panels = raw_panels
            .into_iter()
            .enumerate()
            .map(|(index, value)| Panel::from_value(index, value))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { body, panels })
    }

    /// An empty dashboard carrying only the given metadata
    pub fn with_metadata(mut body: Map<String, Value>) -> Self {
        body.insert("panels".to_string(), Value::Array(Vec::new()));
        Self {
            body,
            panels: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        self.body
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn panels_mut(&mut self) -> &mut [Panel] {
        &mut self.panels
    }

    pub fn push_panel(&mut self, panel: Panel) {
        self.panels.push(panel);
    }

    /// Keep only the panels matching the predicate, returning the removed ones
    pub fn remove_panels_where(&mut self, mut predicate: impl FnMut(&Panel) -> bool) -> Vec<Panel> {
        let (removed, kept): (Vec<Panel>, Vec<Panel>) = std::mem::take(&mut self.panels)
            .into_iter()
            .partition(|panel| predicate(panel));
        self.panels = kept;
        removed
    }

    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Highest panel id, `None` for a dashboard without panels
    pub fn max_panel_id(&self) -> Option<PanelId> {
        self.panels.iter().map(Panel::id).max()
    }

    /// First free row below every panel (0 when empty)
    pub fn content_bottom(&self) -> u32 {
        self.panels
            .iter()
            .map(|panel| panel.grid_pos().bottom())
            .max()
            .unwrap_or(0)
    }
}

impl Serialize for Dashboard {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.body.len()))?;
        for (key, value) in &self.body {
            if key == "panels" {
                map.serialize_entry(key, &self.panels)?;
            } else {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Dashboard {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Dashboard::from_value(value).map_err(D::Error::custom)
    }
}

/// Metadata for a newly composed dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardTemplate {
    pub title: String,
    pub uid: String,
    pub tags: Vec<String>,
    /// Auto-refresh interval (e.g. "5s")
    pub refresh: String,
    pub time_from: String,
    pub time_to: String,
    pub schema_version: u32,
    /// 0 = default, 1 = shared crosshair, 2 = shared tooltip
    pub graph_tooltip: u8,
    pub style: String,
}

impl Default for DashboardTemplate {
    fn default() -> Self {
        Self {
            title: "Composed Dashboard".to_string(),
            uid: "composed".to_string(),
            tags: Vec::new(),
            refresh: "5s".to_string(),
            time_from: "now-2m".to_string(),
            time_to: "now".to_string(),
            schema_version: 38,
            graph_tooltip: 1,
            style: "dark".to_string(),
        }
    }
}

impl DashboardTemplate {
    pub fn new(title: impl Into<String>, uid: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            uid: uid.into(),
            ..Self::default()
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Build an empty dashboard with the full top-level scaffold
    pub fn build(&self) -> Dashboard {
        let scaffold = json!({
            "annotations": {"list": []},
            "editable": true,
            "fiscalYearStartMonth": 0,
            "graphTooltip": self.graph_tooltip,
            "id": null,
            "links": [],
            "liveNow": false,
            "panels": [],
            "refresh": self.refresh,
            "schemaVersion": self.schema_version,
            "style": self.style,
            "tags": self.tags,
            "templating": {"list": []},
            "time": {"from": self.time_from, "to": self.time_to},
            "timepicker": {},
            "timezone": "",
            "title": self.title,
            "uid": self.uid,
            "version": 1
        });

        match scaffold {
            Value::Object(body) => Dashboard::with_metadata(body),
            _ => Dashboard::with_metadata(Map::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GridPos;

    fn sample() -> Value {
        json!({
            "title": "Errors",
            "panels": [
                {"id": 3, "gridPos": {"h": 4, "w": 6, "x": 0, "y": 0}, "type": "stat", "title": "A"},
                {"id": 9, "gridPos": {"h": 8, "w": 24, "x": 0, "y": 4}, "type": "timeseries", "title": "B"}
            ],
            "refresh": "10s"
        })
    }

    #[test]
    fn test_parse_dashboard() {
        let dashboard = Dashboard::from_value(sample()).unwrap();
        assert_eq!(dashboard.title(), "Errors");
        assert_eq!(dashboard.panel_count(), 2);
        assert_eq!(dashboard.max_panel_id(), Some(9));
        assert_eq!(dashboard.content_bottom(), 12);
        let out = serde_json::to_value(&dashboard).unwrap();
        assert_eq!(out["refresh"], "10s");
    }

    #[test]
    fn test_missing_panels() {
        let err = Dashboard::from_value(json!({"title": "x"})).unwrap_err();
        assert!(matches!(err, ModelError::MissingPanels));

        let err = Dashboard::from_value(json!([1, 2])).unwrap_err();
        assert!(matches!(err, ModelError::NotAnObject));
    }

    #[test]
    fn test_malformed_panel_aborts_parse() {
        let mut value = sample();
        value["panels"][1].as_object_mut().unwrap().remove("gridPos");
        let err = Dashboard::from_value(value).unwrap_err();
        assert!(matches!(err, ModelError::MalformedPanel { index: 1, .. }));
    }

    #[test]
    fn test_serialization_preserves_layout_of_document() {
        let dashboard = Dashboard::from_value(sample()).unwrap();
        let out = serde_json::to_value(&dashboard).unwrap();
        assert_eq!(out, sample());

        let keys: Vec<String> = out.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["title", "panels", "refresh"]);
    }

    #[test]
    fn test_remove_panels_where() {
        let mut dashboard = Dashboard::from_value(sample()).unwrap();
        let removed = dashboard.remove_panels_where(|panel| panel.panel_type() == Some("stat"));
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].id(), 3);
        assert_eq!(dashboard.panel_count(), 1);
    }

    #[test]
    fn test_template_scaffold() {
        let mut dashboard = DashboardTemplate::new("Demo", "demo")
            .with_tags(["demo", "overview"])
            .build();
        assert!(dashboard.is_empty());
        assert_eq!(dashboard.max_panel_id(), None);
        assert_eq!(dashboard.content_bottom(), 0);

        dashboard.push_panel(Panel::section_header(1, "Intro", 0));
        let out = serde_json::to_value(&dashboard).unwrap();
        assert_eq!(out["title"], "Demo");
        assert_eq!(out["uid"], "demo");
        assert_eq!(out["refresh"], "5s");
        assert_eq!(out["schemaVersion"], 38);
        assert_eq!(out["tags"], json!(["demo", "overview"]));
        assert_eq!(out["panels"][0]["gridPos"], json!(GridPos::full_width(0, 2)));
    }
}
