//! Panel selection rules

use dash_model::{Dashboard, Panel};
use serde::{Deserialize, Serialize};

/// Which panels to take from a source dashboard.
///
/// Every rule keeps the panels' source order and returns deep copies. Asking
/// for more panels than match is not an error; as many as exist are returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum SelectionRule {
    /// Every panel, unfiltered
    #[default]
    All,
    /// Panels of one visualization type
    ByType {
        panel_type: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        limit: Option<usize>,
    },
    /// Panels whose title starts with one of the prefixes
    TitlePrefix {
        prefixes: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        panel_type: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        limit: Option<usize>,
    },
    /// Panels whose title contains `needle`, ignoring case
    TitleContains {
        needle: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        panel_type: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        limit: Option<usize>,
    },
}

impl SelectionRule {
    pub fn by_type(panel_type: impl Into<String>, limit: usize) -> Self {
        Self::ByType {
            panel_type: panel_type.into(),
            limit: Some(limit),
        }
    }

    pub fn title_prefix<I, S>(prefixes: I, limit: Option<usize>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::TitlePrefix {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
            panel_type: None,
            limit,
        }
    }

    /// First panel of `panel_type` whose title mentions `needle`
    pub fn first_titled(panel_type: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::TitleContains {
            needle: needle.into(),
            panel_type: Some(panel_type.into()),
            limit: Some(1),
        }
    }

    pub fn limit(&self) -> Option<usize> {
        match self {
            Self::All => None,
            Self::ByType { limit, .. }
            | Self::TitlePrefix { limit, .. }
            | Self::TitleContains { limit, .. } => *limit,
        }
    }

    pub fn matches(&self, panel: &Panel) -> bool {
        match self {
            Self::All => true,
            Self::ByType { panel_type, .. } => panel.panel_type() == Some(panel_type.as_str()),
            Self::TitlePrefix {
                prefixes,
                panel_type,
                ..
            } => {
                type_matches(panel, panel_type.as_deref())
                    && prefixes.iter().any(|prefix| panel.title().starts_with(prefix.as_str()))
            }
            Self::TitleContains {
                needle, panel_type, ..
            } => {
                type_matches(panel, panel_type.as_deref())
                    && panel
                        .title()
                        .to_lowercase()
                        .contains(&needle.to_lowercase())
            }
        }
    }

    /// Deep copies of the matching panels, in source order
    pub fn select(&self, source: &Dashboard) -> Vec<Panel> {
        source
            .panels()
            .iter()
            .filter(|panel| self.matches(panel))
            .take(self.limit().unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }
}

fn type_matches(panel: &Panel, wanted: Option<&str>) -> bool {
    wanted.map_or(true, |wanted| panel.panel_type() == Some(wanted))
}

/// Apply several rules in order, concatenating their results.
///
/// A panel picked by an earlier rule is not picked again.
pub fn select_all(rules: &[SelectionRule], source: &Dashboard) -> Vec<Panel> {
    let mut picked: Vec<Panel> = Vec::new();
    for rule in rules {
        for panel in rule.select(source) {
            if !picked.iter().any(|p| p.id() == panel.id()) {
                picked.push(panel);
            }
        }
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn source() -> Dashboard {
        let panel = |id: u64, kind: &str, title: &str| {
            json!({"id": id, "gridPos": {"h": 4, "w": 6, "x": 0, "y": 0}, "type": kind, "title": title})
        };
        Dashboard::from_value(json!({
            "panels": [
                panel(1, "stat", "Total Requests"),
                panel(2, "stat", "400 Bad Request"),
                panel(3, "timeseries", "GC Collections"),
                panel(4, "stat", "500 Internal Server Error"),
                panel(5, "timeseries", "Memory Usage"),
            ]
        }))
        .unwrap()
    }

    fn ids(panels: &[Panel]) -> Vec<u64> {
        panels.iter().map(Panel::id).collect()
    }

    #[test]
    fn test_first_two_stats_skip_other_types() {
        let selected = SelectionRule::by_type("stat", 2).select(&source());
        assert_eq!(ids(&selected), [1, 2]);
    }

    #[test]
    fn test_limit_larger_than_matches() {
        let selected = SelectionRule::by_type("stat", 10).select(&source());
        assert_eq!(ids(&selected), [1, 2, 4]);
        assert!(SelectionRule::by_type("gauge", 4).select(&source()).is_empty());
    }

    #[test]
    fn test_title_prefix() {
        let rule = SelectionRule::title_prefix(["400", "401", "500", "503"], None);
        assert_eq!(ids(&rule.select(&source())), [2, 4]);
    }

    #[test]
    fn test_title_contains_ignores_case() {
        let rule = SelectionRule::first_titled("timeseries", "gc");
        assert_eq!(ids(&rule.select(&source())), [3]);

        let rule = SelectionRule::first_titled("stat", "memory");
        assert!(rule.select(&source()).is_empty());
    }

    #[test]
    fn test_all_is_default() {
        assert_eq!(SelectionRule::default(), SelectionRule::All);
        assert_eq!(ids(&SelectionRule::All.select(&source())), [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_selection_clones() {
        let source = source();
        let mut selected = SelectionRule::All.select(&source);
        selected[0].set_id(99);
        assert_eq!(source.panels()[0].id(), 1);
    }

    #[test]
    fn test_select_all_deduplicates() {
        let rules = [
            SelectionRule::first_titled("timeseries", "memory"),
            SelectionRule::by_type("timeseries", 2),
        ];
        assert_eq!(ids(&select_all(&rules, &source())), [5, 3]);
    }

    #[test]
    fn test_rule_from_config() {
        let rule: SelectionRule = serde_json::from_value(json!({
            "rule": "title_contains",
            "needle": "thread pool",
            "panel_type": "timeseries",
            "limit": 1
        }))
        .unwrap();
        assert_eq!(rule, SelectionRule::first_titled("timeseries", "thread pool"));

        let rule: SelectionRule = serde_json::from_value(json!({"rule": "all"})).unwrap();
        assert_eq!(rule, SelectionRule::All);
    }
}
