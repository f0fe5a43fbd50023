//! Mega dashboard: every panel of every source, one section per source

use crate::{ComposeReport, Composition, Result, SelectionRule, Sources};
use dash_model::{DashboardTemplate, Panel};
use layout_engine::{FlowPacker, IdAllocator};
use serde::{Deserialize, Serialize};

/// Icon used for sections that do not name one
pub const DEFAULT_SECTION_ICON: &str = "📌";

/// One source dashboard rendered as a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MegaSection {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Source dashboard, a path relative to the plan file
    pub source: String,
    #[serde(default)]
    pub select: SelectionRule,
}

impl MegaSection {
    pub fn new(title: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon: None,
            source: source.into(),
            select: SelectionRule::All,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Header text, `"<icon> <title>"`
    pub fn heading(&self) -> String {
        let icon = self.icon.as_deref().unwrap_or(DEFAULT_SECTION_ICON);
        format!("{icon} {}", self.title)
    }
}

/// Plan for a mega dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MegaPlan {
    #[serde(default)]
    pub dashboard: DashboardTemplate,
    #[serde(default)]
    pub packer: FlowPacker,
    pub sections: Vec<MegaSection>,
    /// Output path relative to the plan file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Build the mega dashboard.
///
/// Every section gets a header, even when its source has no panels. Headers
/// and panels share one id sequence starting at 1.
pub fn compose_mega(plan: &MegaPlan, sources: &Sources) -> Result<Composition> {
    let mut dashboard = plan.dashboard.build();
    let mut ids = IdAllocator::for_dashboard(&dashboard);
    let mut report = ComposeReport::default();
    let mut next_y = 0;

    for section in &plan.sections {
        let source = sources.get(&section.source)?;
        report.source_panels += source.panel_count();

        let panels = section.select.select(source);
        if panels.is_empty() {
            tracing::warn!(section = %section.title, "Section has no panels");
        }

        let placement = plan.packer.place_section(next_y, &panels)?;

        dashboard.push_panel(Panel::section_header(
            ids.allocate()?,
            &section.heading(),
            placement.header.y,
        ));
        report.headers += 1;

        report.placed_panels += panels.len();
        for (panel, pos) in panels.into_iter().zip(placement.panels) {
            dashboard.push_panel(panel.placed(ids.allocate()?, pos));
        }

        tracing::debug!(
            section = %section.title,
            start_y = next_y,
            next_y = placement.next_y,
            "Placed section"
        );
        next_y = placement.next_y;
    }

    report.height = next_y;
    let report = report.finish(&dashboard);
    Ok(Composition { dashboard, report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_model::{Dashboard, GridPos};
    use layout_engine::{find_overlaps, LayoutError};
    use proptest::prelude::*;
    use serde_json::json;
    use std::collections::HashSet;

    fn source(sizes: &[(u32, u32)]) -> Dashboard {
        let panels: Vec<_> = sizes
            .iter()
            .enumerate()
            .map(|(i, (w, h))| {
                json!({
                    "id": i + 1,
                    "gridPos": {"h": h, "w": w, "x": 0, "y": i * 10},
                    "type": "stat",
                    "title": format!("Panel {}", i + 1),
                    "targets": [{"expr": "up", "refId": "A"}]
                })
            })
            .collect();
        Dashboard::from_value(json!({ "panels": panels })).unwrap()
    }

    fn plan(sections: Vec<MegaSection>) -> MegaPlan {
        MegaPlan {
            dashboard: DashboardTemplate::new("MEGA", "mega"),
            sections,
            ..MegaPlan::default()
        }
    }

    #[test]
    fn test_sections_stack_with_gap() {
        let sources = Sources::new()
            .with("perf.json", source(&[(6, 4), (6, 4), (6, 4), (6, 4), (12, 8)]))
            .with("errors.json", source(&[(24, 8)]));
        let plan = plan(vec![
            MegaSection::new("Performance Testing", "perf.json").with_icon("📊"),
            MegaSection::new("Errors & Diagnostics", "errors.json"),
        ]);

        let composition = compose_mega(&plan, &sources).unwrap();
        let panels = composition.dashboard.panels();
        let positions: Vec<GridPos> = panels.iter().map(|p| p.grid_pos()).collect();

        assert_eq!(panels.len(), 8);
        assert_eq!(panels[0].body()["options"]["content"], "# 📊 Performance Testing");
        assert_eq!(positions[0], GridPos::new(0, 0, 24, 2));
        assert_eq!(positions[1], GridPos::new(0, 2, 6, 4));
        assert_eq!(positions[4], GridPos::new(18, 2, 6, 4));
        assert_eq!(positions[5], GridPos::new(0, 6, 12, 8));

        // 6 + 8 + gap 2
        assert_eq!(panels[6].body()["options"]["content"], "# 📌 Errors & Diagnostics");
        assert_eq!(positions[6], GridPos::new(0, 16, 24, 2));
        assert_eq!(positions[7], GridPos::new(0, 18, 24, 8));

        let report = &composition.report;
        assert_eq!(report.headers, 2);
        assert_eq!(report.placed_panels, 6);
        assert_eq!(report.total_panels, 8);
        assert_eq!(report.source_panels, 6);
        assert_eq!(report.height, 28);
        assert_eq!(report.overlaps, 0);
    }

    #[test]
    fn test_ids_are_fresh_and_unique() {
        let sources = Sources::new()
            .with("a.json", source(&[(12, 4), (12, 4)]))
            .with("b.json", source(&[(12, 4), (12, 4)]));
        let plan = plan(vec![
            MegaSection::new("A", "a.json"),
            MegaSection::new("B", "b.json"),
        ]);

        let composition = compose_mega(&plan, &sources).unwrap();
        let ids: Vec<u64> = composition.dashboard.panels().iter().map(|p| p.id()).collect();
        assert_eq!(ids, [1, 2, 3, 4, 5, 6]);
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), ids.len());
    }

    #[test]
    fn test_payload_passes_through_and_sources_untouched() {
        let sources = Sources::new().with("a.json", source(&[(8, 3)]));
        let before = sources.get("a.json").unwrap().clone();
        let plan = plan(vec![MegaSection::new("A", "a.json")]);

        let composition = compose_mega(&plan, &sources).unwrap();
        let placed = &composition.dashboard.panels()[1];
        assert_eq!(placed.body()["targets"], json!([{"expr": "up", "refId": "A"}]));
        assert_eq!(placed.title(), "Panel 1");
        assert_eq!(placed.panel_type(), Some("stat"));

        assert_eq!(sources.get("a.json").unwrap(), &before);
    }

    #[test]
    fn test_empty_source_still_gets_header() {
        let sources = Sources::new()
            .with("empty.json", source(&[]))
            .with("b.json", source(&[(24, 4)]));
        let plan = plan(vec![
            MegaSection::new("Empty", "empty.json"),
            MegaSection::new("B", "b.json"),
        ]);

        let composition = compose_mega(&plan, &sources).unwrap();
        let positions: Vec<GridPos> = composition
            .dashboard
            .panels()
            .iter()
            .map(|p| p.grid_pos())
            .collect();
        assert_eq!(positions[0].y, 0);
        assert_eq!(positions[1].y, 4);
    }

    #[test]
    fn test_too_wide_panel_aborts() {
        let sources = Sources::new().with("a.json", source(&[(6, 4), (30, 4)]));
        let plan = plan(vec![MegaSection::new("A", "a.json")]);

        let err = compose_mega(&plan, &sources).unwrap_err();
        assert!(matches!(
            err,
            crate::ComposeError::Layout(LayoutError::PanelTooWide { id: 2, width: 30, .. })
        ));
    }

    #[test]
    fn test_composition_is_deterministic() {
        let sources = Sources::new().with("a.json", source(&[(7, 3), (9, 5), (11, 2)]));
        let plan = plan(vec![
            MegaSection::new("A", "a.json"),
            MegaSection::new("A again", "a.json"),
        ]);

        let first = compose_mega(&plan, &sources).unwrap();
        let second = compose_mega(&plan, &sources).unwrap();
        assert_eq!(
            serde_json::to_string(&first.dashboard).unwrap(),
            serde_json::to_string(&second.dashboard).unwrap()
        );
    }

    #[test]
    fn test_plan_from_config() {
        let plan: MegaPlan = serde_json::from_value(json!({
            "dashboard": {"title": "MEGA Dashboard - All Metrics", "uid": "bookstore-mega"},
            "sections": [
                {"title": "System Health", "icon": "💚", "source": "system.json"}
            ]
        }))
        .unwrap();
        assert_eq!(plan.packer, FlowPacker::default());
        assert_eq!(plan.sections[0].heading(), "💚 System Health");
        assert_eq!(plan.sections[0].select, SelectionRule::All);
        assert_eq!(plan.dashboard.refresh, "5s");
    }

    proptest! {
        #[test]
        fn packed_sections_never_collide(
            sections in prop::collection::vec(
                prop::collection::vec((1u32..=24, 1u32..=12), 0..8),
                1..5,
            )
        ) {
            let mut sources = Sources::new();
            let mut plan_sections = Vec::new();
            for (i, sizes) in sections.iter().enumerate() {
                let name = format!("s{i}.json");
                sources = sources.with(&name, source(sizes));
                plan_sections.push(MegaSection::new(format!("S{i}"), name));
            }

            let composition = compose_mega(&plan(plan_sections), &sources).unwrap();
            let panels = composition.dashboard.panels();
            let ids: HashSet<u64> = panels.iter().map(|p| p.id()).collect();
            prop_assert_eq!(ids.len(), panels.len());

            let positions: Vec<GridPos> = panels.iter().map(|p| p.grid_pos()).collect();
            prop_assert!(find_overlaps(&positions).is_empty());
            prop_assert!(positions.iter().all(|p| p.fits_row()));
        }
    }
}
