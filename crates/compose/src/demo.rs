//! Demo dashboard: a curated overview built from fixed tile rows
//!
//! Each section picks a few panels from one source and lays them out in
//! blocks of equally sized tiles, e.g. a row of four stats followed by one
//! full-width chart.

use crate::{select_all, ComposeReport, Composition, Result, SelectionRule, Sources};
use dash_model::{DashboardTemplate, Panel, HEADER_HEIGHT};
use layout_engine::{IdAllocator, SlotConfig};
use serde::{Deserialize, Serialize};

/// A row band of tiles filled from one or more selection rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoBlock {
    pub select: Vec<SelectionRule>,
    pub slot: SlotConfig,
}

impl DemoBlock {
    pub fn new(select: Vec<SelectionRule>, slot: SlotConfig) -> Self {
        Self { select, slot }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoSection {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Source dashboard, a path relative to the plan file
    pub source: String,
    pub blocks: Vec<DemoBlock>,
}

impl DemoSection {
    pub fn heading(&self) -> String {
        match &self.icon {
            Some(icon) => format!("{icon} {}", self.title),
            None => self.title.clone(),
        }
    }
}

/// Plan for a demo dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemoPlan {
    #[serde(default)]
    pub dashboard: DashboardTemplate,
    /// Omit the header of a section whose blocks selected nothing
    #[serde(default)]
    pub skip_empty_sections: bool,
    /// Rows left empty after each section
    #[serde(default)]
    pub section_gap: u32,
    pub sections: Vec<DemoSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Build the demo dashboard.
///
/// A block with no matching panels takes no vertical space.
pub fn compose_demo(plan: &DemoPlan, sources: &Sources) -> Result<Composition> {
    let mut dashboard = plan.dashboard.build();
    let mut ids = IdAllocator::for_dashboard(&dashboard);
    let mut report = ComposeReport::default();
    let mut current_y = 0;

    for section in &plan.sections {
        let source = sources.get(&section.source)?;
        report.source_panels += source.panel_count();

        let picked: Vec<Vec<Panel>> = section
            .blocks
            .iter()
            .map(|block| select_all(&block.select, source))
            .collect();
        let picked_count: usize = picked.iter().map(Vec::len).sum();

        if picked_count == 0 {
            tracing::warn!(section = %section.title, "Section selected no panels");
            if plan.skip_empty_sections {
                continue;
            }
        }

        dashboard.push_panel(Panel::section_header(
            ids.allocate()?,
            &section.heading(),
            current_y,
        ));
        report.headers += 1;
        current_y += HEADER_HEIGHT;

        for (index, (block, panels)) in section.blocks.iter().zip(picked).enumerate() {
            let category = format!("{} block {}", section.title, index + 1);
            let positions = block.slot.slots(&category, panels.len(), current_y)?;

            current_y += block.slot.band_height(panels.len());
            report.placed_panels += panels.len();
            for (panel, pos) in panels.into_iter().zip(positions) {
                dashboard.push_panel(panel.placed(ids.allocate()?, pos));
            }
        }

        current_y += plan.section_gap;
    }

    report.height = current_y;
    let report = report.finish(&dashboard);
    Ok(Composition { dashboard, report })
}
