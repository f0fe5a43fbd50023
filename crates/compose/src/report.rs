//! Composition results and summaries

use dash_model::{Dashboard, GridPos};
use layout_engine::{find_overlaps, find_row_overflows};

/// A composed dashboard together with its summary
#[derive(Debug, Clone)]
pub struct Composition {
    pub dashboard: Dashboard,
    pub report: ComposeReport,
}

/// Summary of one composition run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeReport {
    /// Panels in the output dashboard, headers included
    pub total_panels: usize,
    /// Panels placed by this run, headers excluded
    pub placed_panels: usize,
    /// Section headers emitted
    pub headers: usize,
    /// Panels present in the sources that were consulted
    pub source_panels: usize,
    /// First free row below the composed content
    pub height: u32,
    /// Pairs of overlapping panels in the output
    pub overlaps: usize,
}

impl ComposeReport {
    /// Fill in the totals that can be read off the finished dashboard
    pub fn finish(mut self, dashboard: &Dashboard) -> Self {
        let positions: Vec<GridPos> = dashboard.panels().iter().map(|p| p.grid_pos()).collect();

        let overlaps = find_overlaps(&positions);
        for (a, b) in &overlaps {
            let (a, b) = (&dashboard.panels()[*a], &dashboard.panels()[*b]);
            tracing::warn!("Overlapping panels: {} and {}", a.label(), b.label());
        }
        for index in find_row_overflows(&positions) {
            tracing::warn!(
                "Panel crosses the grid edge: {}",
                dashboard.panels()[index].label()
            );
        }

        self.total_panels = dashboard.panel_count();
        self.overlaps = overlaps.len();
        self.height = self.height.max(dashboard.content_bottom());
        self
    }

    /// Log the summary at info level
    pub fn log(&self, what: &str) {
        tracing::info!(
            total_panels = self.total_panels,
            placed_panels = self.placed_panels,
            headers = self.headers,
            source_panels = self.source_panels,
            height = self.height,
            "{what} complete"
        );
    }
}
