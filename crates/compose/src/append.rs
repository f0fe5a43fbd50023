//! Appending panels to an existing dashboard

use crate::{ComposeReport, Composition, Result};
use dash_model::{Dashboard, Panel};
use layout_engine::{clear_row, shift_down, IdAllocator, SlotConfig};
use serde::{Deserialize, Serialize};

/// Where and how appended panels are tiled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppendConfig {
    pub slot: SlotConfig,
    /// Insertion row; below all existing content when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub at: Option<u32>,
    /// Lowest id to hand out; raised above existing ids when needed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_floor: Option<u64>,
}

impl Default for AppendConfig {
    fn default() -> Self {
        Self {
            slot: SlotConfig::new(12, 8),
            at: None,
            id_floor: None,
        }
    }
}

/// Tile `panels` into `target` starting at the insertion row.
///
/// Existing panels at or below an explicit insertion row move down by the
/// height of the new tiles. An insertion row falling inside a panel is
/// lowered to that panel's bottom edge.
pub fn append_panels(
    target: &Dashboard,
    panels: &[Panel],
    config: &AppendConfig,
) -> Result<Composition> {
    let mut dashboard = target.clone();
    let mut ids = match config.id_floor {
        Some(floor) => IdAllocator::with_floor(target, floor),
        None => IdAllocator::for_dashboard(target),
    };

    let origin_y = match config.at {
        Some(at) => clear_row(target.panels(), at),
        None => target.content_bottom(),
    };
    let positions = config.slot.slots("appended", panels.len(), origin_y)?;
    let height = config.slot.band_height(panels.len());
    shift_down(dashboard.panels_mut(), origin_y, height);

    for (panel, pos) in panels.iter().zip(positions) {
        dashboard.push_panel(panel.clone().placed(ids.allocate()?, pos));
    }

    let report = ComposeReport {
        placed_panels: panels.len(),
        source_panels: target.panel_count(),
        ..ComposeReport::default()
    }
    .finish(&dashboard);

    tracing::debug!(origin_y, height, "Appended panels");
    Ok(Composition { dashboard, report })
}
