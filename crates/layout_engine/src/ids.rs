//! Panel identifier allocation

use crate::{LayoutError, Result};
use dash_model::{Dashboard, PanelId, MAX_PANEL_ID};

/// Hands out strictly increasing panel ids.
///
/// Every id returned is higher than any id previously returned and higher
/// than every id present in the dashboard the allocator was created for.
/// Allocation fails once the next id would pass [`MAX_PANEL_ID`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    next: PanelId,
}

impl IdAllocator {
    /// Start at an explicit floor
    pub fn starting_at(floor: PanelId) -> Self {
        Self { next: floor }
    }

    /// Start above the highest id in `dashboard`, or at 1 when it has no panels
    pub fn for_dashboard(dashboard: &Dashboard) -> Self {
        Self::starting_at(above_existing(dashboard))
    }

    /// Start at `floor`, raised if needed so no existing id is reused
    pub fn with_floor(dashboard: &Dashboard, floor: PanelId) -> Self {
        Self::starting_at(floor.max(above_existing(dashboard)))
    }

    /// The id the next call to [`allocate`](Self::allocate) will return
    pub fn peek(&self) -> PanelId {
        self.next
    }

    pub fn allocate(&mut self) -> Result<PanelId> {
        let id = self.next;
        if id > MAX_PANEL_ID {
            return Err(LayoutError::IdsExhausted { next: id });
        }
        self.next = id + 1;
        Ok(id)
    }
}

fn above_existing(dashboard: &Dashboard) -> PanelId {
    dashboard
        .max_panel_id()
        .map_or(1, |max| max.saturating_add(1))
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::starting_at(1)
    }
}
