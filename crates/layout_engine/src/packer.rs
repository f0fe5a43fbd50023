//! Flowing row packer
//!
//! Panels keep their own width and height and are placed left to right in
//! arrival order. When a panel does not fit in the remaining width of the
//! current row, the row is closed and the panel starts a new row below the
//! tallest panel seen in the closed row. There is no reordering and no
//! backtracking, so reading order always mirrors input order.

use crate::{LayoutError, Result, GRID_WIDTH, HEADER_HEIGHT};
use dash_model::{GridPos, Panel};
use serde::{Deserialize, Serialize};

/// Rows left empty between two sections
pub const DEFAULT_SECTION_GAP: u32 = 2;

/// Packing state within one section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowCursor {
    /// Next free column in the current row
    pub x: u32,
    /// Top of the current row
    pub row_y: u32,
    /// Tallest panel placed in the current row so far
    pub row_height: u32,
}

impl RowCursor {
    /// An empty row starting at `row_y`
    pub fn at(row_y: u32) -> Self {
        Self {
            x: 0,
            row_y,
            row_height: 0,
        }
    }

    /// Place a `w`x`h` rectangle, returning its position and the advanced cursor.
    ///
    /// The caller guarantees `0 < w <= GRID_WIDTH`.
    pub fn place(self, w: u32, h: u32) -> (GridPos, RowCursor) {
        let mut cursor = self;
        if cursor.x + w > GRID_WIDTH {
            cursor = RowCursor::at(cursor.row_y + cursor.row_height);
        }

        let pos = GridPos::new(cursor.x, cursor.row_y, w, h);
        cursor.x += w;
        cursor.row_height = cursor.row_height.max(h);
        (pos, cursor)
    }

    /// First row below everything placed so far
    pub fn bottom(&self) -> u32 {
        self.row_y + self.row_height
    }
}

/// Section-by-section packer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowPacker {
    /// Rows left empty after each section
    pub section_gap: u32,
    /// Height of the full-width header that opens each section
    pub header_height: u32,
}

impl Default for FlowPacker {
    fn default() -> Self {
        Self {
            section_gap: DEFAULT_SECTION_GAP,
            header_height: HEADER_HEIGHT,
        }
    }
}

/// Positions computed for one section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionPlacement {
    pub header: GridPos,
    /// One position per input panel, in input order
    pub panels: Vec<GridPos>,
    /// Where the next section's header goes
    pub next_y: u32,
}

impl SectionPlacement {
    /// Bottom of the section's content, excluding the trailing gap
    pub fn content_bottom(&self) -> u32 {
        self.panels
            .iter()
            .map(GridPos::bottom)
            .max()
            .unwrap_or(0)
            .max(self.header.bottom())
    }
}

impl FlowPacker {
    pub fn new(section_gap: u32) -> Self {
        Self {
            section_gap,
            ..Self::default()
        }
    }

    /// Check the header height and every panel's size before anything is
    /// placed
    pub fn validate(&self, panels: &[Panel]) -> Result<()> {
        if self.header_height == 0 {
            return Err(LayoutError::InvalidPacker(
                "header height must be positive".to_string(),
            ));
        }
        for panel in panels {
            let pos = panel.grid_pos();
            if pos.w == 0 || pos.h == 0 {
                return Err(LayoutError::EmptyPanel {
                    id: panel.id(),
                    title: panel.title().to_string(),
                    width: pos.w,
                    height: pos.h,
                });
            }
            if pos.w > GRID_WIDTH {
                return Err(LayoutError::PanelTooWide {
                    id: panel.id(),
                    title: panel.title().to_string(),
                    width: pos.w,
                });
            }
        }
        Ok(())
    }

    /// Lay out one section whose header starts at `start_y`.
    ///
    /// Panels keep their original width and height; only `x` and `y` are
    /// computed.
    pub fn place_section(&self, start_y: u32, panels: &[Panel]) -> Result<SectionPlacement> {
        self.validate(panels)?;

        let header = GridPos::full_width(start_y, self.header_height);
        let mut cursor = RowCursor::at(header.bottom());
        let mut positions = Vec::with_capacity(panels.len());

        for panel in panels {
            let size = panel.grid_pos();
            let (pos, next) = cursor.place(size.w, size.h);
            positions.push(pos);
            cursor = next;
        }

        let next_y = cursor.bottom() + self.section_gap;
        tracing::debug!(start_y, panels = panels.len(), next_y, "Packed section");

        Ok(SectionPlacement {
            header,
            panels: positions,
            next_y,
        })
    }
}
