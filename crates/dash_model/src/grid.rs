//! Grid positions

use serde::{Deserialize, Serialize};

/// Width of a dashboard row in grid units
pub const GRID_WIDTH: u32 = 24;

/// A panel's placement on the dashboard grid.
///
/// Field order matches the key order dashboards are written with
/// (`h`, `w`, `x`, `y`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub h: u32,
    pub w: u32,
    pub x: u32,
    pub y: u32,
}

impl GridPos {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { h, w, x, y }
    }

    /// A full-width position at row `y`
    pub fn full_width(y: u32, h: u32) -> Self {
        Self::new(0, y, GRID_WIDTH, h)
    }

    pub fn right(&self) -> u32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.h
    }

    /// Whether this position stays inside the grid's row width
    pub fn fits_row(&self) -> bool {
        self.right() <= GRID_WIDTH
    }

    /// Whether the two rectangles share any area.
    ///
    /// Rectangles that only touch along an edge do not overlap.
    pub fn overlaps(&self, other: &GridPos) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Same size, moved to a new origin
    pub fn moved_to(&self, x: u32, y: u32) -> Self {
        Self::new(x, y, self.w, self.h)
    }
}
