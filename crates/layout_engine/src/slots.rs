//! Fixed-slot placement
//!
//! Panels of a category are laid out as equally sized tiles that fill a row
//! left to right before moving down by one tile height. Categories occupy
//! horizontal bands stacked below an insertion row.

use crate::{LayoutError, Result, GRID_WIDTH};
use dash_model::{GridPos, Panel};
use serde::{Deserialize, Serialize};

/// Tile geometry for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotConfig {
    pub tile_width: u32,
    pub tile_height: u32,
    /// Tiles per row; defaults to as many as fit in the grid width
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_row: Option<u32>,
}

impl SlotConfig {
    pub fn new(tile_width: u32, tile_height: u32) -> Self {
        Self {
            tile_width,
            tile_height,
            per_row: None,
        }
    }

    pub fn with_per_row(mut self, per_row: u32) -> Self {
        self.per_row = Some(per_row);
        self
    }

    /// Check the geometry before any tile is computed
    pub fn validate(&self, category: &str) -> Result<()> {
        let invalid = |reason: &str| LayoutError::InvalidSlot {
            category: category.to_string(),
            reason: reason.to_string(),
        };

        if self.tile_width == 0 || self.tile_height == 0 {
            return Err(invalid("tile width and height must be positive"));
        }
        if self.tile_width > GRID_WIDTH {
            return Err(invalid("tile width exceeds the grid width"));
        }
        if self.per_row == Some(0) {
            return Err(invalid("per_row must be positive"));
        }
        Ok(())
    }

    pub fn items_per_row(&self) -> u32 {
        self.per_row
            .unwrap_or_else(|| GRID_WIDTH / self.tile_width.max(1))
            .max(1)
    }

    /// Number of rows needed for `count` tiles
    pub fn rows_for(&self, count: usize) -> u32 {
        (count as u32).div_ceil(self.items_per_row())
    }

    /// Vertical space consumed by `count` tiles (0 when empty)
    pub fn band_height(&self, count: usize) -> u32 {
        self.rows_for(count) * self.tile_height
    }

    /// Position of the tile at `index` in a band starting at `origin_y`.
    ///
    /// A tile whose right edge would cross the grid width is an error, never
    /// wrapped or clipped.
    pub fn slot(&self, category: &str, index: usize, origin_y: u32) -> Result<GridPos> {
        self.validate(category)?;

        let per_row = self.items_per_row() as usize;
        let column = (index % per_row) as u32;
        let row = (index / per_row) as u32;

        let x = column * self.tile_width;
        if x + self.tile_width > GRID_WIDTH {
            return Err(LayoutError::SlotOverflow {
                category: category.to_string(),
                index,
                x,
                width: self.tile_width,
            });
        }

        Ok(GridPos::new(
            x,
            origin_y + row * self.tile_height,
            self.tile_width,
            self.tile_height,
        ))
    }

    /// Positions for `count` consecutive tiles
    pub fn slots(&self, category: &str, count: usize, origin_y: u32) -> Result<Vec<GridPos>> {
        (0..count)
            .map(|index| self.slot(category, index, origin_y))
            .collect()
    }
}

/// A category tag bound to its tile geometry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySlot {
    pub category: String,
    #[serde(flatten)]
    pub slot: SlotConfig,
    /// Band offset below the insertion row; stacked after the previous
    /// category when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_offset: Option<u32>,
}

impl CategorySlot {
    pub fn new(category: impl Into<String>, slot: SlotConfig) -> Self {
        Self {
            category: category.into(),
            slot,
            row_offset: None,
        }
    }

    pub fn at_offset(mut self, row_offset: u32) -> Self {
        self.row_offset = Some(row_offset);
        self
    }
}

/// Ordered mapping from category tag to tile geometry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryLayout {
    categories: Vec<CategorySlot>,
}

/// Result of placing a batch of categorized items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPlacement {
    /// One position per input item, in input order
    pub positions: Vec<GridPos>,
    /// Rows consumed below the insertion row
    pub height: u32,
}

impl CategoryLayout {
    pub fn new(categories: Vec<CategorySlot>) -> Self {
        Self { categories }
    }

    pub fn get(&self, category: &str) -> Option<&CategorySlot> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// Place items given by their category tag, in order, starting at `origin_y`.
    ///
    /// Each item's index within its category selects its tile. Bands of
    /// categories with no items take no space.
    pub fn place(&self, origin_y: u32, items: &[&str]) -> Result<CategoryPlacement> {
        if let Some(unknown) = items.iter().find(|tag| self.get(tag).is_none()) {
            return Err(LayoutError::UnknownCategory(unknown.to_string()));
        }

        // Band top (relative to origin) per configured category
        let mut band_tops = Vec::with_capacity(self.categories.len());
        let mut occupied: Vec<(u32, u32, &str)> = Vec::new();
        let mut stack_cursor = 0;

        for entry in &self.categories {
            entry.slot.validate(&entry.category)?;

            let count = items.iter().filter(|tag| **tag == entry.category).count();
            let top = entry.row_offset.unwrap_or(stack_cursor);
            let bottom = top + entry.slot.band_height(count);

            if bottom > top {
                if let Some((_, _, other)) = occupied
                    .iter()
                    .find(|(t, b, _)| top < *b && *t < bottom)
                {
                    return Err(LayoutError::InvalidSlot {
                        category: entry.category.clone(),
                        reason: format!("band overlaps category {other:?}"),
                    });
                }
                occupied.push((top, bottom, entry.category.as_str()));
            }

            band_tops.push(top);
            stack_cursor = stack_cursor.max(bottom);
        }

        let mut seen = vec![0usize; self.categories.len()];
        let mut positions = Vec::with_capacity(items.len());
        for tag in items {
            let Some(slot_index) = self.categories.iter().position(|c| c.category == *tag) else {
                return Err(LayoutError::UnknownCategory(tag.to_string()));
            };
            let entry = &self.categories[slot_index];
            let index = seen[slot_index];
            seen[slot_index] += 1;
            positions.push(entry.slot.slot(
                &entry.category,
                index,
                origin_y + band_tops[slot_index],
            )?);
        }

        let height = occupied.iter().map(|(_, bottom, _)| *bottom).max().unwrap_or(0);
        Ok(CategoryPlacement { positions, height })
    }
}

/// Lower `row` until no panel starts above it and ends below it.
///
/// Inserting at the returned row never splits an existing panel.
pub fn clear_row(panels: &[Panel], row: u32) -> u32 {
    let mut row = row;
    while let Some(bottom) = panels
        .iter()
        .map(Panel::grid_pos)
        .filter(|pos| pos.y < row && pos.bottom() > row)
        .map(|pos| pos.bottom())
        .max()
    {
        row = bottom;
    }
    row
}

/// Move every panel at or below `from_y` down by `by` rows.
///
/// Returns how many panels moved.
pub fn shift_down(panels: &mut [Panel], from_y: u32, by: u32) -> usize {
    if by == 0 {
        return 0;
    }
    let mut moved = 0;
    for panel in panels.iter_mut() {
        let pos = panel.grid_pos();
        if pos.y >= from_y {
            panel.set_grid_pos(pos.moved_to(pos.x, pos.y + by));
            moved += 1;
        }
    }
    moved
}

/// Close an emptied band of `height` rows at `top` by moving everything
/// below it up.
///
/// Returns how many panels moved.
pub fn collapse_band(panels: &mut [Panel], top: u32, height: u32) -> usize {
    if height == 0 {
        return 0;
    }
    let mut moved = 0;
    for panel in panels.iter_mut() {
        let pos = panel.grid_pos();
        if pos.y >= top + height {
            panel.set_grid_pos(pos.moved_to(pos.x, pos.y - height));
            moved += 1;
        }
    }
    moved
}
