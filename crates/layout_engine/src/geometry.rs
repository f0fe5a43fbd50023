//! Overlap checks over placed rectangles

use dash_model::GridPos;

/// Index pairs `(i, j)` with `i < j` whose rectangles intersect
pub fn find_overlaps(positions: &[GridPos]) -> Vec<(usize, usize)> {
    let mut overlaps = Vec::new();
    for (i, a) in positions.iter().enumerate() {
        for (j, b) in positions.iter().enumerate().skip(i + 1) {
            if a.overlaps(b) {
                overlaps.push((i, j));
            }
        }
    }
    overlaps
}

/// Indices of positions that cross the grid's right edge
pub fn find_row_overflows(positions: &[GridPos]) -> Vec<usize> {
    positions
        .iter()
        .enumerate()
        .filter(|(_, pos)| !pos.fits_row())
        .map(|(i, _)| i)
        .collect()
}
