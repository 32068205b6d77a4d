//! Header row detection

use super::grid::Grid;
use tracing::debug;

/// Find the header row of a grid.
///
/// The header is taken to be the densest row: the one with the most filled
/// cells across the full column span. Banner and title rows above a table are
/// usually sparse, so they lose to the real header. Ties go to the first row.
/// Zero and `false` cells do not count, so a row of zeros cannot outvote the header.
///
/// Returns the absolute row index, or `None` when every row is empty.
pub fn locate_header(grid: &Grid) -> Option<u32> {
    let bounds = grid.bounds()?;

    let mut best: Option<(u32, usize)> = None;
    for row in bounds.rows() {
        let filled = bounds
            .cols()
            .filter(|&col| grid.is_filled(row, col))
            .count();

        if filled > best.map_or(0, |(_, count)| count) {
            best = Some((row, filled));
        }
    }

    if let Some((row, filled)) = best {
        debug!(row, filled, "header row located");
    }
    best.map(|(row, _)| row)
}
