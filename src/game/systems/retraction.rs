//! Plane retraction.
//!
//! Removing a plane re-derives its cells from the board: every cell
//! reachable from the clicked one through 8-directional adjacency that
//! carries the same plane id. Wing and stabilizer cells only touch the
//! rest of the plane diagonally in rotated layouts, so orthogonal
//! adjacency is not enough.

use std::collections::BTreeSet;

use crate::error::Rejection;
use crate::game::grid::{OwnGrid, neighbours};
use crate::game::types::CellIndex;

/// Cells connected to `clicked` that share its plane id.
/// Empty when the clicked cell is not owned.
pub fn connected_region(clicked: CellIndex, grid: &OwnGrid) -> BTreeSet<CellIndex> {
    let mut region = BTreeSet::new();
    let Some(plane) = grid.owner(clicked) else {
        return region;
    };

    let mut stack = vec![clicked];
    while let Some(cell) = stack.pop() {
        if grid.owner(cell) != Some(plane) || !region.insert(cell) {
            continue;
        }
        stack.extend(neighbours(cell).into_iter().filter(|next| !region.contains(next)));
    }
    region
}

/// Clear the plane under `clicked` and return the removed cells.
pub fn retract(clicked: CellIndex, grid: &mut OwnGrid) -> Result<BTreeSet<CellIndex>, Rejection> {
    let region = connected_region(clicked, grid);
    if region.is_empty() {
        return Err(Rejection::UnownedCell(clicked));
    }
    grid.clear(&region);
    Ok(region)
}
