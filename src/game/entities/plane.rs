//! Plane geometry.
//!
//! A plane covers ten cells laid out relative to its anchor, the nose:
//!
//! ```text
//!       H            H head       W wing
//!   W W B W W        B body       T tail
//!       T            S stabilizer
//!     S T S
//! ```
//!
//! The sketch shows `Orientation::Up`; the other orientations are the
//! same shape turned so the nose points right, down or left.

use rand::Rng;
use rand::seq::IteratorRandom;
use serde::{Serialize, Deserialize};

use crate::config::game::{CELL_COUNT, PLANE_CELLS};
use crate::game::grid::OwnGrid;
use crate::game::types::{CellIndex, Orientation, Position};

/// Offsets `(row, col)` from the anchor, in role order:
/// head, body, four wing cells, two tail cells, two stabilizers.
type Shape = [(isize, isize); PLANE_CELLS];

const UP: Shape = [
    (0, 0),
    (1, 0),
    (1, -2), (1, -1), (1, 1), (1, 2),
    (2, 0), (3, 0),
    (3, -1), (3, 1),
];

const RIGHT: Shape = [
    (0, 0),
    (0, -1),
    (-2, -1), (-1, -1), (1, -1), (2, -1),
    (0, -2), (0, -3),
    (-1, -3), (1, -3),
];

const DOWN: Shape = [
    (0, 0),
    (-1, 0),
    (-1, -2), (-1, -1), (-1, 1), (-1, 2),
    (-2, 0), (-3, 0),
    (-3, -1), (-3, 1),
];

const LEFT: Shape = [
    (0, 0),
    (0, 1),
    (-2, 1), (-1, 1), (1, 1), (2, 1),
    (0, 2), (0, 3),
    (-1, 3), (1, 3),
];

fn shape(orientation: Orientation) -> &'static Shape {
    match orientation {
        Orientation::Up => &UP,
        Orientation::Right => &RIGHT,
        Orientation::Down => &DOWN,
        Orientation::Left => &LEFT,
    }
}

/// The ten cells of a plane that fits on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaneFootprint {
    cells: [CellIndex; PLANE_CELLS],
}

impl PlaneFootprint {
    /// Cells in role order; the first one is the head the server tracks.
    pub fn cells(&self) -> &[CellIndex] {
        &self.cells
    }

    pub fn head(&self) -> CellIndex {
        self.cells[0]
    }

    pub fn body(&self) -> CellIndex {
        self.cells[1]
    }

    pub fn wings(&self) -> &[CellIndex] {
        &self.cells[2..6]
    }

    pub fn tail(&self) -> &[CellIndex] {
        &self.cells[6..8]
    }

    pub fn stabilizers(&self) -> &[CellIndex] {
        &self.cells[8..10]
    }

    pub fn contains(&self, cell: CellIndex) -> bool {
        self.cells.contains(&cell)
    }
}

/// Footprint of a plane anchored at `anchor` with its nose pointing to
/// `orientation`, or `None` when any cell would leave the board.
pub fn footprint(anchor: CellIndex, orientation: Orientation) -> Option<PlaneFootprint> {
    let origin = Position::from_index(anchor)?;
    let mut cells = [0; PLANE_CELLS];
    for (slot, &(d_row, d_col)) in cells.iter_mut().zip(shape(orientation)) {
        *slot = origin.offset(d_row, d_col)?.index();
    }
    Some(PlaneFootprint { cells })
}

/// Pick a random anchor and orientation whose footprint fits on the board
/// without touching any occupied cell.
pub fn random_footprint<R: Rng + ?Sized>(grid: &OwnGrid, rng: &mut R) -> Option<(CellIndex, Orientation)> {
    let candidates = (0..CELL_COUNT).flat_map(|anchor| {
        Orientation::ALL.into_iter().filter_map(move |orientation| {
            let plane = footprint(anchor, orientation)?;
            plane
                .cells()
                .iter()
                .all(|cell| !grid.is_occupied(*cell))
                .then_some((anchor, orientation))
        })
    });
    candidates.choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_up_footprint_matches_reference_layout() {
        let plane = footprint(55, Orientation::Up).expect("fits");
        assert_eq!(plane.cells(), &[55, 65, 63, 64, 66, 67, 75, 85, 84, 86]);
        assert_eq!(plane.head(), 55);
        assert_eq!(plane.body(), 65);
        assert_eq!(plane.wings(), &[63, 64, 66, 67]);
        assert_eq!(plane.tail(), &[75, 85]);
        assert_eq!(plane.stabilizers(), &[84, 86]);
    }

    #[test]
    fn test_other_orientations_keep_anchor_as_head() {
        let right = footprint(55, Orientation::Right).unwrap();
        assert_eq!(right.cells(), &[55, 54, 34, 44, 64, 74, 53, 52, 42, 62]);
        let down = footprint(55, Orientation::Down).unwrap();
        assert_eq!(down.cells(), &[55, 45, 43, 44, 46, 47, 35, 25, 24, 26]);
        let left = footprint(55, Orientation::Left).unwrap();
        assert_eq!(left.cells(), &[55, 56, 36, 46, 66, 76, 57, 58, 48, 68]);
    }

    #[test]
    fn test_off_board_anchor_is_rejected() {
        // col + 2 out of bounds
        assert!(footprint(9, Orientation::Up).is_none());
        // row + 3 out of bounds
        assert!(footprint(72, Orientation::Up).is_none());
        // col - 3 out of bounds
        assert!(footprint(52, Orientation::Right).is_none());
        // row - 3 out of bounds
        assert!(footprint(25, Orientation::Down).is_none());
        // col + 3 out of bounds
        assert!(footprint(57, Orientation::Left).is_none());
        // row - 2 out of bounds
        assert!(footprint(15, Orientation::Left).is_none());
        assert!(footprint(CELL_COUNT, Orientation::Up).is_none());
    }

    #[test]
    fn test_every_anchor_gives_full_distinct_footprint_or_nothing() {
        for anchor in 0..CELL_COUNT {
            for orientation in Orientation::ALL {
                if let Some(plane) = footprint(anchor, orientation) {
                    let distinct: HashSet<_> = plane.cells().iter().copied().collect();
                    assert_eq!(distinct.len(), PLANE_CELLS, "anchor {anchor} {orientation:?}");
                    assert!(plane.cells().iter().all(|c| *c < CELL_COUNT));
                    assert_eq!(plane.head(), anchor);
                }
            }
        }
    }

    #[test]
    fn test_random_footprint_avoids_occupied_cells() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = OwnGrid::new();
        let taken = footprint(55, Orientation::Up).unwrap();
        grid.assign(taken.cells(), 1);

        for _ in 0..20 {
            let (anchor, orientation) = random_footprint(&grid, &mut rng).expect("room left");
            let plane = footprint(anchor, orientation).unwrap();
            assert!(plane.cells().iter().all(|c| !taken.contains(*c)));
        }
    }
}
