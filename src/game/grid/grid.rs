use serde::{Serialize, Deserialize};

use crate::config::game::{CELL_COUNT, PLANE_COUNT};
use crate::game::types::{CellIndex, PlaneId, Position};

/// The local player's board: which plane, if any, owns each cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnGrid {
    cells: Vec<Option<PlaneId>>,
}

impl Default for OwnGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl OwnGrid {
    pub fn new() -> Self {
        Self { cells: vec![None; CELL_COUNT] }
    }

    /// Owner of a cell; `None` for empty or out-of-range cells.
    pub fn owner(&self, cell: CellIndex) -> Option<PlaneId> {
        self.cells.get(cell).copied().flatten()
    }

    pub fn is_occupied(&self, cell: CellIndex) -> bool {
        self.owner(cell).is_some()
    }

    /// Tag every cell with `plane`. Callers validate the cells first.
    pub fn assign(&mut self, cells: &[CellIndex], plane: PlaneId) {
        for &cell in cells {
            if let Some(slot) = self.cells.get_mut(cell) {
                *slot = Some(plane);
            }
        }
    }

    pub fn clear<'a>(&mut self, cells: impl IntoIterator<Item = &'a CellIndex>) {
        for &cell in cells {
            if let Some(slot) = self.cells.get_mut(cell) {
                *slot = None;
            }
        }
    }

    /// All cells owned by `plane`, ascending.
    pub fn cells_of(&self, plane: PlaneId) -> Vec<CellIndex> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(cell, owner)| (*owner == Some(plane)).then_some(cell))
            .collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|owner| owner.is_some()).count()
    }

    /// Smallest plane id not present on the board.
    pub fn free_plane_id(&self) -> Option<PlaneId> {
        (1..=PLANE_COUNT).find(|id| !self.cells.contains(&Some(*id)))
    }
}

/// The up to eight cells touching `cell`, including diagonals.
pub fn neighbours(cell: CellIndex) -> Vec<CellIndex> {
    let Some(pos) = Position::from_index(cell) else {
        return vec![];
    };
    let mut result = Vec::with_capacity(8);
    for d_row in -1..=1 {
        for d_col in -1..=1 {
            if d_row == 0 && d_col == 0 {
                continue;
            }
            if let Some(next) = pos.offset(d_row, d_col) {
                result.push(next.index());
            }
        }
    }
    result
}
