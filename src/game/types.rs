use serde::{Serialize, Deserialize};

use crate::config::game::{CELL_COUNT, GRID_SIZE};

/// Index of a cell on a board: `row * GRID_SIZE + col`, in `0..CELL_COUNT`.
pub type CellIndex = usize;

/// Identifier of one of the local player's planes (1..=PLANE_COUNT).
pub type PlaneId = u8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn from_index(index: CellIndex) -> Option<Self> {
        if index >= CELL_COUNT {
            return None;
        }
        Some(Self { row: index / GRID_SIZE, col: index % GRID_SIZE })
    }

    /// Position shifted by a signed offset, or `None` when it leaves the board.
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return None;
        }
        Some(Self { row, col })
    }

    pub fn index(self) -> CellIndex {
        self.row * GRID_SIZE + self.col
    }
}

/// Direction the nose of a plane points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Next orientation in 90° clockwise steps.
    pub fn rotated(self) -> Self {
        match self {
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Self::Up => 0,
            Self::Right => 90,
            Self::Down => 180,
            Self::Left => 270,
        }
    }
}

/// Local annotation on an opponent cell that has not been fired upon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    NextTarget,
    PlannedHit,
}

/// Visual token a renderer draws on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitMarker {
    Miss,
    Hit,
    PlannedHit,
    HeadHit,
    NextTarget,
}

impl From<Mark> for HitMarker {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::NextTarget => HitMarker::NextTarget,
            Mark::PlannedHit => HitMarker::PlannedHit,
        }
    }
}

/// Which of the two boards a cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Board {
    /// The local player's planes, fired upon by the opponent.
    Own,
    /// The opponent's hidden planes, fired upon by us.
    Opponent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_round_trip_and_bounds() {
        let pos = Position::from_index(42).unwrap();
        assert_eq!(pos, Position { row: 4, col: 2 });
        assert_eq!(pos.index(), 42);
        assert!(Position::from_index(CELL_COUNT).is_none());
        assert!(pos.offset(-5, 0).is_none());
        assert!(pos.offset(0, 8).is_none());
        assert_eq!(pos.offset(1, -2).map(Position::index), Some(50));
    }

    #[test]
    fn test_rotation_cycles_in_quarter_turns() {
        let mut orientation = Orientation::default();
        let mut seen = vec![];
        for _ in 0..4 {
            seen.push(orientation.degrees());
            orientation = orientation.rotated();
        }
        assert_eq!(seen, vec![0, 90, 180, 270]);
        assert_eq!(orientation, Orientation::Up);
    }
}
