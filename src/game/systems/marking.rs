//! Suspicion marks on the opponent board.
//!
//! Marks are advisory and local: they are never sent to the server, and a
//! cell that has been fired upon can no longer carry one.

use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};

use crate::config::game::CELL_COUNT;
use crate::error::Rejection;
use crate::game::types::{CellIndex, Mark};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkMap {
    marks: BTreeMap<CellIndex, Mark>,
}

impl MarkMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, cell: CellIndex) -> Option<Mark> {
        self.marks.get(&cell).copied()
    }

    /// Drop the mark on a cell, used when the cell is fired upon.
    pub fn evict(&mut self, cell: CellIndex) -> Option<Mark> {
        self.marks.remove(&cell)
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CellIndex, Mark)> + '_ {
        self.marks.iter().map(|(cell, mark)| (*cell, *mark))
    }
}

/// none → next target → planned hit → none
pub fn next_mark(current: Option<Mark>) -> Option<Mark> {
    match current {
        None => Some(Mark::NextTarget),
        Some(Mark::NextTarget) => Some(Mark::PlannedHit),
        Some(Mark::PlannedHit) => None,
    }
}

/// Advance the mark of `cell` one step and return its new value.
pub fn cycle_mark(cell: CellIndex, marks: &mut MarkMap, already_fired: bool) -> Result<Option<Mark>, Rejection> {
    if cell >= CELL_COUNT {
        return Err(Rejection::OutOfRange(cell));
    }
    if already_fired {
        return Err(Rejection::AlreadyFired(cell));
    }
    let next = next_mark(marks.get(cell));
    match next {
        Some(mark) => {
            marks.marks.insert(cell, mark);
        }
        None => {
            marks.marks.remove(&cell);
        }
    }
    Ok(next)
}
