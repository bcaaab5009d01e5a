//! Placement validation.
//!
//! This module decides whether a footprint may be committed to the own board.

use crate::config::game::PLANE_COUNT;
use crate::error::Rejection;
use crate::game::entities::PlaneFootprint;
use crate::game::grid::OwnGrid;
use crate::game::types::PlaneId;

/// Check a candidate footprint against the current board.
/// Returns the plane id the footprint would be stored under.
pub fn validate(
    footprint: Option<&PlaneFootprint>,
    grid: &OwnGrid,
    planes_placed: u8,
) -> Result<PlaneId, Rejection> {
    if planes_placed >= PLANE_COUNT {
        return Err(Rejection::FleetComplete);
    }
    let footprint = footprint.ok_or(Rejection::InvalidFootprint)?;
    if let Some(&cell) = footprint.cells().iter().find(|cell| grid.is_occupied(**cell)) {
        return Err(Rejection::Overlap(cell));
    }
    // Sequential ids unless a retraction left a gap.
    grid.free_plane_id().ok_or(Rejection::FleetComplete)
}

/// Validate and, on success, tag the footprint's cells with a new plane id.
pub fn place_plane(
    footprint: Option<&PlaneFootprint>,
    grid: &mut OwnGrid,
    planes_placed: u8,
) -> Result<PlaneId, Rejection> {
    let plane = validate(footprint, grid, planes_placed)?;
    if let Some(footprint) = footprint {
        grid.assign(footprint.cells(), plane);
    }
    Ok(plane)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::footprint;
    use crate::game::types::Orientation;

    #[test]
    fn test_first_plane_gets_id_one() {
        let mut grid = OwnGrid::new();
        let plane = footprint(55, Orientation::Up);
        assert_eq!(place_plane(plane.as_ref(), &mut grid, 0), Ok(1));
        assert_eq!(grid.cells_of(1).len(), 10);
    }

    #[test]
    fn test_rejects_empty_footprint() {
        let mut grid = OwnGrid::new();
        let plane = footprint(9, Orientation::Up);
        assert_eq!(place_plane(plane.as_ref(), &mut grid, 0), Err(Rejection::InvalidFootprint));
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn test_rejects_overlap_without_touching_grid() {
        let mut grid = OwnGrid::new();
        place_plane(footprint(55, Orientation::Up).as_ref(), &mut grid, 0).unwrap();
        let before = grid.clone();
        // Shares wing cell 63 with the first plane.
        let result = place_plane(footprint(63, Orientation::Up).as_ref(), &mut grid, 1);
        assert!(matches!(result, Err(Rejection::Overlap(_))));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_fourth_plane_is_rejected() {
        let mut grid = OwnGrid::new();
        assert_eq!(place_plane(footprint(2, Orientation::Up).as_ref(), &mut grid, 0), Ok(1));
        assert_eq!(place_plane(footprint(7, Orientation::Up).as_ref(), &mut grid, 1), Ok(2));
        assert_eq!(place_plane(footprint(52, Orientation::Up).as_ref(), &mut grid, 2), Ok(3));
        let before = grid.clone();
        assert_eq!(
            place_plane(footprint(57, Orientation::Up).as_ref(), &mut grid, 3),
            Err(Rejection::FleetComplete)
        );
        assert_eq!(grid, before);
    }

    #[test]
    fn test_reuses_id_freed_by_retraction() {
        let mut grid = OwnGrid::new();
        place_plane(footprint(2, Orientation::Up).as_ref(), &mut grid, 0).unwrap();
        place_plane(footprint(7, Orientation::Up).as_ref(), &mut grid, 1).unwrap();
        let first = grid.cells_of(1);
        grid.clear(&first);
        assert_eq!(validate(footprint(52, Orientation::Up).as_ref(), &grid, 1), Ok(1));
    }
}
