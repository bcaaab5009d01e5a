/// Game configuration constants.
/// 
/// This module defines the board geometry and fleet parameters shared by
/// the placement engine, the session state machine and the renderer.
pub const GRID_SIZE: usize = 10; // Rows and columns of each board.

/// Number of cells on one board.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Number of planes each player places.
pub const PLANE_COUNT: u8 = 3;

/// Number of cells covered by one plane.
pub const PLANE_CELLS: usize = 10;

/// Head hits needed to destroy a fleet. Only used for display: the
/// server decides when a game is over.
pub const HEADS_TO_WIN: u8 = 3;
