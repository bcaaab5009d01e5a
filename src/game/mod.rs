pub mod types;
pub mod state;

pub mod entities;
pub mod grid;
pub mod systems;

pub use types::*;
pub use state::*;
