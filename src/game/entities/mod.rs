//! Game entities module.
//!
//! This module holds the plane shape geometry.

pub mod plane;

pub use plane::*;
