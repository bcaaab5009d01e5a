//! Client core of a two-player aircraft battle game.
//!
//! Each player hides three planes on a 10x10 board and takes turns firing
//! at the opponent's board; the server adjudicates every shot.

pub mod config;
pub mod error;
pub mod game;
pub mod client;
