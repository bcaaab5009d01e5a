/// Main configuration module.
/// 
/// Re-exports submodules for game geometry and client connection configuration.
pub mod game;
pub mod client;
