//! Client side of the game: protocol, session state machine, game client
//! actor and websocket transport.

pub mod messages;
pub mod machine;
pub mod channel;
pub mod session;
pub mod connection;
pub mod commands;
pub mod autopilot;
