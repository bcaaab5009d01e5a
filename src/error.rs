//! Error types for the client core and its transport.
//!
//! `Rejection` is the local validation taxonomy: it never reaches the user
//! or the server, the state machine turns it into a no-op. `ChannelError`
//! and `ClientError` cover the outbound sink and the websocket link.
use thiserror::Error;

use crate::game::types::CellIndex;

/// Why a local action was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("action not allowed in the current phase")]
    WrongPhase,
    #[error("cell {0} is outside the board")]
    OutOfRange(CellIndex),
    #[error("plane would not fit on the board at this anchor")]
    InvalidFootprint,
    #[error("plane would overlap cell {0}")]
    Overlap(CellIndex),
    #[error("all planes are already placed")]
    FleetComplete,
    #[error("cell {0} does not belong to a plane")]
    UnownedCell(CellIndex),
    #[error("not your turn")]
    NotYourTurn,
    #[error("cell {0} was already fired upon")]
    AlreadyFired(CellIndex),
    #[error("fleet is not complete or readiness already declared")]
    NotReady,
    #[error("room code is empty")]
    EmptyRoomCode,
}

/// Failure of the outbound sink. The action is dropped, never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("outbound channel is closed")]
    Closed,
}

/// Transport-level failures surfaced to the binary.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("websocket error: {0}")]
    Socket(#[from] tokio_tungstenite::tungstenite::Error),
    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("invalid server url {url:?}")]
    InvalidUrl { url: String },
}

/// A terminal input line that could not be turned into a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unknown command {0:?}, try `help`")]
    UnknownCommand(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("{0:?} is not a cell, use an index (42) or row,col (4,2)")]
    BadCell(String),
}
