//! Protocol and actor messages.
//!
//! Wire messages are JSON objects tagged by a `type` field with camelCase
//! fields. The server leaves out zero, false and empty fields, so every
//! inbound field falls back to its default when absent.

use actix::prelude::*;
use serde::{Serialize, Deserialize};
use serde_json::Value;

use crate::game::state::Session;
use crate::game::types::CellIndex;

/// Server → client event.
#[derive(Message, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[rtype(result = "()")]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    #[serde(rename_all = "camelCase")]
    RoomCreated {
        #[serde(default)]
        room_id: String,
        #[serde(default)]
        player_id: String,
    },
    #[serde(rename_all = "camelCase")]
    GameStart {
        #[serde(default)]
        player_id: String,
        #[serde(default)]
        placement_phase: bool,
        #[serde(default)]
        my_turn: bool,
    },
    #[serde(rename_all = "camelCase")]
    PlacementUpdate {
        #[serde(default)]
        planes_placed: u8,
        #[serde(default)]
        placement_phase: bool,
    },
    #[serde(rename_all = "camelCase")]
    OpponentPlacementUpdate {
        #[serde(default)]
        placement_phase: bool,
        #[serde(default)]
        opponent_ready: bool,
    },
    AttackResult(AttackReport),
    OpponentAttack(AttackReport),
    Error {
        #[serde(default)]
        data: Value,
    },
    OpponentDisconnected,
}

/// Outcome of one shot, as adjudicated by the server.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AttackReport {
    #[serde(default)]
    pub position: CellIndex,
    #[serde(default)]
    pub is_hit: bool,
    #[serde(default)]
    pub is_head_hit: bool,
    /// Head hits of the attacking side; absent means unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_hits: Option<u8>,
    #[serde(default)]
    pub game_over: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
}

impl ServerEvent {
    /// Human-readable text of an `error` event.
    pub fn error_text(data: &Value) -> String {
        match data {
            Value::String(text) => text.clone(),
            Value::Null => "Unknown server error".to_string(),
            other => other.to_string(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::RoomCreated { .. } => "room_created",
            Self::GameStart { .. } => "game_start",
            Self::PlacementUpdate { .. } => "placement_update",
            Self::OpponentPlacementUpdate { .. } => "opponent_placement_update",
            Self::AttackResult(_) => "attack_result",
            Self::OpponentAttack(_) => "opponent_attack",
            Self::Error { .. } => "error",
            Self::OpponentDisconnected => "opponent_disconnected",
        }
    }
}

/// Client → server action.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientAction {
    CreateRoom,
    #[serde(rename_all = "camelCase")]
    JoinRoom { room_id: String },
    #[serde(rename_all = "camelCase")]
    PlacePlane {
        positions: Vec<CellIndex>,
        planes_placed: u8,
        room_id: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    RemovePlane {
        planes_placed: u8,
        room_id: Option<String>,
    },
    PlayerReady,
    #[serde(rename_all = "camelCase")]
    Attack {
        position: CellIndex,
        room_id: Option<String>,
    },
}

/// Local user input routed to the game client.
#[derive(Message, Clone, Debug, PartialEq, Eq)]
#[rtype(result = "()")]
pub enum UserCommand {
    CreateRoom,
    JoinRoom(String),
    Rotate,
    Place(CellIndex),
    Remove(CellIndex),
    Ready,
    Attack(CellIndex),
    Mark(CellIndex),
}

/// State of the underlying channel, reported by the transport.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
#[rtype(result = "()")]
pub enum LinkStatus {
    Opened,
    Closed,
}

/// Something the user must be told about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    ServerError(String),
    OpponentDisconnected,
    /// The phase changed; carries the new status line.
    Status(String),
}

/// Ask the game client for a copy of its session.
#[derive(Message)]
#[rtype(result = "Session")]
pub struct GetSession;
