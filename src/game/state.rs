use std::collections::BTreeSet;
use serde::{Serialize, Deserialize};
use uuid::Uuid;

use crate::config::game::PLANE_COUNT;
use crate::game::grid::OwnGrid;
use crate::game::systems::MarkMap;
use crate::game::types::{CellIndex, Orientation};

/// Connection-level status of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Disconnected,
    /// Channel open, not in a room yet.
    Connecting,
    /// Room created, waiting for an opponent.
    Waiting,
    /// Both players in the room: placement or battle.
    Playing,
}

/// Game phase derived from the session flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Disconnected,
    Connecting,
    Waiting { room_id: Option<String> },
    Placing { planes_placed: u8, ready: bool },
    Battling { my_turn: bool },
    Over { winner: Option<String> },
}

/// Cells fired upon on one board, with what each shot revealed.
/// `shots ⊇ hits ⊇ head_hits` always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotLedger {
    pub shots: BTreeSet<CellIndex>,
    pub hits: BTreeSet<CellIndex>,
    pub head_hits: BTreeSet<CellIndex>,
}

impl ShotLedger {
    pub fn has_fired(&self, cell: CellIndex) -> bool {
        self.shots.contains(&cell)
    }

    /// Record a shot before its outcome is known.
    pub fn fire(&mut self, cell: CellIndex) {
        self.shots.insert(cell);
    }

    /// Record a resolved shot. A head hit is also a hit.
    pub fn record(&mut self, cell: CellIndex, is_hit: bool, is_head_hit: bool) {
        self.shots.insert(cell);
        if is_hit || is_head_hit {
            self.hits.insert(cell);
        }
        if is_head_hit {
            self.head_hits.insert(cell);
        }
    }
}

/// Everything the client knows about one game, from connection to game over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Local identifier of the websocket connection, for log correlation.
    pub connection_id: Uuid,
    pub status: Status,
    pub room_id: Option<String>,
    pub player_id: Option<String>,
    pub my_turn: bool,
    pub placement_phase: bool,
    pub planes_placed: u8,
    pub ready: bool,
    pub opponent_ready: bool,
    pub orientation: Orientation,
    pub own_grid: OwnGrid,
    /// Our shots at the opponent board.
    pub shots: ShotLedger,
    /// The opponent's shots at our board.
    pub opponent_shots: ShotLedger,
    pub marks: MarkMap,
    /// Heads we destroyed, as counted by the server.
    pub my_head_hits: u8,
    /// Heads the opponent destroyed, as counted by the server.
    pub opponent_head_hits: u8,
    pub game_over: bool,
    pub winner: Option<String>,
    pub last_attacked: Option<CellIndex>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Uuid::new_v4())
    }
}

impl Session {
    pub fn new(connection_id: Uuid) -> Self {
        Session {
            connection_id,
            status: Status::Disconnected,
            room_id: None,
            player_id: None,
            my_turn: false,
            placement_phase: true,
            planes_placed: 0,
            ready: false,
            opponent_ready: false,
            orientation: Orientation::default(),
            own_grid: OwnGrid::new(),
            shots: ShotLedger::default(),
            opponent_shots: ShotLedger::default(),
            marks: MarkMap::new(),
            my_head_hits: 0,
            opponent_head_hits: 0,
            game_over: false,
            winner: None,
            last_attacked: None,
        }
    }

    /// Fresh game state on the same connection, waiting for a room action.
    pub fn reset(&self) -> Self {
        Session {
            status: Status::Connecting,
            ..Session::new(self.connection_id)
        }
    }

    pub fn phase(&self) -> Phase {
        match self.status {
            Status::Disconnected => Phase::Disconnected,
            Status::Connecting => Phase::Connecting,
            Status::Waiting => Phase::Waiting { room_id: self.room_id.clone() },
            Status::Playing if self.game_over => Phase::Over { winner: self.winner.clone() },
            Status::Playing if self.placement_phase => Phase::Placing {
                planes_placed: self.planes_placed,
                ready: self.ready,
            },
            Status::Playing => Phase::Battling { my_turn: self.my_turn },
        }
    }

    pub fn is_placing(&self) -> bool {
        matches!(self.phase(), Phase::Placing { .. })
    }

    pub fn is_battling(&self) -> bool {
        matches!(self.phase(), Phase::Battling { .. })
    }

    pub fn fleet_complete(&self) -> bool {
        self.planes_placed >= PLANE_COUNT
    }

    /// Whether the local player won. `None` until the server ends the game.
    pub fn won(&self) -> Option<bool> {
        if !self.game_over {
            return None;
        }
        Some(self.winner.is_some() && self.winner == self.player_id)
    }
}
