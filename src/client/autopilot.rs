//! Unattended player.
//!
//! Drives a session without user input: enters the lobby, lays out the
//! fleet at random, declares readiness and fires at random, preferring
//! cells marked as next target. It only ever emits `UserCommand`s, so every
//! move goes through the same checks as a human player's.

use log::{debug, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;

use crate::client::messages::UserCommand;
use crate::config::game::CELL_COUNT;
use crate::game::entities::{footprint, random_footprint};
use crate::game::state::{Session, Status};
use crate::game::systems::validate;
use crate::game::types::{CellIndex, Mark, Orientation};

pub struct Autopilot {
    rng: StdRng,
    join_room: Option<String>,
    /// Placement chosen but not made yet, waiting for rotations.
    pending: Option<(CellIndex, Orientation)>,
}

impl Autopilot {
    pub fn new(seed: Option<u64>, join_room: Option<String>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng, join_room, pending: None }
    }

    /// Next command to play after the session went from `before` to `after`,
    /// or `None` when there is nothing to do until the server speaks.
    /// A failed join is retried by creating a room instead.
    pub fn next_command(&mut self, before: &Session, after: &Session) -> Option<UserCommand> {
        let entered_lobby = before.status != Status::Connecting;
        let request_failed = before.room_id.is_some() && after.room_id.is_none();
        if after.status == Status::Connecting && (entered_lobby || request_failed) {
            return Some(match self.join_room.take() {
                Some(code) => UserCommand::JoinRoom(code),
                None => UserCommand::CreateRoom,
            });
        }
        if after.is_placing() {
            return self.place(after);
        }
        if after.is_battling() && after.my_turn {
            return self.pick_target(after).map(UserCommand::Attack);
        }
        None
    }

    fn place(&mut self, session: &Session) -> Option<UserCommand> {
        if session.fleet_complete() {
            self.pending = None;
            return (!session.ready).then_some(UserCommand::Ready);
        }
        let still_valid = self.pending.is_some_and(|(anchor, orientation)| {
            let plane = footprint(anchor, orientation);
            validate(plane.as_ref(), &session.own_grid, session.planes_placed).is_ok()
        });
        if !still_valid {
            self.pending = random_footprint(&session.own_grid, &mut self.rng);
        }
        let Some((anchor, orientation)) = self.pending else {
            warn!("[Autopilot] No room left for another plane");
            return None;
        };
        if session.orientation != orientation {
            return Some(UserCommand::Rotate);
        }
        debug!("[Autopilot] Placing plane at {} facing {:?}", anchor, orientation);
        self.pending = None;
        Some(UserCommand::Place(anchor))
    }

    fn pick_target(&mut self, session: &Session) -> Option<CellIndex> {
        let marked = session
            .marks
            .iter()
            .filter(|(cell, mark)| *mark == Mark::NextTarget && !session.shots.has_fired(*cell))
            .map(|(cell, _)| cell)
            .choose(&mut self.rng);
        marked.or_else(|| {
            (0..CELL_COUNT)
                .filter(|cell| !session.shots.has_fired(*cell))
                .choose(&mut self.rng)
        })
    }
}
