//! Session state machine.
//!
//! Pure transitions: each takes the previous session by value and returns
//! the next one. Local commands are applied optimistically and yield the
//! action to send; server events overwrite local guesses. A rejected
//! command leaves the session untouched and sends nothing.

use log::{debug, warn};

use crate::client::messages::{AttackReport, ClientAction, LinkStatus, Notice, ServerEvent, UserCommand};
use crate::config::game::{CELL_COUNT, PLANE_COUNT};
use crate::error::Rejection;
use crate::game::entities::{PlaneFootprint, footprint};
use crate::game::state::{Session, Status};
use crate::game::systems::{cycle_mark, place_plane, retract, validate};
use crate::game::types::CellIndex;

/// Apply a local user command.
pub fn apply_command(session: Session, command: &UserCommand) -> (Session, Option<ClientAction>) {
    match try_command(&session, command) {
        Ok(result) => result,
        Err(rejection) => {
            debug!(
                "[GameClient {}] {:?} rejected: {}",
                session.connection_id, command, rejection
            );
            (session, None)
        }
    }
}

fn require(condition: bool) -> Result<(), Rejection> {
    if condition { Ok(()) } else { Err(Rejection::WrongPhase) }
}

fn in_range(cell: CellIndex) -> Result<CellIndex, Rejection> {
    if cell < CELL_COUNT { Ok(cell) } else { Err(Rejection::OutOfRange(cell)) }
}

fn try_command(session: &Session, command: &UserCommand) -> Result<(Session, Option<ClientAction>), Rejection> {
    let mut next = session.clone();
    let action = match command {
        UserCommand::CreateRoom => {
            require(session.status == Status::Connecting)?;
            Some(ClientAction::CreateRoom)
        }
        UserCommand::JoinRoom(code) => {
            require(session.status == Status::Connecting)?;
            let code = code.trim();
            if code.is_empty() {
                return Err(Rejection::EmptyRoomCode);
            }
            // The server never echoes the room id to the joining player.
            next.room_id = Some(code.to_string());
            Some(ClientAction::JoinRoom { room_id: code.to_string() })
        }
        UserCommand::Rotate => {
            require(session.is_placing())?;
            next.orientation = session.orientation.rotated();
            None
        }
        UserCommand::Place(cell) => {
            require(session.is_placing())?;
            let cell = in_range(*cell)?;
            let plane = footprint(cell, session.orientation);
            place_plane(plane.as_ref(), &mut next.own_grid, session.planes_placed)?;
            next.planes_placed = (session.planes_placed + 1).min(PLANE_COUNT);
            next.ready = false;
            Some(ClientAction::PlacePlane {
                positions: plane.map(|p| p.cells().to_vec()).unwrap_or_default(),
                planes_placed: next.planes_placed,
                room_id: session.room_id.clone(),
            })
        }
        UserCommand::Remove(cell) => {
            require(session.is_placing())?;
            let cell = in_range(*cell)?;
            retract(cell, &mut next.own_grid)?;
            next.planes_placed = session.planes_placed.saturating_sub(1);
            next.ready = false;
            Some(ClientAction::RemovePlane {
                planes_placed: next.planes_placed,
                room_id: session.room_id.clone(),
            })
        }
        UserCommand::Ready => {
            require(session.is_placing())?;
            if !session.fleet_complete() || session.ready {
                return Err(Rejection::NotReady);
            }
            next.ready = true;
            Some(ClientAction::PlayerReady)
        }
        UserCommand::Attack(cell) => {
            require(session.is_battling())?;
            let cell = in_range(*cell)?;
            if !session.my_turn {
                return Err(Rejection::NotYourTurn);
            }
            if session.shots.has_fired(cell) {
                return Err(Rejection::AlreadyFired(cell));
            }
            next.shots.fire(cell);
            next.marks.evict(cell);
            // Optimistic: no second shot before the server answers.
            next.my_turn = false;
            next.last_attacked = Some(cell);
            Some(ClientAction::Attack { position: cell, room_id: session.room_id.clone() })
        }
        UserCommand::Mark(cell) => {
            require(session.status == Status::Playing && !session.placement_phase)?;
            cycle_mark(*cell, &mut next.marks, session.shots.has_fired(*cell))?;
            None
        }
    };
    Ok((next, action))
}

/// Footprint under the cursor and whether placing it would be accepted.
pub fn preview(session: &Session, cell: CellIndex) -> Option<(PlaneFootprint, bool)> {
    if !session.is_placing() {
        return None;
    }
    let plane = footprint(cell, session.orientation)?;
    let valid = validate(Some(&plane), &session.own_grid, session.planes_placed).is_ok();
    Some((plane, valid))
}

/// Apply an inbound server event.
pub fn apply_event(session: Session, event: &ServerEvent) -> (Session, Option<Notice>) {
    match event {
        ServerEvent::RoomCreated { room_id, player_id } => (
            Session {
                status: Status::Waiting,
                room_id: Some(room_id.clone()),
                player_id: Some(player_id.clone()),
                placement_phase: true,
                planes_placed: 0,
                ..session
            },
            None,
        ),
        ServerEvent::GameStart { player_id, placement_phase, my_turn } => (
            Session {
                status: Status::Playing,
                player_id: Some(player_id.clone()),
                placement_phase: *placement_phase,
                my_turn: *my_turn,
                ..session
            },
            None,
        ),
        ServerEvent::PlacementUpdate { planes_placed, placement_phase } => (
            Session {
                planes_placed: (*planes_placed).min(PLANE_COUNT),
                placement_phase: *placement_phase,
                ..session
            },
            None,
        ),
        ServerEvent::OpponentPlacementUpdate { placement_phase, opponent_ready } => (
            Session {
                placement_phase: *placement_phase,
                opponent_ready: *opponent_ready,
                ..session
            },
            None,
        ),
        ServerEvent::AttackResult(report) => (apply_attack_result(session, report), None),
        ServerEvent::OpponentAttack(report) => (apply_opponent_attack(session, report), None),
        ServerEvent::Error { data } => {
            let text = ServerEvent::error_text(data);
            // Still in the lobby: the room request failed, forget its code.
            let session = match session.status {
                Status::Connecting => Session { room_id: None, ..session },
                _ => session,
            };
            (session, Some(Notice::ServerError(text)))
        }
        ServerEvent::OpponentDisconnected => (session.reset(), Some(Notice::OpponentDisconnected)),
    }
}

fn malformed(session: &Session, report: &AttackReport) -> bool {
    if report.position >= CELL_COUNT {
        warn!(
            "[GameClient {}] Ignoring attack report for cell {} outside the board",
            session.connection_id, report.position
        );
        return true;
    }
    false
}

fn apply_attack_result(session: Session, report: &AttackReport) -> Session {
    if malformed(&session, report) {
        return session;
    }
    let mut next = session;
    next.shots.record(report.position, report.is_hit, report.is_head_hit);
    next.marks.evict(report.position);
    next.my_turn = false;
    next.my_head_hits = report.head_hits.unwrap_or(next.my_head_hits);
    next.game_over = report.game_over;
    next.winner = if report.game_over { report.winner.clone() } else { None };
    next
}

fn apply_opponent_attack(session: Session, report: &AttackReport) -> Session {
    if malformed(&session, report) {
        return session;
    }
    let mut next = session;
    next.opponent_shots.record(report.position, report.is_hit, report.is_head_hit);
    next.my_turn = !report.game_over;
    next.opponent_head_hits = report.head_hits.unwrap_or(next.opponent_head_hits);
    next.game_over = report.game_over;
    next.winner = if report.game_over { report.winner.clone() } else { None };
    next
}

/// Apply a change of the channel state.
pub fn apply_link(session: Session, status: LinkStatus) -> Session {
    match status {
        LinkStatus::Opened if session.status == Status::Disconnected => session.reset(),
        LinkStatus::Opened => session,
        LinkStatus::Closed => Session { status: Status::Disconnected, ..session },
    }
}
