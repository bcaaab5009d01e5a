//! Board rendering (terminal).
//!
//! This module maps session state to per-cell markers and prints both
//! boards as text for the terminal front-end and debug logs.

use std::fmt::Write;

use crate::config::game::{GRID_SIZE, HEADS_TO_WIN, PLANE_COUNT};
use crate::game::entities::PlaneFootprint;
use crate::game::state::{Phase, Session};
use crate::game::types::{Board, CellIndex, HitMarker, Position};

/// Marker drawn on `cell` of `board`. Shots win over marks.
pub fn marker_at(session: &Session, board: Board, cell: CellIndex) -> Option<HitMarker> {
    let ledger = match board {
        Board::Own => &session.opponent_shots,
        Board::Opponent => &session.shots,
    };
    if ledger.has_fired(cell) {
        return Some(if ledger.head_hits.contains(&cell) {
            HitMarker::HeadHit
        } else if ledger.hits.contains(&cell) {
            HitMarker::Hit
        } else {
            HitMarker::Miss
        });
    }
    match board {
        Board::Own => None,
        Board::Opponent => session.marks.get(cell).map(HitMarker::from),
    }
}

fn marker_symbol(marker: HitMarker) -> &'static str {
    match marker {
        HitMarker::Miss => "o",
        HitMarker::Hit => "X",
        HitMarker::HeadHit => "@",
        HitMarker::NextTarget => "+",
        HitMarker::PlannedHit => "?",
    }
}

/// One board as a text grid with row and column headers.
pub fn render_board(session: &Session, board: Board) -> String {
    draw_board(session, board, |_| None)
}

/// Own board with a candidate plane drawn over it: `#` where it fits,
/// `!` on every cell when it does not.
pub fn render_preview(session: &Session, plane: &PlaneFootprint, valid: bool) -> String {
    let symbol = if valid { "#" } else { "!" };
    let mut out = format!("Preview at {} ({})\n", plane.head(), if valid { "fits" } else { "blocked" });
    out.push_str(&draw_board(session, Board::Own, |cell| plane.contains(cell).then_some(symbol)));
    out
}

fn draw_board(
    session: &Session,
    board: Board,
    overlay: impl Fn(CellIndex) -> Option<&'static str>,
) -> String {
    let mut out = String::from("   ");
    for col in 0..GRID_SIZE {
        let _ = write!(out, "{col:<2}");
    }
    out.push('\n');

    for row in 0..GRID_SIZE {
        let _ = write!(out, "{row:<3}");
        for col in 0..GRID_SIZE {
            let cell = row * GRID_SIZE + col;
            // Priorité au marqueur de tir, puis à l'avion.
            let symbol = match (overlay(cell), marker_at(session, board, cell)) {
                (Some(symbol), _) => symbol.to_string(),
                (None, Some(marker)) => marker_symbol(marker).to_string(),
                (None, None) => match (board, session.own_grid.owner(cell)) {
                    (Board::Own, Some(plane)) => plane.to_string(),
                    _ => ".".to_string(),
                },
            };
            let _ = write!(out, "{symbol:<2}");
        }
        out.push('\n');
    }
    out
}

/// Short description of what the player should do next.
pub fn status_line(session: &Session) -> String {
    match session.phase() {
        Phase::Disconnected => "Connecting to server...".to_string(),
        Phase::Connecting => "Create a room or join one".to_string(),
        Phase::Waiting { room_id } => format!(
            "Room ID: {} - waiting for opponent to join...",
            room_id.as_deref().unwrap_or("?")
        ),
        Phase::Placing { ready: true, .. } => "Waiting for opponent...".to_string(),
        Phase::Placing { planes_placed, .. } => {
            format!("Place your planes ({planes_placed}/{PLANE_COUNT})")
        }
        Phase::Battling { my_turn: true } => "Your turn to attack!".to_string(),
        Phase::Battling { my_turn: false } => "Opponent's turn...".to_string(),
        Phase::Over { .. } => match session.won() {
            Some(true) => "Game Over! You Won!".to_string(),
            _ => "Game Over! Opponent Won!".to_string(),
        },
    }
}

pub fn head_hit_summary(session: &Session) -> String {
    format!(
        "Your Head Hits: {}/{HEADS_TO_WIN}  Opponent Head Hits: {}/{HEADS_TO_WIN}",
        session.my_head_hits, session.opponent_head_hits
    )
}

/// Status, tallies and both boards.
pub fn render_session(session: &Session) -> String {
    let mut out = status_line(session);
    out.push('\n');
    if session.is_placing() {
        out.push_str(&format!("Rotation: {}°\n", session.orientation.degrees()));
    } else if !session.placement_phase {
        out.push_str(&head_hit_summary(session));
        out.push('\n');
        if let Some(position) = session.last_attacked.and_then(Position::from_index) {
            out.push_str(&format!("Last shot: {},{}\n", position.row, position.col));
        }
    }
    out.push_str("Your Grid\n");
    out.push_str(&render_board(session, Board::Own));
    out.push_str("Opponent's Grid\n");
    out.push_str(&render_board(session, Board::Opponent));
    out
}
