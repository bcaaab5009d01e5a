//! Terminal input.
//!
//! One command per line. Cells are given as an index (`42`) or as
//! `row,col` (`4,2`).

use crate::client::messages::UserCommand;
use crate::config::game::GRID_SIZE;
use crate::error::InputError;
use crate::game::types::{CellIndex, Position};

pub const HELP: &str = "\
commands:
  create            create a room
  join <code>       join a room
  rotate            turn the next plane 90 degrees
  place <cell>      place a plane with its nose on <cell>
  preview <cell>    show where a plane would go and whether it fits
  remove <cell>     remove the plane covering <cell>
  ready             declare the fleet ready
  fire <cell>       attack a cell of the opponent board
  mark <cell>       cycle the mark on a cell of the opponent board
  show              print both boards
  help              print this text";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(UserCommand),
    Preview(CellIndex),
    Show,
    Help,
}

pub fn parse_cell(raw: &str) -> Result<CellIndex, InputError> {
    let bad = || InputError::BadCell(raw.to_string());
    let position = match raw.split_once(',') {
        Some((row, col)) => {
            let row = row.trim().parse::<usize>().map_err(|_| bad())?;
            let col = col.trim().parse::<usize>().map_err(|_| bad())?;
            if row >= GRID_SIZE || col >= GRID_SIZE {
                return Err(bad());
            }
            Position { row, col }
        }
        None => {
            let index = raw.trim().parse::<usize>().map_err(|_| bad())?;
            Position::from_index(index).ok_or_else(bad)?
        }
    };
    Ok(position.index())
}

/// Parse one line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Input>, InputError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let verb = verb.to_ascii_lowercase();
    let arg = words.next();
    let cell = |name: &'static str| -> Result<CellIndex, InputError> {
        parse_cell(arg.ok_or(InputError::MissingArgument(name))?)
    };

    let input = match verb.as_str() {
        "create" => Input::Command(UserCommand::CreateRoom),
        "join" => {
            let code = arg.ok_or(InputError::MissingArgument("join"))?;
            Input::Command(UserCommand::JoinRoom(code.to_string()))
        }
        "rotate" | "r" => Input::Command(UserCommand::Rotate),
        "place" | "p" => Input::Command(UserCommand::Place(cell("place")?)),
        "preview" | "pv" => Input::Preview(cell("preview")?),
        "remove" | "rm" => Input::Command(UserCommand::Remove(cell("remove")?)),
        "ready" => Input::Command(UserCommand::Ready),
        "fire" | "attack" | "f" => Input::Command(UserCommand::Attack(cell("fire")?)),
        "mark" | "m" => Input::Command(UserCommand::Mark(cell("mark")?)),
        "show" | "s" => Input::Show,
        "help" | "?" => Input::Help,
        _ => return Err(InputError::UnknownCommand(verb)),
    };
    Ok(Some(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_forms() {
        assert_eq!(parse_cell("42"), Ok(42));
        assert_eq!(parse_cell("4,2"), Ok(42));
        assert_eq!(parse_cell("9, 9"), Ok(99));
        assert_eq!(parse_cell("100"), Err(InputError::BadCell("100".into())));
        assert_eq!(parse_cell("10,0"), Err(InputError::BadCell("10,0".into())));
        assert!(parse_cell("a,b").is_err());
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_line("   "), Ok(None));
        assert_eq!(parse_line("create"), Ok(Some(Input::Command(UserCommand::CreateRoom))));
        assert_eq!(
            parse_line("join room_3"),
            Ok(Some(Input::Command(UserCommand::JoinRoom("room_3".into()))))
        );
        assert_eq!(parse_line("PLACE 5,5"), Ok(Some(Input::Command(UserCommand::Place(55)))));
        assert_eq!(parse_line("fire 7"), Ok(Some(Input::Command(UserCommand::Attack(7)))));
        assert_eq!(parse_line("mark 0,3"), Ok(Some(Input::Command(UserCommand::Mark(3)))));
        assert_eq!(parse_line("show"), Ok(Some(Input::Show)));
        assert_eq!(parse_line("preview 2,3"), Ok(Some(Input::Preview(23))));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_line("place"), Err(InputError::MissingArgument("place")));
        assert_eq!(parse_line("join"), Err(InputError::MissingArgument("join")));
        assert_eq!(parse_line("preview"), Err(InputError::MissingArgument("preview")));
        assert_eq!(parse_line("dance"), Err(InputError::UnknownCommand("dance".into())));
    }
}
