//! Engine command parser.
//!
//! Parses incoming protocol lines into structured `Command` variants that
//! the engine main loop can dispatch on.

use log::warn;

use crate::board::{Color, Grid, Move};

use super::notation::{parse_grid, parse_move};

/// A parsed command sent to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Reset engine state for a new game.
    NewGame,

    /// Set the current position from position text.
    Position { grid: Grid },

    /// List legal moves, for one colour or both.
    Moves { color: Option<Color> },

    /// Apply a move to the current position.
    Play { mv: Move },

    /// Report the canonical form of the current position.
    Canonical,

    /// Report the independent regions of the current position.
    Partitions,

    /// Look the current position up in the database.
    Evaluate,

    /// Solve the current position, filling the database.
    Solve,

    /// Pick a move for the given colour (Black if omitted).
    Go { color: Option<Color> },

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (&first, rest) = tokens.split_first()?;

    match first {
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newgame" => Some(Command::NewGame),
        "canonical" => Some(Command::Canonical),
        "partitions" => Some(Command::Partitions),
        "evaluate" => Some(Command::Evaluate),
        "solve" => Some(Command::Solve),

        "setoption" => parse_setoption(&tokens),
        "position" => parse_position(rest),
        "play" => parse_play(rest),
        "moves" => parse_color_arg("moves", rest).map(|color| Command::Moves { color }),
        "go" => parse_color_arg("go", rest).map(|color| Command::Go { color }),

        other => {
            warn!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");

    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                warn!("malformed setoption: empty name");
                return None;
            }
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name_parts.join(" "), value)
        }
        None => (tokens[2..].join(" "), None),
    };

    Some(Command::SetOption { name, value })
}

/// Parses `position <text>`.
fn parse_position(args: &[&str]) -> Option<Command> {
    let Some(text) = args.first() else {
        warn!("malformed position: expected 'position <text>'");
        return None;
    };
    match parse_grid(text) {
        Ok(grid) => Some(Command::Position { grid }),
        Err(e) => {
            warn!("invalid position '{}': {}", text, e);
            None
        }
    }
}

/// Parses `play <move>`.
fn parse_play(args: &[&str]) -> Option<Command> {
    let Some(text) = args.first() else {
        warn!("malformed play: expected 'play <move>'");
        return None;
    };
    match parse_move(text) {
        Ok(mv) => Some(Command::Play { mv }),
        Err(e) => {
            warn!("invalid move '{}': {}", text, e);
            None
        }
    }
}

/// Parses the optional `b|w` argument of `moves` and `go`.
///
/// The outer `None` means the argument was malformed.
fn parse_color_arg(command: &str, args: &[&str]) -> Option<Option<Color>> {
    let Some(arg) = args.first() else {
        return Some(None);
    };
    let color = match arg.to_ascii_lowercase().as_str() {
        "b" | "black" => Color::Black,
        "w" | "white" => Color::White,
        _ => {
            warn!("invalid colour for {}: '{}'", command, arg);
            return None;
        }
    };
    Some(Some(color))
}
