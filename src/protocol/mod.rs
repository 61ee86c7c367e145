//! Engine protocol handling.
//!
//! Position and move text, and the command parser for the main loop.

pub mod notation;
pub mod parser;

pub use notation::{encode_grid, parse_grid, parse_move, NotationError};
pub use parser::{parse_command, Command};
