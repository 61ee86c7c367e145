//! Position and move text.
//!
//! A position is written row by row from `y = 0`, rows separated by `/`:
//! `.` empty, `#` burnt, `B` black amazon, `W` white amazon. The 3x2 grid
//! with Black at a2 and White at b1 is `.W./B..`.
//!
//! A move is `<colour><from>-<to>/<burn>` with squares named by column
//! letter and 1-based row, e.g. `Ba2-b2/c2`.

use crate::board::{Color, Coord, Grid, Move, Square};

/// Errors that can occur while parsing position or move text.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("empty position")]
    EmptyPosition,

    #[error("row {0} is empty")]
    EmptyRow(usize),

    #[error("row {row} has {found} squares, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid square character: '{0}'")]
    InvalidSquare(char),

    #[error("invalid move text: '{0}'")]
    InvalidMove(String),

    #[error("invalid colour character: '{0}'")]
    InvalidColor(char),

    #[error("invalid square name: '{0}'")]
    InvalidCoord(String),
}

/// Parses position text into a grid.
pub fn parse_grid(s: &str) -> Result<Grid, NotationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(NotationError::EmptyPosition);
    }

    let mut columns = 0;
    let mut rows = 0;
    let mut squares = Vec::new();
    for (y, row) in s.split('/').enumerate() {
        let before = squares.len();
        for c in row.chars() {
            squares.push(Square::from_symbol(c).ok_or(NotationError::InvalidSquare(c))?);
        }
        let width = squares.len() - before;
        if width == 0 {
            return Err(NotationError::EmptyRow(y));
        }
        if y == 0 {
            columns = width;
        } else if width != columns {
            return Err(NotationError::RaggedRow {
                row: y,
                expected: columns,
                found: width,
            });
        }
        rows += 1;
    }

    Grid::from_squares(columns, rows, squares).ok_or(NotationError::EmptyPosition)
}

fn parse_coord(s: &str) -> Result<Coord, NotationError> {
    Coord::from_name(s).ok_or_else(|| NotationError::InvalidCoord(s.to_string()))
}

/// Parses move text such as `Ba2-b2/c2`.
///
/// Only the syntax is checked here; whether the move is legal on a given
/// grid is up to the caller.
pub fn parse_move(s: &str) -> Result<Move, NotationError> {
    let s = s.trim();
    let invalid = || NotationError::InvalidMove(s.to_string());

    let mut chars = s.chars();
    let symbol = chars.next().ok_or_else(invalid)?;
    let color = Color::from_symbol(symbol).ok_or(NotationError::InvalidColor(symbol))?;

    let rest = chars.as_str();
    let (from, rest) = rest.split_once('-').ok_or_else(invalid)?;
    let (to, burn) = rest.split_once('/').ok_or_else(invalid)?;

    Ok(Move::new(
        color,
        parse_coord(from)?,
        parse_coord(to)?,
        parse_coord(burn)?,
    ))
}

/// Encodes a grid as position text.
pub fn encode_grid(grid: &Grid) -> String {
    grid.to_string()
}
