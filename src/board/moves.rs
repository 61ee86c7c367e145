//! Amazon moves: travel like a queen, then shoot an arrow that burns.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::square::{Color, Coord};

/// A complete move: the mover's colour, where it starts, where it lands,
/// and which square it burns afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub color: Color,
    pub from: Coord,
    pub to: Coord,
    pub burn: Coord,
}

impl Move {
    pub const fn new(color: Color, from: Coord, to: Coord, burn: Coord) -> Self {
        Move {
            color,
            from,
            to,
            burn,
        }
    }

    /// Shifts all three squares by a non-negative offset, mapping a move on
    /// a cropped sub-grid back onto the grid it was cut from.
    pub fn translated(self, by: Coord) -> Move {
        Move {
            color: self.color,
            from: self.from.translated(by),
            to: self.to.translated(by),
            burn: self.burn.translated(by),
        }
    }

    /// Applies a coordinate mapping to all three squares.
    pub fn map_coords<F: Fn(Coord) -> Coord>(self, f: F) -> Move {
        Move {
            color: self.color,
            from: f(self.from),
            to: f(self.to),
            burn: f(self.burn),
        }
    }
}

impl fmt::Display for Move {
    /// Move text, e.g. `Ba2-b2/c2`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}-{}/{}",
            self.color.symbol(),
            self.from,
            self.to,
            self.burn
        )
    }
}
