//! Board representation.
//!
//! Contains the square and colour types, the grid itself, and moves.

pub mod grid;
pub mod moves;
pub mod square;

pub use grid::{Grid, MoveError};
pub use moves::Move;
pub use square::{Color, Coord, Square, ALL_COLORS};
