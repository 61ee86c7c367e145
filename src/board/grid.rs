//! The rectangular playing grid.
//!
//! A `Grid` owns its squares outright: copying, cropping, and transforming
//! always produce an independent grid, so no two grids ever alias.

use std::fmt;

use thiserror::Error;

use crate::movegen;

use super::moves::Move;
use super::square::{Color, Coord, Square};

/// Errors raised when a move does not fit the grid it is applied to.
///
/// These indicate a broken caller contract; the grid is left untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("square {0} is outside the grid")]
    OutOfRange(Coord),

    #[error("no {color:?} amazon on {at}")]
    NoPiece { color: Color, at: Coord },

    #[error("destination {0} is not empty")]
    Blocked(Coord),

    #[error("burn square {0} is not empty")]
    BurnBlocked(Coord),

    #[error("move {0} is not legal in this position")]
    Illegal(Move),
}

/// A `columns x rows` grid of squares stored in row-major order.
///
/// Ordering compares dimensions first and then squares; the canonicalizer
/// uses it to break hash ties deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Grid {
    columns: usize,
    rows: usize,
    squares: Vec<Square>,
}

impl Grid {
    /// Creates an empty grid. Both dimensions must be at least 1.
    pub fn new(columns: usize, rows: usize) -> Self {
        Self::filled(columns, rows, Square::Empty)
    }

    /// Creates a grid where every square has the given state.
    pub fn filled(columns: usize, rows: usize, square: Square) -> Self {
        assert!(columns >= 1 && rows >= 1, "grid dimensions must be at least 1x1");
        Grid {
            columns,
            rows,
            squares: vec![square; columns * rows],
        }
    }

    /// Builds a grid from row-major squares. Returns `None` if the square
    /// count does not match the dimensions.
    pub fn from_squares(columns: usize, rows: usize, squares: Vec<Square>) -> Option<Self> {
        if columns == 0 || rows == 0 || squares.len() != columns * rows {
            return None;
        }
        Some(Grid {
            columns,
            rows,
            squares,
        })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn is_square(&self) -> bool {
        self.columns == self.rows
    }

    /// Row-major view of all squares.
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    /// Returns true if the signed coordinate lies on the grid.
    pub fn contains(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.columns && (y as usize) < self.rows
    }

    /// Returns the square at `(x, y)`, or `None` when the probe is off-grid.
    pub fn get(&self, x: isize, y: isize) -> Option<Square> {
        if !self.contains(x, y) {
            return None;
        }
        Some(self.squares[y as usize * self.columns + x as usize])
    }

    /// Returns the square at an unsigned coordinate, or `None` when off-grid.
    pub fn at(&self, c: Coord) -> Option<Square> {
        if c.x >= self.columns || c.y >= self.rows {
            return None;
        }
        Some(self.squares[self.index(c)])
    }

    /// Returns true if `(x, y)` is on the grid and empty.
    pub fn is_empty(&self, x: isize, y: isize) -> bool {
        matches!(self.get(x, y), Some(Square::Empty))
    }

    fn index(&self, c: Coord) -> usize {
        c.y * self.columns + c.x
    }

    /// Overwrites a square. Panics if `c` is off-grid.
    pub(crate) fn set(&mut self, c: Coord, square: Square) {
        assert!(
            c.x < self.columns && c.y < self.rows,
            "coordinate {} outside {}x{} grid",
            c,
            self.columns,
            self.rows
        );
        let idx = self.index(c);
        self.squares[idx] = square;
    }

    /// Burns a square, whatever it held before.
    pub fn burn(&mut self, c: Coord) {
        self.set(c, Square::Burnt);
    }

    /// Places an amazon. Returns false if the square is not empty or off-grid.
    pub fn place_piece(&mut self, c: Coord, color: Color) -> bool {
        match self.at(c) {
            Some(Square::Empty) => {
                self.set(c, Square::Amazon(color));
                true
            }
            _ => false,
        }
    }

    /// Removes and returns the amazon at `c`, if there is one.
    pub fn remove_piece(&mut self, c: Coord) -> Option<Color> {
        match self.at(c) {
            Some(Square::Amazon(color)) => {
                self.set(c, Square::Empty);
                Some(color)
            }
            _ => None,
        }
    }

    /// Coordinates of every amazon of the given colour, row-major.
    pub fn pieces(&self, color: Color) -> Vec<Coord> {
        self.coords()
            .filter(|&c| self.at(c) == Some(Square::Amazon(color)))
            .collect()
    }

    /// All coordinates of the grid in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let columns = self.columns;
        (0..self.rows).flat_map(move |y| (0..columns).map(move |x| Coord::new(x, y)))
    }

    /// Number of squares that are not burnt.
    pub fn unburnt_count(&self) -> usize {
        self.squares.iter().filter(|s| !s.is_burnt()).count()
    }

    pub fn is_all_burnt(&self) -> bool {
        self.squares.iter().all(|s| s.is_burnt())
    }

    /// Copies the `columns x rows` window whose top-left corner is `origin`.
    pub fn crop(&self, origin: Coord, columns: usize, rows: usize) -> Grid {
        assert!(
            origin.x + columns <= self.columns && origin.y + rows <= self.rows,
            "crop window exceeds grid"
        );
        let mut squares = Vec::with_capacity(columns * rows);
        for y in origin.y..origin.y + rows {
            let start = y * self.columns + origin.x;
            squares.extend_from_slice(&self.squares[start..start + columns]);
        }
        Grid {
            columns,
            rows,
            squares,
        }
    }

    /// Plays a move without validation: vacate, occupy, burn.
    ///
    /// Only for moves produced by the move generator against this grid.
    pub(crate) fn play(&mut self, mv: &Move) {
        self.set(mv.from, Square::Empty);
        self.set(mv.to, Square::Amazon(mv.color));
        self.set(mv.burn, Square::Burnt);
    }

    /// Applies a move after checking it against this grid.
    ///
    /// The amazon and its arrow must both travel along clear queen lines;
    /// anything the move generator would not produce is rejected.
    pub fn apply_move(&mut self, mv: &Move) -> Result<(), MoveError> {
        for c in [mv.from, mv.to, mv.burn] {
            if self.at(c).is_none() {
                return Err(MoveError::OutOfRange(c));
            }
        }
        if self.at(mv.from) != Some(Square::Amazon(mv.color)) {
            return Err(MoveError::NoPiece {
                color: mv.color,
                at: mv.from,
            });
        }
        if mv.to == mv.from || self.at(mv.to) != Some(Square::Empty) {
            return Err(MoveError::Blocked(mv.to));
        }
        if mv.burn == mv.to || (mv.burn != mv.from && self.at(mv.burn) != Some(Square::Empty)) {
            return Err(MoveError::BurnBlocked(mv.burn));
        }
        if !movegen::is_legal(self, mv) {
            return Err(MoveError::Illegal(*mv));
        }
        self.play(mv);
        Ok(())
    }

    /// Returns a copy of the grid with the move applied.
    pub fn after_move(&self, mv: &Move) -> Result<Grid, MoveError> {
        let mut next = self.clone();
        next.apply_move(mv)?;
        Ok(next)
    }
}

impl fmt::Display for Grid {
    /// Position text: rows top to bottom separated by `/`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.squares.chunks(self.columns).enumerate() {
            if y > 0 {
                f.write_str("/")?;
            }
            for square in row {
                write!(f, "{}", square.symbol())?;
            }
        }
        Ok(())
    }
}
