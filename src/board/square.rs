//! Square states, piece colours, and grid coordinates.
//!
//! A square is identified purely by its `(x, y)` position on a grid; its
//! state is one of empty, occupied by an amazon of some colour, or burnt.

use serde::{Deserialize, Serialize};

/// The colour of an amazon.
///
/// Black is the Left player and White the Right player in every game value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Black,
    White,
}

/// Both colours, Left first.
pub const ALL_COLORS: [Color; 2] = [Color::Black, Color::White];

impl Color {
    /// Returns the other colour.
    pub const fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Returns the uppercase character used in position and move text.
    pub const fn symbol(self) -> char {
        match self {
            Color::Black => 'B',
            Color::White => 'W',
        }
    }

    /// Parses a colour from its character, accepting either case.
    pub fn from_symbol(c: char) -> Option<Color> {
        match c {
            'B' | 'b' => Some(Color::Black),
            'W' | 'w' => Some(Color::White),
            _ => None,
        }
    }
}

/// The state of a single square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Square {
    Empty,
    Amazon(Color),
    Burnt,
}

impl Square {
    /// Returns the character used for this square in position text.
    pub const fn symbol(self) -> char {
        match self {
            Square::Empty => '.',
            Square::Burnt => '#',
            Square::Amazon(color) => color.symbol(),
        }
    }

    /// Parses a square from its position-text character.
    pub fn from_symbol(c: char) -> Option<Square> {
        match c {
            '.' => Some(Square::Empty),
            '#' => Some(Square::Burnt),
            _ => Color::from_symbol(c).map(Square::Amazon),
        }
    }

    /// Four-way code folded into the structural hash.
    pub(crate) const fn hash_code(self) -> u32 {
        match self {
            Square::Burnt => 0,
            Square::Empty => 1,
            Square::Amazon(Color::White) => 2,
            Square::Amazon(Color::Black) => 3,
        }
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Square::Empty)
    }

    pub const fn is_burnt(self) -> bool {
        matches!(self, Square::Burnt)
    }
}

/// A position on a grid. `(0, 0)` is the top-left square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Coord { x, y }
    }

    /// Steps by `(dx, dy)`, returning `None` if either axis goes negative.
    /// The caller still has to check the upper bound against its grid.
    pub fn offset(self, dx: isize, dy: isize) -> Option<Coord> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        Some(Coord { x, y })
    }

    /// Shifts the coordinate by a non-negative translation.
    pub const fn translated(self, by: Coord) -> Coord {
        Coord {
            x: self.x + by.x,
            y: self.y + by.y,
        }
    }

    /// Returns the square name: column letters followed by the 1-based row.
    ///
    /// Columns run `a..z`, then `aa..az`, `ba..` and so on, so every grid
    /// width has names that `from_name` reads back.
    pub fn name(self) -> String {
        let mut letters = Vec::new();
        let mut n = self.x + 1;
        while n > 0 {
            n -= 1;
            letters.push((b'a' + (n % 26) as u8) as char);
            n /= 26;
        }
        letters.reverse();
        let mut name: String = letters.into_iter().collect();
        name.push_str(&(self.y + 1).to_string());
        name
    }

    /// Parses a square name such as `a1`, `c12`, or `ad7`.
    pub fn from_name(s: &str) -> Option<Coord> {
        let split = s.find(|c: char| !c.is_ascii_lowercase())?;
        let (column, row) = s.split_at(split);
        if column.is_empty() || !row.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let mut x: usize = 0;
        for b in column.bytes() {
            x = x.checked_mul(26)?.checked_add((b - b'a') as usize + 1)?;
        }
        let row: usize = row.parse().ok()?;
        if row == 0 {
            return None;
        }
        Some(Coord::new(x - 1, row - 1))
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}
