//! Grid symmetries: reflections and rotations.
//!
//! Every transform is defined on single coordinates as a pure function of
//! `(x, y, columns, rows)` and lifted from there to whole grids and moves.
//! Variants are ordered so that the four transforms valid on any rectangle
//! come first; the rest need `columns == rows`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Coord, Grid, Move};

/// A symmetry of the grid. The discriminant is the tie-break index used by
/// the canonicalizer (lower wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Transform {
    Identity = 0,
    /// Mirror columns: `x -> columns - 1 - x`.
    FlipHorizontal = 1,
    /// Mirror rows: `y -> rows - 1 - y`.
    FlipVertical = 2,
    Rotate180 = 3,
    /// Quarter turn clockwise.
    Rotate90 = 4,
    Rotate270 = 5,
    /// Quarter turn clockwise, then mirror columns (a transpose).
    Rotate90Flip = 6,
    /// Three quarter turns, then mirror columns (the anti-transpose).
    Rotate270Flip = 7,
}

/// All transforms in index order.
pub const ALL_TRANSFORMS: [Transform; 8] = [
    Transform::Identity,
    Transform::FlipHorizontal,
    Transform::FlipVertical,
    Transform::Rotate180,
    Transform::Rotate90,
    Transform::Rotate270,
    Transform::Rotate90Flip,
    Transform::Rotate270Flip,
];

impl Transform {
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The transforms comparable on a `columns x rows` grid: all eight for
    /// squares, the four dimension-preserving ones otherwise.
    pub fn applicable(columns: usize, rows: usize) -> &'static [Transform] {
        if columns == rows {
            &ALL_TRANSFORMS
        } else {
            &ALL_TRANSFORMS[..4]
        }
    }

    /// True for transforms that exchange the column and row extents.
    pub const fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Transform::Rotate90
                | Transform::Rotate270
                | Transform::Rotate90Flip
                | Transform::Rotate270Flip
        )
    }

    /// Dimensions of a `columns x rows` grid after this transform.
    pub const fn dimensions(self, columns: usize, rows: usize) -> (usize, usize) {
        if self.swaps_dimensions() {
            (rows, columns)
        } else {
            (columns, rows)
        }
    }

    /// The transform that undoes this one.
    pub const fn inverse(self) -> Transform {
        match self {
            Transform::Rotate90 => Transform::Rotate270,
            Transform::Rotate270 => Transform::Rotate90,
            other => other,
        }
    }

    /// Maps a coordinate of a `columns x rows` grid.
    pub fn apply_coord(self, c: Coord, columns: usize, rows: usize) -> Coord {
        match self {
            Transform::Identity => c,
            Transform::FlipHorizontal => Coord::new(columns - 1 - c.x, c.y),
            Transform::FlipVertical => Coord::new(c.x, rows - 1 - c.y),
            Transform::Rotate90 => Coord::new(rows - 1 - c.y, c.x),
            Transform::Rotate270 => Coord::new(c.y, columns - 1 - c.x),
            // Two quarter turns; the second sees the already-swapped extents.
            Transform::Rotate180 => {
                let once = Transform::Rotate90.apply_coord(c, columns, rows);
                Transform::Rotate90.apply_coord(once, rows, columns)
            }
            Transform::Rotate90Flip => {
                let turned = Transform::Rotate90.apply_coord(c, columns, rows);
                Transform::FlipHorizontal.apply_coord(turned, rows, columns)
            }
            Transform::Rotate270Flip => {
                let turned = Transform::Rotate270.apply_coord(c, columns, rows);
                Transform::FlipHorizontal.apply_coord(turned, rows, columns)
            }
        }
    }

    /// Returns a new grid holding the transformed image of `grid`.
    pub fn apply_grid(self, grid: &Grid) -> Grid {
        if self == Transform::Identity {
            return grid.clone();
        }
        let (columns, rows) = (grid.columns(), grid.rows());
        let (new_columns, new_rows) = self.dimensions(columns, rows);
        let mut image = Grid::new(new_columns, new_rows);
        for c in grid.coords() {
            if let Some(square) = grid.at(c) {
                image.set(self.apply_coord(c, columns, rows), square);
            }
        }
        image
    }

    /// Maps a move played on a `columns x rows` grid.
    pub fn apply_move(self, mv: Move, columns: usize, rows: usize) -> Move {
        if self == Transform::Identity {
            return mv;
        }
        mv.map_coords(|c| self.apply_coord(c, columns, rows))
    }

    /// Kebab-case name used in protocol output.
    pub const fn name(self) -> &'static str {
        match self {
            Transform::Identity => "identity",
            Transform::FlipHorizontal => "flip-horizontal",
            Transform::FlipVertical => "flip-vertical",
            Transform::Rotate180 => "rotate-180",
            Transform::Rotate90 => "rotate-90",
            Transform::Rotate270 => "rotate-270",
            Transform::Rotate90Flip => "rotate-90-flip",
            Transform::Rotate270Flip => "rotate-270-flip",
        }
    }

    pub fn from_name(s: &str) -> Option<Transform> {
        ALL_TRANSFORMS.iter().copied().find(|t| t.name() == s)
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
