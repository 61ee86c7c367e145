//! Query-time evaluation from the endgame database.
//!
//! Evaluation never builds new game trees. A position is known only if it,
//! or every independent region it splits into, is already cached.

use std::fmt;
use std::str::FromStr;

use crate::board::Grid;
use crate::cgt::GameValue;
use crate::partition::partition;
use crate::symmetry::canonicalize;

use super::{CacheError, EndgameDatabase, EndgameStore};

/// Result of looking a position up in the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// The value, with moves expressed on the grid that was evaluated.
    Known(GameValue),
    /// Some part of the position has never been solved.
    Unknown,
}

impl Evaluation {
    pub fn is_known(&self) -> bool {
        matches!(self, Evaluation::Known(_))
    }

    pub fn known(self) -> Option<GameValue> {
        match self {
            Evaluation::Known(value) => Some(value),
            Evaluation::Unknown => None,
        }
    }
}

/// How the values of independent regions are merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CombineMode {
    /// Concatenate the regions' option lists.
    #[default]
    Union,
    /// Disjunctive sum of the region values.
    Sum,
}

impl CombineMode {
    pub const fn name(self) -> &'static str {
        match self {
            CombineMode::Union => "union",
            CombineMode::Sum => "sum",
        }
    }
}

impl fmt::Display for CombineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CombineMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "union" => Ok(CombineMode::Union),
            "sum" => Ok(CombineMode::Sum),
            _ => Err(format!("unknown combine mode '{}'", s)),
        }
    }
}

/// Merges region values into one unreduced value.
pub fn combine(values: Vec<GameValue>, mode: CombineMode) -> GameValue {
    match mode {
        CombineMode::Union => {
            let mut left = Vec::new();
            let mut right = Vec::new();
            for value in values {
                left.extend(value.left);
                right.extend(value.right);
            }
            GameValue::from_options(left, right)
        }
        CombineMode::Sum => values
            .into_iter()
            .reduce(|acc, value| acc.plus(&value))
            .unwrap_or_default(),
    }
}

/// Evaluates `grid` from cached values.
///
/// A cached value for the whole position is used directly. Otherwise the
/// position is partitioned and each region evaluated in turn; regions that
/// cannot move contribute nothing, and the position is unknown as soon as
/// one region is.
pub fn evaluate<S: EndgameStore>(
    grid: &Grid,
    db: &EndgameDatabase<S>,
    mode: CombineMode,
) -> Result<Evaluation, CacheError> {
    let canon = canonicalize(grid);
    if let Some(value) = db.lookup(canon.hash, &canon.grid)? {
        return Ok(Evaluation::Known(
            value.map_moves(&|mv| canon.restore_move(mv)),
        ));
    }

    let regions = partition(grid);
    match regions.as_slice() {
        [] => return Ok(Evaluation::Known(GameValue::zero().simplify())),
        [only] if only.grid == *grid => return Ok(Evaluation::Unknown),
        _ => {}
    }

    let mut values = Vec::with_capacity(regions.len());
    for region in &regions {
        match evaluate(&region.grid, db, mode)? {
            Evaluation::Known(value) => {
                values.push(value.map_moves(&|mv| mv.translated(region.offset)));
            }
            Evaluation::Unknown => return Ok(Evaluation::Unknown),
        }
    }

    Ok(Evaluation::Known(combine(values, mode).simplify()))
}
