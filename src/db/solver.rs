//! Full game-tree solving through the endgame database.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::board::Grid;
use crate::cgt::builder::expand;
use crate::cgt::GameValue;
use crate::symmetry::canonicalize;

use super::{CacheError, EndgameDatabase, EndgameStore};

/// Computes game values by expanding every move, storing each solved
/// position so later searches reuse it.
pub struct Solver<'a, S> {
    db: &'a EndgameDatabase<S>,
    stored: AtomicUsize,
}

impl<'a, S: EndgameStore> Solver<'a, S> {
    pub fn new(db: &'a EndgameDatabase<S>) -> Self {
        Solver {
            db,
            stored: AtomicUsize::new(0),
        }
    }

    /// Number of entries this solver has written.
    pub fn stored(&self) -> usize {
        self.stored.load(Ordering::Relaxed)
    }

    /// Returns the reduced value of `grid` with moves on `grid`.
    ///
    /// The position is solved in its canonical frame. Each child position
    /// goes through the same cache, so transpositions and symmetric
    /// positions are expanded only once.
    pub fn solve(&self, grid: &Grid) -> Result<GameValue, CacheError> {
        let canon = canonicalize(grid);
        let value = match self.db.lookup(canon.hash, &canon.grid)? {
            Some(value) => value,
            None => {
                let value = expand(&canon.grid, |next| self.solve(next))?.simplify();
                match self.db.store(canon.hash, &canon.grid, &value) {
                    Ok(()) => {
                        self.stored.fetch_add(1, Ordering::Relaxed);
                    }
                    // Another worker got there first with the same value.
                    Err(CacheError::AlreadyPresent(_)) => {}
                    Err(e) => return Err(e),
                }
                value
            }
        };
        Ok(value.map_moves(&|mv| canon.restore_move(mv)))
    }
}
