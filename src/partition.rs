//! Splitting a grid into independent regions.
//!
//! Burnt squares can never be crossed again, so groups of unburnt squares
//! that do not touch (diagonals count as touching) are separate games. The
//! partitioner first strips fully burnt border rows and columns, then
//! flood-fills the remaining unburnt squares into components, and crops
//! each component into its own grid.

use crate::board::{Coord, Grid, Square};
use crate::movegen::DIRECTIONS;

/// A sub-grid together with where its top-left square sits in the grid it
/// was cut from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub grid: Grid,
    pub offset: Coord,
}

impl Region {
    /// Region covering the whole grid.
    pub fn whole(grid: &Grid) -> Region {
        Region {
            grid: grid.clone(),
            offset: Coord::new(0, 0),
        }
    }

    /// A region holding at most one unburnt square cannot produce a move.
    pub fn is_degenerate(&self) -> bool {
        self.grid.unburnt_count() <= 1
    }
}

/// Strips every outer row and column that is entirely burnt, repeating
/// until none is left. The result is shifted so its top-left is `(0, 0)`;
/// `offset` records the shift. An all-burnt grid becomes a single burnt
/// square.
pub fn trim(grid: &Grid) -> Region {
    let mut bounds: Option<(Coord, Coord)> = None;
    for c in grid.coords() {
        if grid.at(c).is_some_and(|s| !s.is_burnt()) {
            bounds = Some(match bounds {
                None => (c, c),
                Some((lo, hi)) => (
                    Coord::new(lo.x.min(c.x), lo.y.min(c.y)),
                    Coord::new(hi.x.max(c.x), hi.y.max(c.y)),
                ),
            });
        }
    }

    match bounds {
        Some((lo, hi)) => Region {
            grid: grid.crop(lo, hi.x - lo.x + 1, hi.y - lo.y + 1),
            offset: lo,
        },
        None => Region {
            grid: Grid::filled(1, 1, Square::Burnt),
            offset: Coord::new(0, 0),
        },
    }
}

/// Labels every unburnt square of `grid` with its 8-connected component.
///
/// Returns the per-square labels (row-major, `None` for burnt squares) and
/// the number of components. Labels are assigned in row-major seed order.
pub fn label_components(grid: &Grid) -> (Vec<Option<usize>>, usize) {
    let columns = grid.columns();
    let mut labels: Vec<Option<usize>> = vec![None; columns * grid.rows()];
    let mut count = 0;
    let mut stack = Vec::new();

    for seed in grid.coords() {
        let idx = seed.y * columns + seed.x;
        if labels[idx].is_some() || grid.at(seed).map_or(true, |s| s.is_burnt()) {
            continue;
        }
        labels[idx] = Some(count);
        stack.push(seed);
        while let Some(c) = stack.pop() {
            for (dx, dy) in DIRECTIONS {
                let Some(n) = c.offset(dx, dy) else { continue };
                match grid.at(n) {
                    Some(s) if !s.is_burnt() => {
                        let n_idx = n.y * columns + n.x;
                        if labels[n_idx].is_none() {
                            labels[n_idx] = Some(count);
                            stack.push(n);
                        }
                    }
                    _ => {}
                }
            }
        }
        count += 1;
    }

    (labels, count)
}

/// Splits the trimmed grid into one region per connected component.
///
/// Each region is cropped to its component's bounding box; squares inside
/// the box that belong to another component are burnt. Offsets are
/// relative to the grid passed in.
pub fn components(grid: &Grid) -> Vec<Region> {
    let trimmed = trim(grid);
    let inner = &trimmed.grid;
    let columns = inner.columns();
    let (labels, count) = label_components(inner);

    let mut regions = Vec::with_capacity(count);
    for label in 0..count {
        let mut lo = Coord::new(usize::MAX, usize::MAX);
        let mut hi = Coord::new(0, 0);
        for c in inner.coords() {
            if labels[c.y * columns + c.x] == Some(label) {
                lo = Coord::new(lo.x.min(c.x), lo.y.min(c.y));
                hi = Coord::new(hi.x.max(c.x), hi.y.max(c.y));
            }
        }

        let mut sub = inner.crop(lo, hi.x - lo.x + 1, hi.y - lo.y + 1);
        for c in sub.coords().collect::<Vec<_>>() {
            let outer = c.translated(lo);
            if labels[outer.y * columns + outer.x] != Some(label) {
                sub.burn(c);
            }
        }

        regions.push(Region {
            grid: sub,
            offset: lo.translated(trimmed.offset),
        });
    }

    regions
}

/// Independent regions worth evaluating: every component except the
/// degenerate single-square ones.
pub fn partition(grid: &Grid) -> Vec<Region> {
    components(grid)
        .into_iter()
        .filter(|r| !r.is_degenerate())
        .collect()
}
