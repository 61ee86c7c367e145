//! Game-tree construction from positions.

use std::convert::Infallible;

use crate::board::{Color, Grid};
use crate::movegen::legal_moves;

use super::value::GameValue;

/// Expands one level of the game tree rooted at `grid`.
///
/// Every legal Black move becomes a Left option and every legal White move
/// a Right option, in move generation order. `child` evaluates the
/// position after each move. A child structurally equal to an option
/// already on the same side is not added again.
pub(crate) fn expand<E, F>(grid: &Grid, mut child: F) -> Result<GameValue, E>
where
    F: FnMut(&Grid) -> Result<GameValue, E>,
{
    let mut value = GameValue::zero();
    for color in [Color::Black, Color::White] {
        for mv in legal_moves(grid, color) {
            let mut next = grid.clone();
            next.play(&mv);
            let option = child(&next)?.with_origin(mv);
            match color {
                Color::Black => value.push_left(option),
                Color::White => value.push_right(option),
            };
        }
    }
    Ok(value)
}

/// Builds the full, unreduced game tree of a position.
pub fn build_tree(grid: &Grid) -> GameValue {
    let result: Result<GameValue, Infallible> = expand(grid, |next| Ok(build_tree(next)));
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

/// Builds the reduced game value of a position, simplifying every subtree
/// as soon as it is complete.
pub fn build_value(grid: &Grid) -> GameValue {
    let result: Result<GameValue, Infallible> = expand(grid, |next| Ok(build_value(next)));
    match result {
        Ok(value) => value.simplify(),
        Err(never) => match never {},
    }
}
