//! Legal move generation.
//!
//! A move is a queen step to an empty square followed by an arrow shot,
//! also queen-like, from the landing square. The shot may pass through or
//! land on the square the amazon just left.

pub mod queen;

use rand::Rng;

use crate::board::{Color, Grid, Move, Square};

pub use queen::{can_move, reachable, DIRECTIONS};

/// Generates every legal move for the given colour.
///
/// Ordering is stable: pieces row-major, then destinations and burns in
/// `DIRECTIONS` order.
pub fn legal_moves(grid: &Grid, color: Color) -> Vec<Move> {
    let mut moves = Vec::new();
    for from in grid.pieces(color) {
        for to in reachable(grid, from, None) {
            for burn in reachable(grid, to, Some(from)) {
                moves.push(Move::new(color, from, to, burn));
            }
        }
    }
    moves
}

/// Returns true if the colour has at least one legal move.
///
/// Any amazon that can step at all can shoot back at its origin, so a free
/// neighbour is enough.
pub fn has_legal_move(grid: &Grid, color: Color) -> bool {
    grid.pieces(color).into_iter().any(|from| can_move(grid, from))
}

/// Returns true if `mv` is among the moves the generator would produce.
pub fn is_legal(grid: &Grid, mv: &Move) -> bool {
    if grid.at(mv.from) != Some(Square::Amazon(mv.color)) {
        return false;
    }
    reachable(grid, mv.from, None).contains(&mv.to)
        && reachable(grid, mv.to, Some(mv.from)).contains(&mv.burn)
}

/// Picks a uniformly random legal move, or `None` if the colour is stuck.
pub fn random_move(grid: &Grid, color: Color, rng: &mut impl Rng) -> Option<Move> {
    let moves = legal_moves(grid, color);
    if moves.is_empty() {
        return None;
    }
    let idx = rng.gen_range(0..moves.len());
    Some(moves[idx])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Coord;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scenario() -> Grid {
        let mut grid = Grid::new(3, 2);
        grid.place_piece(Coord::new(0, 1), Color::Black);
        grid.place_piece(Coord::new(1, 0), Color::White);
        grid
    }

    #[test]
    fn scenario_black_moves() {
        let grid = scenario();
        let moves = legal_moves(&grid, Color::Black);
        // Destinations a1, b2, c2; each shot may return through a2.
        let from_a1 = moves.iter().filter(|m| m.to == Coord::new(0, 0)).count();
        let from_b2 = moves.iter().filter(|m| m.to == Coord::new(1, 1)).count();
        let from_c2 = moves.iter().filter(|m| m.to == Coord::new(2, 1)).count();
        assert_eq!(from_a1, 2); // a2, b2
        assert_eq!(from_b2, 4); // c1, c2, a2, a1
        assert_eq!(from_c2, 3); // c1, b2, a2
        assert_eq!(moves.len(), 9);
        assert!(moves.iter().all(|m| m.color == Color::Black));
    }

    #[test]
    fn every_generated_move_is_legal_and_applies() {
        let grid = scenario();
        for color in [Color::Black, Color::White] {
            for mv in legal_moves(&grid, color) {
                assert!(is_legal(&grid, &mv), "{} rejected", mv);
                assert!(grid.after_move(&mv).is_ok(), "{} failed to apply", mv);
            }
        }
    }

    #[test]
    fn illegal_moves_are_rejected() {
        let grid = scenario();
        // Not on a queen line.
        let mv = Move::new(Color::Black, Coord::new(0, 1), Coord::new(2, 0), Coord::new(2, 1));
        assert!(!is_legal(&grid, &mv));
        // Wrong colour at the origin.
        let mv = Move::new(Color::White, Coord::new(0, 1), Coord::new(0, 0), Coord::new(0, 1));
        assert!(!is_legal(&grid, &mv));
    }

    #[test]
    fn stuck_colour_has_no_moves() {
        let mut grid = Grid::new(2, 1);
        grid.place_piece(Coord::new(0, 0), Color::Black);
        grid.burn(Coord::new(1, 0));
        assert!(legal_moves(&grid, Color::Black).is_empty());
        assert!(!has_legal_move(&grid, Color::Black));
        assert!(legal_moves(&grid, Color::White).is_empty());
    }

    #[test]
    fn has_legal_move_agrees_with_generator() {
        let grid = scenario();
        for color in [Color::Black, Color::White] {
            assert_eq!(has_legal_move(&grid, color), !legal_moves(&grid, color).is_empty());
        }
    }

    #[test]
    fn random_move_is_legal_and_deterministic() {
        let grid = scenario();
        for seed in 0..20 {
            let a = random_move(&grid, Color::White, &mut StdRng::seed_from_u64(seed)).unwrap();
            let b = random_move(&grid, Color::White, &mut StdRng::seed_from_u64(seed)).unwrap();
            assert_eq!(a, b);
            assert!(is_legal(&grid, &a));
        }
    }
}
