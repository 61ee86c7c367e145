//! Queen-ray scanning shared by amazon travel and arrow shots.

use crate::board::{Coord, Grid, Square};

/// The eight queen directions, clockwise from north. The order is fixed so
/// that generated move lists are reproducible.
pub const DIRECTIONS: [(isize, isize); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Returns every square a queen on `from` can reach.
///
/// Each ray stops before the first square that is off-grid, burnt, or
/// occupied. `skip`, when given, is treated as empty even if the grid says
/// otherwise: an arrow fired after a move may pass through the square the
/// amazon just vacated.
pub fn reachable(grid: &Grid, from: Coord, skip: Option<Coord>) -> Vec<Coord> {
    let mut out = Vec::new();
    for (dx, dy) in DIRECTIONS {
        let mut cur = from;
        while let Some(next) = cur.offset(dx, dy) {
            let open = match grid.at(next) {
                Some(Square::Empty) => true,
                Some(_) => skip == Some(next),
                None => false,
            };
            if !open {
                break;
            }
            out.push(next);
            cur = next;
        }
    }
    out
}

/// Returns true if at least one neighbouring square is open.
pub fn can_move(grid: &Grid, from: Coord) -> bool {
    DIRECTIONS.iter().any(|&(dx, dy)| {
        from.offset(dx, dy)
            .and_then(|c| grid.at(c))
            .is_some_and(|s| s.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color;

    #[test]
    fn open_board_reaches_all_rays() {
        let mut grid = Grid::new(3, 3);
        grid.place_piece(Coord::new(1, 1), Color::Black);
        let reach = reachable(&grid, Coord::new(1, 1), None);
        assert_eq!(reach.len(), 8);
    }

    #[test]
    fn blocked_by_pieces_and_burns() {
        let mut grid = Grid::new(4, 1);
        grid.place_piece(Coord::new(0, 0), Color::Black);
        grid.burn(Coord::new(2, 0));
        assert_eq!(reachable(&grid, Coord::new(0, 0), None), vec![Coord::new(1, 0)]);
    }

    #[test]
    fn skip_square_is_transparent() {
        // Amazon leaving b1 for d1: the arrow from d1 flies back through b1.
        let mut grid = Grid::new(4, 1);
        grid.place_piece(Coord::new(1, 0), Color::Black);
        let from_dest = reachable(&grid, Coord::new(3, 0), Some(Coord::new(1, 0)));
        assert_eq!(
            from_dest,
            vec![Coord::new(2, 0), Coord::new(1, 0), Coord::new(0, 0)]
        );
        let without_skip = reachable(&grid, Coord::new(3, 0), None);
        assert_eq!(without_skip, vec![Coord::new(2, 0)]);
    }

    #[test]
    fn can_move_detects_enclosure() {
        let mut grid = Grid::new(2, 2);
        grid.place_piece(Coord::new(0, 0), Color::White);
        assert!(can_move(&grid, Coord::new(0, 0)));
        grid.burn(Coord::new(1, 0));
        grid.burn(Coord::new(0, 1));
        grid.burn(Coord::new(1, 1));
        assert!(!can_move(&grid, Coord::new(0, 0)));
    }
}
