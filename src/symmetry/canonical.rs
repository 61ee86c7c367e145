//! Canonical forms of grids under their symmetry group.
//!
//! The canonical representative is the transformed image with the smallest
//! structural hash. Two grids that are images of each other therefore share
//! one canonical grid and one hash, which is the key of the endgame
//! database.

use crate::board::{Grid, Move};

use super::transform::Transform;

/// The 32-bit key under which a canonical position is cached.
pub type PositionKey = u32;

/// The result of canonicalizing a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canonical {
    /// Structural hash of `grid`.
    pub hash: PositionKey,
    /// The transform that maps the input grid onto `grid`.
    pub transform: Transform,
    pub grid: Grid,
}

impl Canonical {
    /// Maps a move expressed on the canonical grid back onto the grid that
    /// was canonicalized.
    pub fn restore_move(&self, mv: Move) -> Move {
        self.transform
            .inverse()
            .apply_move(mv, self.grid.columns(), self.grid.rows())
    }

    /// Maps a move on the original grid onto the canonical grid.
    pub fn canonical_move(&self, mv: Move) -> Move {
        let (columns, rows) = self
            .transform
            .inverse()
            .dimensions(self.grid.columns(), self.grid.rows());
        self.transform.apply_move(mv, columns, rows)
    }
}

/// Polynomial hash over squares in row-major order, then the dimensions.
pub fn structural_hash(grid: &Grid) -> PositionKey {
    let mut hash: u32 = 17;
    for square in grid.squares() {
        hash = hash.wrapping_mul(31).wrapping_add(square.hash_code());
    }
    hash = hash.wrapping_mul(31).wrapping_add(grid.columns() as u32);
    hash.wrapping_mul(31).wrapping_add(grid.rows() as u32)
}

/// Finds the symmetry image of `grid` with the minimum hash.
///
/// Ties go to the smaller grid by value and then to the lower transform
/// index, so the choice never depends on which image was passed in.
pub fn canonicalize(grid: &Grid) -> Canonical {
    let mut best = Canonical {
        hash: structural_hash(grid),
        transform: Transform::Identity,
        grid: grid.clone(),
    };

    for &transform in &Transform::applicable(grid.columns(), grid.rows())[1..] {
        let image = transform.apply_grid(grid);
        let hash = structural_hash(&image);
        if beats(hash, &image, &best) {
            best = Canonical {
                hash,
                transform,
                grid: image,
            };
        }
    }

    best
}

/// True when an image with `hash` replaces the current best. Equal images
/// never replace it, so the lower transform index is kept.
fn beats(hash: PositionKey, image: &Grid, best: &Canonical) -> bool {
    hash < best.hash || (hash == best.hash && image < &best.grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Color, Coord};
    use crate::symmetry::ALL_TRANSFORMS;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_grid(rng: &mut StdRng, columns: usize, rows: usize) -> Grid {
        let mut grid = Grid::new(columns, rows);
        for c in grid.coords().collect::<Vec<_>>() {
            match rng.gen_range(0..6) {
                0 => grid.burn(c),
                1 => {
                    grid.place_piece(c, Color::Black);
                }
                2 => {
                    grid.place_piece(c, Color::White);
                }
                _ => {}
            }
        }
        grid
    }

    #[test]
    fn hash_depends_on_dimensions() {
        assert_ne!(structural_hash(&Grid::new(3, 2)), structural_hash(&Grid::new(2, 3)));
    }

    #[test]
    fn canonicalize_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(7);
        for (columns, rows) in [(3, 3), (4, 2), (2, 5), (4, 4)] {
            for _ in 0..25 {
                let grid = random_grid(&mut rng, columns, rows);
                let first = canonicalize(&grid);
                let second = canonicalize(&first.grid);
                assert_eq!(second.hash, first.hash);
                assert_eq!(second.grid, first.grid);
                assert_eq!(second.transform, Transform::Identity);
            }
        }
    }

    #[test]
    fn symmetric_images_share_canonical_form() {
        let mut rng = StdRng::seed_from_u64(11);
        for (columns, rows) in [(3, 3), (4, 2), (3, 5), (5, 5)] {
            for _ in 0..25 {
                let grid = random_grid(&mut rng, columns, rows);
                let canon = canonicalize(&grid);
                for &t in Transform::applicable(columns, rows) {
                    let image = canonicalize(&t.apply_grid(&grid));
                    assert_eq!(image.hash, canon.hash, "{} of {}", t, grid);
                    assert_eq!(image.grid, canon.grid, "{} of {}", t, grid);
                }
            }
        }
    }

    #[test]
    fn recorded_transform_maps_input_to_canonical() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let grid = random_grid(&mut rng, 4, 4);
            let canon = canonicalize(&grid);
            assert_eq!(canon.transform.apply_grid(&grid), canon.grid);
            assert_eq!(canon.transform.inverse().apply_grid(&canon.grid), grid);
        }
    }

    #[test]
    fn hash_ties_go_to_smaller_grid_then_lower_index() {
        let small = Grid::new(2, 2);
        let mut large = Grid::new(2, 2);
        large.burn(Coord::new(0, 0));
        assert!(small < large);
        let best = Canonical {
            hash: 7,
            transform: Transform::FlipHorizontal,
            grid: large.clone(),
        };
        assert!(beats(6, &large, &best));
        assert!(!beats(8, &small, &best));
        // Same hash: the smaller grid wins even from a later transform.
        assert!(beats(7, &small, &best));
        // Same hash and same grid: the earlier transform stays.
        assert!(!beats(7, &large, &best));
    }

    #[test]
    fn identity_preferred_for_symmetric_grid() {
        let grid = Grid::new(3, 3);
        let canon = canonicalize(&grid);
        assert_eq!(canon.transform, Transform::Identity);
        assert_eq!(canon.hash, structural_hash(&grid));
    }

    #[test]
    fn moves_roundtrip_through_canonical_frame() {
        let mut grid = Grid::new(3, 2);
        grid.place_piece(Coord::new(0, 1), Color::Black);
        grid.place_piece(Coord::new(1, 0), Color::White);
        let canon = canonicalize(&grid);
        let mv = Move::new(Color::Black, Coord::new(0, 1), Coord::new(2, 1), Coord::new(2, 0));
        let mapped = canon.canonical_move(mv);
        assert_eq!(canon.restore_move(mapped), mv);
        assert_eq!(
            canon.grid.after_move(&mapped).unwrap(),
            canon.transform.apply_grid(&grid.after_move(&mv).unwrap())
        );
    }

    #[test]
    fn rotations_only_apply_to_square_grids() {
        let mut grid = Grid::new(4, 2);
        grid.burn(Coord::new(0, 0));
        let canon = canonicalize(&grid);
        assert!(!canon.transform.swaps_dimensions());
        assert_eq!((canon.grid.columns(), canon.grid.rows()), (4, 2));
        assert_eq!(ALL_TRANSFORMS.len(), 8);
    }
}
