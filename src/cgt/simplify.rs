//! Reduction of game trees.
//!
//! Simplifying removes options that can never be the better choice for the
//! player who owns them, then drops duplicates. Children are reduced first
//! so that comparisons and notation always see reduced subtrees.

use super::value::{le, GameValue};

/// Which player owns a list of options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl GameValue {
    /// Returns the reduced form of this value. Values already reduced are
    /// returned as-is.
    pub fn simplify(self) -> GameValue {
        if self.simplified {
            return self;
        }

        let left: Vec<GameValue> = self.left.into_iter().map(GameValue::simplify).collect();
        let right: Vec<GameValue> = self.right.into_iter().map(GameValue::simplify).collect();

        let left = remove_duplicates(remove_dominated(left, Side::Left));
        let right = remove_duplicates(remove_dominated(right, Side::Right));

        GameValue {
            left,
            right,
            origin: self.origin,
            simplified: true,
        }
    }
}

/// Returns true if `a` is no better than `b` for the owner of the options.
fn dominated_by(a: &GameValue, b: &GameValue, side: Side) -> bool {
    match side {
        Side::Left => le(a, b),
        Side::Right => le(b, a),
    }
}

/// Drops every option that another option dominates. Of several equal
/// options, the first one listed survives.
fn remove_dominated(options: Vec<GameValue>, side: Side) -> Vec<GameValue> {
    let n = options.len();
    let mut keep = vec![true; n];
    for i in 0..n {
        for j in 0..n {
            if i == j || !dominated_by(&options[i], &options[j], side) {
                continue;
            }
            let equal = dominated_by(&options[j], &options[i], side);
            if !equal || j < i {
                keep[i] = false;
                break;
            }
        }
    }
    options
        .into_iter()
        .zip(keep)
        .filter_map(|(g, k)| k.then_some(g))
        .collect()
}

/// Drops options whose notation or structure repeats an earlier option.
fn remove_duplicates(options: Vec<GameValue>) -> Vec<GameValue> {
    let mut kept: Vec<GameValue> = Vec::with_capacity(options.len());
    let mut names: Vec<String> = Vec::with_capacity(options.len());
    for g in options {
        let name = g.to_string();
        if names.contains(&name) || kept.iter().any(|k| k == &g) {
            continue;
        }
        names.push(name);
        kept.push(g);
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Color, Coord, Move};

    fn zero() -> GameValue {
        GameValue::zero()
    }

    fn one() -> GameValue {
        GameValue::from_options(vec![zero()], vec![])
    }

    fn star() -> GameValue {
        GameValue::from_options(vec![zero()], vec![zero()])
    }

    fn minus_one() -> GameValue {
        GameValue::from_options(vec![], vec![zero()])
    }

    fn assert_no_domination(g: &GameValue) {
        for (i, a) in g.left.iter().enumerate() {
            for (j, b) in g.left.iter().enumerate() {
                assert!(i == j || !le(a, b), "left option {} dominated by {}", a, b);
            }
        }
        for (i, a) in g.right.iter().enumerate() {
            for (j, b) in g.right.iter().enumerate() {
                assert!(i == j || !le(b, a), "right option {} dominated by {}", a, b);
            }
        }
        for child in g.options() {
            assert_no_domination(child);
        }
    }

    #[test]
    fn left_keeps_best_number() {
        let g = GameValue::from_options(vec![zero(), one(), minus_one()], vec![]).simplify();
        assert_eq!(g.left.len(), 1);
        assert!(g.left[0].value_eq(&one()));
    }

    #[test]
    fn right_keeps_lowest_number() {
        let g = GameValue::from_options(vec![], vec![zero(), one(), minus_one()]).simplify();
        assert_eq!(g.right.len(), 1);
        assert!(g.right[0].value_eq(&minus_one()));
    }

    #[test]
    fn incomparable_options_survive() {
        // 0 and * are fuzzy with each other, so neither dominates.
        let g = GameValue::from_options(vec![zero(), star()], vec![zero()]).simplify();
        assert_eq!(g.left.len(), 2);
    }

    #[test]
    fn equal_options_keep_first_move() {
        let first = Move::new(Color::Black, Coord::new(0, 0), Coord::new(1, 0), Coord::new(0, 0));
        let second = Move::new(Color::Black, Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 0));
        let g = GameValue::from_options(
            vec![zero().with_origin(first), zero().with_origin(second)],
            vec![],
        )
        .simplify();
        assert_eq!(g.left.len(), 1);
        assert_eq!(g.left[0].origin, Some(first));
    }

    #[test]
    fn nested_values_are_reduced_bottom_up() {
        let inner = GameValue::from_options(vec![zero(), minus_one()], vec![one(), zero()]);
        let g = GameValue::from_options(vec![inner.clone(), inner], vec![]).simplify();
        assert_eq!(g.left.len(), 1);
        assert_eq!(g.left[0].left.len(), 1);
        assert_eq!(g.left[0].right.len(), 1);
        assert!(g.left[0].is_simplified());
        assert_no_domination(&g);
    }

    #[test]
    fn simplify_is_idempotent() {
        let g = GameValue::from_options(
            vec![zero(), one(), star(), GameValue::from_options(vec![one()], vec![star()])],
            vec![minus_one(), star(), zero()],
        );
        let once = g.clone().simplify();
        let twice = once.clone().simplify();
        assert_eq!(once.to_string(), twice.to_string());
        assert_eq!(once.left.len(), twice.left.len());
        assert_eq!(once.right.len(), twice.right.len());
        assert!(once.value_eq(&g));
        assert_no_domination(&once);
    }
}
