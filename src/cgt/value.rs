//! Combinatorial game values.
//!
//! A `GameValue` is a finite tree of options: `left` holds the positions
//! Black (Left) can move to, `right` those White (Right) can move to. Each
//! option remembers the move that produced it, so a reduced value still
//! says which move to play.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Move;

/// A node of a game tree.
///
/// Equality is structural: two values are equal when each side holds the
/// same options up to order, ignoring the moves attached to them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameValue {
    pub left: Vec<GameValue>,
    pub right: Vec<GameValue>,
    /// The move that led from the parent position to this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Move>,
    /// Set once dominated and duplicate options have been removed.
    #[serde(default)]
    pub(crate) simplified: bool,
}

/// Who wins a game value with perfect play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Black wins whoever starts.
    Left,
    /// White wins whoever starts.
    Right,
    /// The player to move wins.
    First,
    /// The player to move loses.
    Second,
}

impl Outcome {
    pub const fn name(self) -> &'static str {
        match self {
            Outcome::Left => "Left",
            Outcome::Right => "Right",
            Outcome::First => "First",
            Outcome::Second => "Second",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of comparing two values from Black's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Equal,
    /// Neither value is at least as good as the other.
    Fuzzy,
    /// The first value is strictly better for Black.
    Greater,
    /// The second value is strictly better for Black.
    Less,
}

impl GameValue {
    /// The value with no options for either side.
    pub fn zero() -> Self {
        GameValue::default()
    }

    /// Builds a value from option lists.
    pub fn from_options(left: Vec<GameValue>, right: Vec<GameValue>) -> Self {
        GameValue {
            left,
            right,
            origin: None,
            simplified: false,
        }
    }

    /// Returns the value tagged with the move that reaches it.
    pub fn with_origin(mut self, mv: Move) -> Self {
        self.origin = Some(mv);
        self
    }

    /// True when neither side has a move.
    pub fn is_terminal(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }

    pub fn is_simplified(&self) -> bool {
        self.simplified
    }

    /// Adds a Left option unless a structurally equal one is already there.
    /// Returns true if the option was added.
    pub fn push_left(&mut self, option: GameValue) -> bool {
        push_unique(&mut self.left, option, &mut self.simplified)
    }

    /// Adds a Right option unless a structurally equal one is already there.
    pub fn push_right(&mut self, option: GameValue) -> bool {
        push_unique(&mut self.right, option, &mut self.simplified)
    }

    /// `self <= other`: Black is never worse off in `other`.
    pub fn le(&self, other: &GameValue) -> bool {
        le(self, other)
    }

    /// `self >= other`.
    pub fn ge(&self, other: &GameValue) -> bool {
        le(other, self)
    }

    /// Compares two values under the game order.
    pub fn compare(&self, other: &GameValue) -> Comparison {
        match (le(self, other), le(other, self)) {
            (true, true) => Comparison::Equal,
            (true, false) => Comparison::Less,
            (false, true) => Comparison::Greater,
            (false, false) => Comparison::Fuzzy,
        }
    }

    /// True if the two values are equal as games (not just structurally).
    pub fn value_eq(&self, other: &GameValue) -> bool {
        self.compare(other) == Comparison::Equal
    }

    /// Outcome class, from comparing the value with zero.
    pub fn outcome(&self) -> Outcome {
        let zero = GameValue::zero();
        match self.compare(&zero) {
            Comparison::Equal => Outcome::Second,
            Comparison::Greater => Outcome::Left,
            Comparison::Less => Outcome::Right,
            Comparison::Fuzzy => Outcome::First,
        }
    }

    /// The value with the roles of the players exchanged.
    pub fn negate(&self) -> GameValue {
        GameValue {
            left: self.right.iter().map(GameValue::negate).collect(),
            right: self.left.iter().map(GameValue::negate).collect(),
            origin: self.origin,
            simplified: self.simplified,
        }
    }

    /// Disjunctive sum: a move in the sum is a move in exactly one
    /// component, leaving the other unchanged. The option inherits the
    /// origin move of the component option it came from.
    pub fn plus(&self, other: &GameValue) -> GameValue {
        let mut sum = GameValue::zero();
        for gl in &self.left {
            sum.left.push(carry_origin(gl.plus(other), gl.origin));
        }
        for hl in &other.left {
            sum.left.push(carry_origin(self.plus(hl), hl.origin));
        }
        for gr in &self.right {
            sum.right.push(carry_origin(gr.plus(other), gr.origin));
        }
        for hr in &other.right {
            sum.right.push(carry_origin(self.plus(hr), hr.origin));
        }
        sum
    }

    /// Rewrites every attached move, e.g. to map a cached value back onto a
    /// transformed or cropped grid.
    pub fn map_moves<F: Fn(Move) -> Move>(&self, f: &F) -> GameValue {
        GameValue {
            left: self.left.iter().map(|g| g.map_moves(f)).collect(),
            right: self.right.iter().map(|g| g.map_moves(f)).collect(),
            origin: self.origin.map(f),
            simplified: self.simplified,
        }
    }

    /// Length of the longest chain of Left options below this node.
    pub fn left_depth(&self) -> usize {
        self.left.iter().map(|g| 1 + g.left_depth()).max().unwrap_or(0)
    }

    /// Length of the longest chain of Right options below this node.
    pub fn right_depth(&self) -> usize {
        self.right.iter().map(|g| 1 + g.right_depth()).max().unwrap_or(0)
    }

    /// Number of nodes in the tree, this one included.
    pub fn node_count(&self) -> usize {
        1 + self
            .left
            .iter()
            .chain(self.right.iter())
            .map(GameValue::node_count)
            .sum::<usize>()
    }

    /// Options of either side in the order Black's first.
    pub fn options(&self) -> impl Iterator<Item = &GameValue> {
        self.left.iter().chain(self.right.iter())
    }
}

fn carry_origin(mut value: GameValue, origin: Option<Move>) -> GameValue {
    value.origin = origin;
    value
}

fn push_unique(side: &mut Vec<GameValue>, option: GameValue, simplified: &mut bool) -> bool {
    if side.iter().any(|existing| existing == &option) {
        return false;
    }
    side.push(option);
    *simplified = false;
    true
}

/// The game order. `x <= y` fails exactly when some Left option of `x` is
/// `>= y` or some Right option of `y` is `<= x`.
pub fn le(x: &GameValue, y: &GameValue) -> bool {
    !x.left.iter().any(|xl| le(y, xl)) && !y.right.iter().any(|yr| le(yr, x))
}

/// Structural equality: same options on each side, ignoring order and
/// attached moves.
fn same_structure(a: &GameValue, b: &GameValue) -> bool {
    same_side(&a.left, &b.left) && same_side(&a.right, &b.right)
}

fn same_side(a: &[GameValue], b: &[GameValue]) -> bool {
    a.iter().all(|x| b.iter().any(|y| same_structure(x, y)))
        && b.iter().all(|y| a.iter().any(|x| same_structure(x, y)))
}

impl PartialEq for GameValue {
    fn eq(&self, other: &GameValue) -> bool {
        same_structure(self, other)
    }
}

impl Eq for GameValue {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Color, Coord};

    fn zero() -> GameValue {
        GameValue::zero()
    }

    fn star() -> GameValue {
        GameValue::from_options(vec![zero()], vec![zero()])
    }

    fn one() -> GameValue {
        GameValue::from_options(vec![zero()], vec![])
    }

    fn minus_one() -> GameValue {
        GameValue::from_options(vec![], vec![zero()])
    }

    fn half() -> GameValue {
        GameValue::from_options(vec![zero()], vec![one()])
    }

    fn up() -> GameValue {
        GameValue::from_options(vec![zero()], vec![star()])
    }

    #[test]
    fn outcome_classes() {
        assert_eq!(zero().outcome(), Outcome::Second);
        assert_eq!(one().outcome(), Outcome::Left);
        assert_eq!(minus_one().outcome(), Outcome::Right);
        assert_eq!(star().outcome(), Outcome::First);
        assert_eq!(up().outcome(), Outcome::Left);
    }

    #[test]
    fn ordering_of_numbers() {
        assert_eq!(one().compare(&zero()), Comparison::Greater);
        assert_eq!(minus_one().compare(&one()), Comparison::Less);
        assert_eq!(half().compare(&one()), Comparison::Less);
        assert_eq!(half().compare(&zero()), Comparison::Greater);
        assert_eq!(star().compare(&zero()), Comparison::Fuzzy);
    }

    #[test]
    fn half_plus_half_is_one() {
        let sum = half().plus(&half());
        assert!(sum.value_eq(&one()));
    }

    #[test]
    fn star_plus_star_is_zero() {
        assert_eq!(star().plus(&star()).outcome(), Outcome::Second);
    }

    #[test]
    fn value_plus_negation_is_zero() {
        for g in [one(), half(), up(), star()] {
            assert_eq!(g.plus(&g.negate()).outcome(), Outcome::Second);
        }
    }

    #[test]
    fn structural_equality_ignores_order_and_moves() {
        let mv = Move::new(Color::Black, Coord::new(0, 0), Coord::new(1, 0), Coord::new(0, 0));
        let a = GameValue::from_options(vec![zero().with_origin(mv), one()], vec![star()]);
        let b = GameValue::from_options(vec![one(), zero()], vec![star()]);
        assert_eq!(a, b);
        assert_ne!(a, GameValue::from_options(vec![one()], vec![star()]));
    }

    #[test]
    fn push_suppresses_duplicates() {
        let mut g = zero();
        assert!(g.push_left(one()));
        assert!(!g.push_left(one()));
        assert!(g.push_left(zero()));
        assert_eq!(g.left.len(), 2);
    }

    #[test]
    fn plus_carries_origin_moves() {
        let mv = Move::new(Color::White, Coord::new(0, 0), Coord::new(1, 0), Coord::new(0, 0));
        let g = GameValue::from_options(vec![], vec![zero().with_origin(mv)]);
        let sum = g.plus(&one());
        assert_eq!(sum.right.len(), 1);
        assert_eq!(sum.right[0].origin, Some(mv));
    }

    #[test]
    fn map_moves_reaches_every_node() {
        let mv = Move::new(Color::Black, Coord::new(0, 0), Coord::new(1, 0), Coord::new(0, 0));
        let g = GameValue::from_options(
            vec![GameValue::from_options(vec![zero().with_origin(mv)], vec![]).with_origin(mv)],
            vec![],
        );
        let shifted = g.map_moves(&|m: Move| m.translated(Coord::new(2, 0)));
        let expected = mv.translated(Coord::new(2, 0));
        assert_eq!(shifted.left[0].origin, Some(expected));
        assert_eq!(shifted.left[0].left[0].origin, Some(expected));
    }

    #[test]
    fn depths_and_counts() {
        let two = GameValue::from_options(vec![one()], vec![]);
        assert_eq!(two.left_depth(), 2);
        assert_eq!(two.right_depth(), 0);
        assert_eq!(two.node_count(), 3);
        assert_eq!(minus_one().right_depth(), 1);
    }
}
