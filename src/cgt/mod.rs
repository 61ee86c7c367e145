//! Combinatorial game theory: game-value trees, their order, arithmetic,
//! reduction, and notation.

pub mod builder;
pub mod notation;
pub mod simplify;
pub mod value;

pub use builder::{build_tree, build_value};
pub use notation::{format_number, is_simple_fraction, simplest_between};
pub use value::{le, Comparison, GameValue, Outcome};
