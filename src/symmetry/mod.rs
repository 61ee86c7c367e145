//! Board symmetries and canonicalization.
//!
//! Transforms map grids, coordinates, and moves between congruent frames;
//! the canonicalizer picks one representative per symmetry class.

pub mod canonical;
pub mod transform;

pub use canonical::{canonicalize, structural_hash, Canonical, PositionKey};
pub use transform::{Transform, ALL_TRANSFORMS};
