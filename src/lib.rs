//! Amazons endgame engine library.
//!
//! Exposes the board representation, move generation, symmetry
//! canonicalization, partitioning, game values, the endgame database, and
//! protocol modules for use by integration tests and the binary entry points.

pub mod board;
pub mod cgt;
pub mod db;
pub mod engine;
pub mod movegen;
pub mod partition;
pub mod protocol;
pub mod symmetry;
