//! Endgame database.
//!
//! Game values are cached under the structural hash of the canonical grid.
//! The backing store is an opaque key-to-blob map supplied by the caller;
//! this module adds encoding, collision checks, and the evaluation and
//! solving paths built on top of it.

pub mod codec;
pub mod evaluate;
pub mod fill;
pub mod solver;

use std::collections::HashMap;

use log::{debug, warn};
use parking_lot::RwLock;

use crate::board::Grid;
use crate::cgt::GameValue;
use crate::symmetry::PositionKey;

pub use evaluate::{combine, evaluate, CombineMode, Evaluation};
pub use fill::{enumerate_boards, fill_database, DatabaseConfig, FillSummary};
pub use solver::Solver;

/// Errors raised by the database adapter.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("failed to encode game value: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode entry {key:#010x}: {source}")]
    Decode {
        key: PositionKey,
        #[source]
        source: serde_json::Error,
    },

    #[error("entry {0:#010x} already present")]
    AlreadyPresent(PositionKey),
}

/// External key-value storage for encoded game values.
///
/// `put` never overwrites: the first blob stored under a key wins and later
/// ones are dropped. Implementations must be safe to share across threads.
pub trait EndgameStore: Send + Sync {
    fn get(&self, key: PositionKey) -> Option<Vec<u8>>;

    /// Stores `blob` unless `key` is taken. Returns true if it was stored.
    fn put(&self, key: PositionKey, blob: Vec<u8>) -> bool;

    fn contains(&self, key: PositionKey) -> bool {
        self.get(key).is_some()
    }
}

/// In-process store backed by a locked hash map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<PositionKey, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// All stored keys, sorted.
    pub fn keys(&self) -> Vec<PositionKey> {
        let mut keys: Vec<PositionKey> = self.entries.read().keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl EndgameStore for MemoryStore {
    fn get(&self, key: PositionKey) -> Option<Vec<u8>> {
        self.entries.read().get(&key).cloned()
    }

    fn put(&self, key: PositionKey, blob: Vec<u8>) -> bool {
        let mut entries = self.entries.write();
        if entries.contains_key(&key) {
            return false;
        }
        entries.insert(key, blob);
        true
    }

    fn contains(&self, key: PositionKey) -> bool {
        self.entries.read().contains_key(&key)
    }
}

/// Typed access to an [`EndgameStore`].
///
/// Values go in and come out in the canonical frame. Mapping moves back
/// onto a caller's grid is the caller's job.
#[derive(Debug, Default)]
pub struct EndgameDatabase<S> {
    store: S,
}

impl<S: EndgameStore> EndgameDatabase<S> {
    pub fn new(store: S) -> Self {
        EndgameDatabase { store }
    }

    /// The underlying store.
    pub fn backend(&self) -> &S {
        &self.store
    }

    pub fn contains(&self, key: PositionKey) -> bool {
        self.store.contains(key)
    }

    /// Looks up the value cached for the canonical grid `grid` under `key`.
    ///
    /// An entry recorded for a different position under the same key is a
    /// hash collision and reads as a miss.
    pub fn lookup(&self, key: PositionKey, grid: &Grid) -> Result<Option<GameValue>, CacheError> {
        let Some(blob) = self.store.get(key) else {
            debug!("cache miss {:#010x} {}", key, grid);
            return Ok(None);
        };
        let entry = codec::decode(key, &blob)?;
        let position = grid.to_string();
        if entry.position != position {
            warn!(
                "hash collision on {:#010x}: cached {} but looked up {}",
                key, entry.position, position
            );
            return Ok(None);
        }
        debug!("cache hit {:#010x} {}", key, position);
        Ok(Some(entry.value))
    }

    /// Stores the value of the canonical grid `grid` under `key`.
    ///
    /// Fails with [`CacheError::AlreadyPresent`] if the key is taken.
    pub fn store(&self, key: PositionKey, grid: &Grid, value: &GameValue) -> Result<(), CacheError> {
        if self.store.contains(key) {
            return Err(CacheError::AlreadyPresent(key));
        }
        let blob = codec::encode(grid, value)?;
        if !self.store.put(key, blob) {
            return Err(CacheError::AlreadyPresent(key));
        }
        debug!("cache store {:#010x} {} = {}", key, grid, value);
        Ok(())
    }
}
