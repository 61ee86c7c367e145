//! Blob encoding of cached game values.
//!
//! An entry stores the canonical position text next to the value, so a
//! 32-bit key collision between two positions is detected on read instead
//! of silently returning the wrong value.

use serde::{Deserialize, Serialize};

use crate::board::Grid;
use crate::cgt::GameValue;
use crate::symmetry::PositionKey;

use super::CacheError;

#[derive(Serialize)]
struct EntryRef<'a> {
    position: String,
    value: &'a GameValue,
}

/// A decoded database entry.
#[derive(Debug, Clone, Deserialize)]
pub struct Entry {
    /// Position text of the canonical grid the value belongs to.
    pub position: String,
    pub value: GameValue,
}

/// Encodes a value computed for `grid`.
pub fn encode(grid: &Grid, value: &GameValue) -> Result<Vec<u8>, CacheError> {
    let entry = EntryRef {
        position: grid.to_string(),
        value,
    };
    serde_json::to_vec(&entry).map_err(CacheError::Encode)
}

/// Decodes the blob stored under `key`.
pub fn decode(key: PositionKey, blob: &[u8]) -> Result<Entry, CacheError> {
    serde_json::from_slice(blob).map_err(|source| CacheError::Decode { key, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cgt::build_value;
    use crate::protocol::notation::parse_grid;

    #[test]
    fn entry_keeps_structure_and_moves() {
        let grid = parse_grid(".W/B.").unwrap();
        let value = build_value(&grid);
        let blob = encode(&grid, &value).unwrap();
        let entry = decode(7, &blob).unwrap();

        assert_eq!(entry.position, ".W/B.");
        assert_eq!(entry.value, value);
        assert_eq!(entry.value.to_string(), value.to_string());
        assert!(entry.value.is_simplified());
        let origins: Vec<_> = entry.value.left.iter().map(|g| g.origin).collect();
        let expected: Vec<_> = value.left.iter().map(|g| g.origin).collect();
        assert_eq!(origins, expected);
    }

    #[test]
    fn garbage_blob_is_decode_error() {
        match decode(42, b"not json") {
            Err(CacheError::Decode { key, .. }) => assert_eq!(key, 42),
            other => panic!("expected decode error, got {:?}", other),
        }
    }
}
