//! Offline database filling.
//!
//! Enumerates every small board, keeps one representative per symmetry
//! class, and solves them in parallel into the shared database.

use std::collections::HashSet;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use log::info;
use rayon::prelude::*;
use serde::Serialize;

use crate::board::{Color, Grid, Square};
use crate::symmetry::{canonicalize, PositionKey};

use super::{codec, CacheError, EndgameDatabase, EndgameStore, MemoryStore, Solver};

/// Square states a cell can take during enumeration.
const CELL_STATES: [Square; 4] = [
    Square::Empty,
    Square::Burnt,
    Square::Amazon(Color::Black),
    Square::Amazon(Color::White),
];

/// Configuration for filling the database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Widest board enumerated.
    pub max_columns: usize,
    /// Tallest board enumerated.
    pub max_rows: usize,
    /// Largest number of squares on an enumerated board.
    pub max_cells: usize,
    /// Most amazons, of both colours together, on an enumerated board.
    pub max_pieces: usize,
    /// Worker threads (0 = one per core).
    pub threads: usize,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            max_columns: 3,
            max_rows: 3,
            max_cells: 6,
            max_pieces: 2,
            threads: 0,
        }
    }
}

/// What a fill run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FillSummary {
    /// Boards enumerated, symmetric images included.
    pub boards: usize,
    /// Distinct canonical positions among them.
    pub unique: usize,
    /// Entries written, descendants of the enumerated boards included.
    pub stored: usize,
}

/// Errors that can occur while filling the database.
#[derive(Debug, thiserror::Error)]
pub enum FillError {
    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Every board within the configured limits, as canonical grids without
/// duplicates, in enumeration order. Also returns how many boards were
/// enumerated before deduplication.
pub fn enumerate_boards(config: &DatabaseConfig) -> (Vec<Grid>, usize) {
    let mut seen: HashSet<Grid> = HashSet::new();
    let mut unique = Vec::new();
    let mut total = 0;

    for rows in 1..=config.max_rows {
        for columns in 1..=config.max_columns {
            let cells = columns * rows;
            if cells > config.max_cells {
                continue;
            }
            let mut digits = vec![0usize; cells];
            loop {
                let pieces = digits.iter().filter(|&&d| d >= 2).count();
                if pieces <= config.max_pieces {
                    let squares = digits.iter().map(|&d| CELL_STATES[d]).collect();
                    if let Some(grid) = Grid::from_squares(columns, rows, squares) {
                        total += 1;
                        let canon = canonicalize(&grid);
                        if seen.insert(canon.grid.clone()) {
                            unique.push(canon.grid);
                        }
                    }
                }
                if !advance(&mut digits) {
                    break;
                }
            }
        }
    }

    (unique, total)
}

/// Steps a base-4 odometer. Returns false once it wraps around.
fn advance(digits: &mut [usize]) -> bool {
    for d in digits.iter_mut() {
        *d += 1;
        if *d < CELL_STATES.len() {
            return true;
        }
        *d = 0;
    }
    false
}

/// Solves every enumerated board into `db`.
pub fn fill_database<S: EndgameStore>(
    config: &DatabaseConfig,
    db: &EndgameDatabase<S>,
) -> Result<FillSummary, FillError> {
    let start = Instant::now();
    let (boards, total) = enumerate_boards(config);
    info!(
        "enumerated {} boards, {} unique up to symmetry",
        total,
        boards.len()
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    let solver = Solver::new(db);
    let completed = AtomicUsize::new(0);
    let step = (boards.len() / 20).max(1);

    pool.install(|| {
        boards.par_iter().try_for_each(|grid| {
            solver.solve(grid)?;
            let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
            if n % step == 0 || n == boards.len() {
                info!(
                    "solved {}/{} positions ({:.1}s)",
                    n,
                    boards.len(),
                    start.elapsed().as_secs_f64()
                );
            }
            Ok::<(), CacheError>(())
        })
    })?;

    let summary = FillSummary {
        boards: total,
        unique: boards.len(),
        stored: solver.stored(),
    };
    info!(
        "stored {} entries in {:.1}s",
        summary.stored,
        start.elapsed().as_secs_f64()
    );
    Ok(summary)
}

/// One database entry as written to JSONL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryRecord {
    pub key: PositionKey,
    pub columns: usize,
    pub rows: usize,
    pub position: String,
    pub value: String,
    pub outcome: String,
}

/// Decodes every entry of an in-memory database, sorted by key.
pub fn export_records(db: &EndgameDatabase<MemoryStore>) -> Result<Vec<EntryRecord>, CacheError> {
    let store = db.backend();
    let mut records = Vec::with_capacity(store.len());
    for key in store.keys() {
        let Some(blob) = store.get(key) else { continue };
        let entry = codec::decode(key, &blob)?;
        let rows = entry.position.split('/').count();
        let columns = entry.position.split('/').next().map_or(0, |r| r.chars().count());
        records.push(EntryRecord {
            key,
            columns,
            rows,
            value: entry.value.to_string(),
            outcome: entry.value.outcome().to_string(),
            position: entry.position,
        });
    }
    Ok(records)
}

/// Writes records as JSONL (one JSON object per line).
pub fn write_jsonl<W: Write>(records: &[EntryRecord], out: &mut W) -> std::io::Result<()> {
    for record in records {
        serde_json::to_writer(&mut *out, record)?;
        writeln!(out)?;
    }
    out.flush()
}
