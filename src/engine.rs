//! Engine state management.
//!
//! Holds the current position, engine options, and the endgame database,
//! and answers the analysis commands of the main loop.

use std::collections::HashMap;
use std::io::{self, Write};

use log::warn;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::{Color, Grid, Move, ALL_COLORS};
use crate::cgt::GameValue;
use crate::db::{evaluate, CombineMode, EndgameDatabase, Evaluation, MemoryStore, Solver};
use crate::movegen::{is_legal, legal_moves, random_move};
use crate::partition::partition;
use crate::symmetry::canonicalize;

/// Option selecting how independent regions are combined.
const OPTION_COMBINE_MODE: &str = "CombineMode";

/// Option that empties the database.
const OPTION_CLEAR_DATABASE: &str = "ClearDatabase";

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub position: Option<Grid>,
    pub options: HashMap<String, String>,
    combine: CombineMode,
    db: EndgameDatabase<MemoryStore>,
    rng: SmallRng,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates a new engine with no position and an empty database.
    pub fn new() -> Self {
        Self::with_database(EndgameDatabase::new(MemoryStore::new()))
    }

    /// Creates an engine that answers from an existing database.
    pub fn with_database(db: EndgameDatabase<MemoryStore>) -> Self {
        Engine {
            position: None,
            options: HashMap::new(),
            combine: CombineMode::default(),
            db,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Re-seeds the fallback move picker.
    pub fn seed(&mut self, seed: u64) {
        self.rng = SmallRng::seed_from_u64(seed);
    }

    pub fn database(&self) -> &EndgameDatabase<MemoryStore> {
        &self.db
    }

    pub fn combine_mode(&self) -> CombineMode {
        self.combine
    }

    /// Clears the position. The database is kept across games.
    pub fn new_game(&mut self) {
        self.position = None;
    }

    pub fn set_position(&mut self, grid: Grid) {
        self.position = Some(grid);
    }

    /// Sets an engine option.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        if name.eq_ignore_ascii_case(OPTION_COMBINE_MODE) {
            match value.as_deref().map(str::parse::<CombineMode>) {
                Some(Ok(mode)) => self.combine = mode,
                Some(Err(e)) => warn!("setoption: {}", e),
                None => warn!("setoption: {} needs a value", OPTION_COMBINE_MODE),
            }
        } else if name.eq_ignore_ascii_case(OPTION_CLEAR_DATABASE) {
            self.db.backend().clear();
        }
        self.options.insert(name, value.unwrap_or_default());
    }

    /// Applies a move to the current position. Only moves the generator
    /// would produce are accepted.
    pub fn play(&mut self, mv: &Move) -> Result<(), String> {
        let grid = self.position.as_mut().ok_or("play: no position set")?;
        grid.apply_move(mv).map_err(|e| format!("play: {}", e))
    }

    fn current(&self, command: &str) -> Option<&Grid> {
        if self.position.is_none() {
            warn!("{}: no position set", command);
        }
        self.position.as_ref()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Handles `moves [b|w]`: lists legal moves, Black's first when no
    /// colour is given.
    pub fn handle_moves<W: Write>(&self, color: Option<Color>, out: &mut W) -> io::Result<()> {
        let Some(grid) = self.current("moves") else {
            return Ok(());
        };
        let colors = match color {
            Some(c) => vec![c],
            None => ALL_COLORS.to_vec(),
        };
        let moves: Vec<String> = colors
            .into_iter()
            .flat_map(|c| legal_moves(grid, c))
            .map(|mv| mv.to_string())
            .collect();
        if moves.is_empty() {
            writeln!(out, "moves none")?;
        } else {
            writeln!(out, "moves {}", moves.join(" "))?;
        }
        out.flush()
    }

    /// Handles `canonical`.
    pub fn handle_canonical<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(grid) = self.current("canonical") else {
            return Ok(());
        };
        let canon = canonicalize(grid);
        writeln!(out, "canonical {} {} {}", canon.hash, canon.transform, canon.grid)?;
        out.flush()
    }

    /// Handles `partitions`.
    pub fn handle_partitions<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(grid) = self.current("partitions") else {
            return Ok(());
        };
        let regions = partition(grid);
        for region in &regions {
            writeln!(
                out,
                "partition {},{} {}",
                region.offset.x, region.offset.y, region.grid
            )?;
        }
        writeln!(out, "partitions {}", regions.len())?;
        out.flush()
    }

    fn evaluation(&self, grid: &Grid) -> Evaluation {
        match evaluate(grid, &self.db, self.combine) {
            Ok(evaluation) => evaluation,
            Err(e) => {
                warn!("evaluate: {}", e);
                Evaluation::Unknown
            }
        }
    }

    /// Handles `evaluate`: reports the cached value, if any.
    pub fn handle_evaluate<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(grid) = self.current("evaluate") else {
            return Ok(());
        };
        match self.evaluation(grid) {
            Evaluation::Known(value) => write_value(out, &value)?,
            Evaluation::Unknown => writeln!(out, "value unknown")?,
        }
        out.flush()
    }

    /// Handles `solve`: computes the full value and stores it.
    pub fn handle_solve<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(grid) = self.current("solve") else {
            return Ok(());
        };
        match Solver::new(&self.db).solve(grid) {
            Ok(value) => write_value(out, &value)?,
            Err(e) => {
                warn!("solve: {}", e);
                writeln!(out, "value unknown")?;
            }
        }
        out.flush()
    }

    /// Handles `go [b|w]`: plays the first surviving option of the known
    /// value, or a random legal move when the position is not solved.
    pub fn handle_go<W: Write>(&mut self, color: Option<Color>, out: &mut W) -> io::Result<()> {
        let color = color.unwrap_or(Color::Black);
        let Some(grid) = self.current("go").cloned() else {
            return Ok(());
        };

        let best = match self.evaluation(&grid) {
            Evaluation::Known(value) => first_option(&value, color),
            Evaluation::Unknown => None,
        }
        .filter(|mv| is_legal(&grid, mv))
        .or_else(|| random_move(&grid, color, &mut self.rng));

        match best {
            Some(mv) => writeln!(out, "bestmove {}", mv)?,
            None => writeln!(out, "bestmove none")?,
        }
        out.flush()
    }
}

fn first_option(value: &GameValue, color: Color) -> Option<Move> {
    let options = match color {
        Color::Black => &value.left,
        Color::White => &value.right,
    };
    options.iter().find_map(|g| g.origin)
}

fn write_value<W: Write>(out: &mut W, value: &GameValue) -> io::Result<()> {
    writeln!(out, "value {} outcome {}", value, value.outcome())
}
