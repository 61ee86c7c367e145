//! Endgame database generation CLI.
//!
//! Solves every small board up to the configured limits and writes the
//! resulting entries as JSONL.
//!
//! Usage:
//!   cargo run --release --bin database -- [OPTIONS]
//!
//! Options:
//!   --max-columns N  Widest board (default: 3)
//!   --max-rows N     Tallest board (default: 3)
//!   --max-cells N    Most squares on a board (default: 6)
//!   --max-pieces N   Most amazons on a board (default: 2)
//!   --threads N      Worker threads, 0 for one per core (default: 0)
//!   --output FILE    Output file path (default: stdout)
//!   --quiet          Only log warnings

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::process;
use std::str::FromStr;

use env_logger::Env;
use log::{error, info};

use amazons::db::fill::{export_records, write_jsonl};
use amazons::db::{fill_database, DatabaseConfig, EndgameDatabase, MemoryStore};

fn parse_value<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).map(|s| s.parse::<T>()) {
        Some(Ok(v)) => v,
        _ => {
            eprintln!("invalid {} value", flag);
            print_usage();
            process::exit(1);
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut config = DatabaseConfig::default();
    let mut output_path: Option<String> = None;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--max-columns" => {
                i += 1;
                config.max_columns = parse_value(&args, i, "--max-columns");
            }
            "--max-rows" => {
                i += 1;
                config.max_rows = parse_value(&args, i, "--max-rows");
            }
            "--max-cells" => {
                i += 1;
                config.max_cells = parse_value(&args, i, "--max-cells");
            }
            "--max-pieces" => {
                i += 1;
                config.max_pieces = parse_value(&args, i, "--max-pieces");
            }
            "--threads" => {
                i += 1;
                config.threads = parse_value(&args, i, "--threads");
            }
            "--output" => {
                i += 1;
                output_path = Some(parse_value(&args, i, "--output"));
            }
            "--quiet" => {
                quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let filter = if quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(filter)).init();

    info!(
        "database: up to {}x{} boards, {} cells, {} pieces, {} threads",
        config.max_columns, config.max_rows, config.max_cells, config.max_pieces, config.threads
    );

    let db = EndgameDatabase::new(MemoryStore::new());
    let summary = match fill_database(&config, &db) {
        Ok(summary) => summary,
        Err(e) => {
            error!("fill failed: {}", e);
            process::exit(1);
        }
    };
    info!(
        "{} boards, {} unique, {} entries stored",
        summary.boards, summary.unique, summary.stored
    );

    let records = match export_records(&db) {
        Ok(records) => records,
        Err(e) => {
            error!("export failed: {}", e);
            process::exit(1);
        }
    };

    let result = match &output_path {
        Some(path) => File::create(path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            write_jsonl(&records, &mut writer)
        }),
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            write_jsonl(&records, &mut writer)
        }
    };
    match result {
        Ok(()) => {
            if let Some(path) = output_path {
                info!("wrote {} entries to {}", records.len(), path);
            }
        }
        Err(e) => {
            error!("failed to write output: {}", e);
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: database [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --max-columns N  Widest board (default: 3)");
    eprintln!("  --max-rows N     Tallest board (default: 3)");
    eprintln!("  --max-cells N    Most squares on a board (default: 6)");
    eprintln!("  --max-pieces N   Most amazons on a board (default: 2)");
    eprintln!("  --threads N      Worker threads, 0 for one per core (default: 0)");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --quiet          Only log warnings");
    eprintln!("  --help           Show this help");
}
