//! Amazons endgame engine.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Diagnostics go to stderr through the logger (`RUST_LOG`, default `warn`).

use std::io::{self, BufRead, Write};

use env_logger::Env;
use log::warn;

use amazons::engine::Engine;
use amazons::protocol::parser::{parse_command, Command};

/// Dispatches one command. Returns false when the loop should stop.
fn dispatch<W: Write>(engine: &mut Engine, cmd: Command, out: &mut W) -> io::Result<bool> {
    match cmd {
        Command::IsReady => engine.handle_isready(out)?,
        Command::SetOption { name, value } => engine.set_option(name, value),
        Command::NewGame => engine.new_game(),
        Command::Position { grid } => engine.set_position(grid),
        Command::Moves { color } => engine.handle_moves(color, out)?,
        Command::Play { mv } => {
            if let Err(e) = engine.play(&mv) {
                warn!("{}", e);
            }
        }
        Command::Canonical => engine.handle_canonical(out)?,
        Command::Partitions => engine.handle_partitions(out)?,
        Command::Evaluate => engine.handle_evaluate(out)?,
        Command::Solve => engine.handle_solve(out)?,
        Command::Go { color } => engine.handle_go(color, out)?,
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

/// Runs the main protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match dispatch(&mut engine, cmd, &mut out) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                warn!("failed to write response: {}", e);
                break;
            }
        }
    }
}
