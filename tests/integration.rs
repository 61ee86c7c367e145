//! Integration tests for the amazons engine binary.
//!
//! Tests full protocol sessions by spawning the engine process, sending
//! commands via stdin, and verifying stdout responses.

use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

/// Sends a sequence of commands to the engine and collects stdout lines.
fn run_engine(commands: &[&str]) -> Vec<String> {
    let exe = env!("CARGO_BIN_EXE_amazons");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start amazons");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let reader = std::io::BufReader::new(stdout);

    for cmd in commands {
        writeln!(stdin, "{}", cmd).unwrap();
    }
    stdin.flush().unwrap();
    drop(stdin);

    let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
    let status = child.wait().expect("failed to wait on child");
    assert!(status.success());
    lines
}

/// The 3x2 grid with Black at a2 and White at b1.
const SCENARIO: &str = ".W./B..";

#[test]
fn isready_response() {
    let lines = run_engine(&["isready", "quit"]);
    assert_eq!(lines, vec!["readyok"]);
}

#[test]
fn unknown_commands_are_ignored() {
    let lines = run_engine(&["foobar", "position ..Z", "play nonsense", "isready", "quit"]);
    assert_eq!(lines, vec!["readyok"]);
}

#[test]
fn quit_stops_processing() {
    let lines = run_engine(&["quit", "isready"]);
    assert!(lines.is_empty());
}

#[test]
fn eof_without_quit_exits_cleanly() {
    let lines = run_engine(&["isready"]);
    assert_eq!(lines, vec!["readyok"]);
}

#[test]
fn moves_for_scenario() {
    let lines = run_engine(&[&format!("position {}", SCENARIO), "moves b", "quit"]);
    assert_eq!(lines.len(), 1);
    let moves: Vec<&str> = lines[0].strip_prefix("moves ").unwrap().split(' ').collect();
    assert_eq!(moves.len(), 9);
    assert!(moves.contains(&"Ba2-b2/c2"));
    assert!(moves.contains(&"Ba2-a1/a2"));
}

#[test]
fn canonical_is_shared_by_mirror_images() {
    let lines = run_engine(&[
        "position .W./B..",
        "canonical",
        "position .W./..B",
        "canonical",
        "position B../.W.",
        "canonical",
        "quit",
    ]);
    assert_eq!(lines.len(), 3);
    let forms: Vec<Vec<&str>> = lines.iter().map(|l| l.split(' ').collect()).collect();
    for form in &forms {
        assert_eq!(form.len(), 4);
        assert_eq!(form[0], "canonical");
    }
    assert_eq!(forms[0][1], forms[1][1]);
    assert_eq!(forms[0][3], forms[1][3]);
    assert_eq!(forms[0][3], forms[2][3]);
}

#[test]
fn partitions_of_split_board() {
    let lines = run_engine(&["position B.#.W/..#../..#..", "partitions", "quit"]);
    assert_eq!(
        lines,
        vec!["partition 0,0 B./../..", "partition 3,0 .W/../..", "partitions 2"]
    );
}

#[test]
fn evaluate_unknown_then_solved() {
    let lines = run_engine(&[
        &format!("position {}", SCENARIO),
        "evaluate",
        "solve",
        "evaluate",
        "quit",
    ]);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "value unknown");
    assert!(lines[1].starts_with("value "));
    assert!(lines[1].ends_with(" outcome First"), "{}", lines[1]);
    assert!(!lines[1].starts_with("value 0 "));
    assert_eq!(lines[1], lines[2]);
}

#[test]
fn combine_modes_differ_on_opposed_regions() {
    let lines = run_engine(&[
        "position B.",
        "solve",
        "position W.",
        "solve",
        "position B.#W.",
        "evaluate",
        "setoption name CombineMode value sum",
        "evaluate",
        "quit",
    ]);
    assert_eq!(
        lines,
        vec![
            "value 1 outcome Left",
            "value -1 outcome Right",
            "value * outcome First",
            "value 0 outcome Second",
        ]
    );
}

#[test]
fn play_then_list_moves() {
    let lines = run_engine(&[
        &format!("position {}", SCENARIO),
        "play Ba2-c2/a2",
        "play Ba2-b2/c2",
        "moves b",
        "quit",
    ]);
    // The second move is illegal once the amazon has left a2.
    assert_eq!(lines.len(), 1);
    let moves: Vec<&str> = lines[0].strip_prefix("moves ").unwrap().split(' ').collect();
    assert!(moves.iter().all(|m| m.starts_with("Bc2-")));
}

#[test]
fn go_returns_a_listed_move() {
    let lines = run_engine(&[
        &format!("position {}", SCENARIO),
        "moves w",
        "go w",
        "solve",
        "go w",
        "quit",
    ]);
    assert_eq!(lines.len(), 4);
    let moves: Vec<&str> = lines[0].strip_prefix("moves ").unwrap().split(' ').collect();
    for line in [&lines[1], &lines[3]] {
        let mv = line.strip_prefix("bestmove ").unwrap();
        assert!(moves.contains(&mv), "{} not in {:?}", mv, moves);
    }
}

#[test]
fn go_without_moves() {
    let lines = run_engine(&["position B#W", "go", "quit"]);
    assert_eq!(lines, vec!["bestmove none"]);
}
