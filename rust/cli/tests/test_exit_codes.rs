//! Exit codes and stream discipline: 0 on success, 2 on any error, errors
//! on stderr only.

use nightdealer_cli::exit_code::{ERROR, SUCCESS};
use std::io::Cursor;

fn run_with(args: &[&str], input: &str) -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let mut stdin = Cursor::new(input.as_bytes().to_vec());
    let code = nightdealer_cli::run_with_input(args.iter(), &mut stdin, &mut out, &mut err);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
fn play_quit_returns_zero() {
    let (code, out, err) = run_with(&["nightdealer", "play", "--seed", "42"], "quit\n");
    assert_eq!(code, SUCCESS);
    assert!(out.contains("play: vs=ai seed=42"));
    assert!(err.is_empty());
}

#[test]
fn play_eof_returns_zero() {
    let (code, out, _) = run_with(&["nightdealer", "play", "--vs", "human", "--seed", "1"], "");
    assert_eq!(code, SUCCESS);
    assert!(out.contains("Input closed"));
}

#[test]
fn invalid_input_reprompts_instead_of_exiting() {
    let (code, out, err) = run_with(
        &["nightdealer", "play", "--vs", "human", "--seed", "3"],
        "bet 100\nquit\n",
    );
    assert_eq!(code, SUCCESS);
    assert!(err.starts_with("Error: Unrecognized command 'bet'"));
    assert!(out.contains("Quit."));
}

#[test]
fn sim_success_returns_zero() {
    let (code, out, err) = run_with(&["nightdealer", "sim", "--matches", "1", "--seed", "5"], "");
    assert_eq!(code, SUCCESS);
    assert!(out.contains("P1 wins:"));
    assert!(err.is_empty());
}

#[test]
fn bad_arguments_return_two() {
    for args in [
        &["nightdealer"][..],
        &["nightdealer", "sim", "--matches", "0"],
        &["nightdealer", "sim", "--matches", "many"],
        &["nightdealer", "play", "--vs", "robot"],
        &["nightdealer", "stats"],
    ] {
        let (code, out, err) = run_with(args, "");
        assert_eq!(code, ERROR, "{:?}", args);
        assert!(out.is_empty(), "{:?}", args);
        assert!(err.contains("Usage: nightdealer"), "{:?}", args);
    }
}

#[test]
fn unknown_ai_returns_two() {
    let (code, out, err) = run_with(&["nightdealer", "sim", "--ai", "oracle", "--seed", "1"], "");
    assert_eq!(code, ERROR);
    assert!(out.is_empty());
    assert!(err.starts_with("Error: Invalid input: unknown ai 'oracle'"));
}

#[test]
fn version_and_help_go_to_stdout() {
    let (code, out, err) = run_with(&["nightdealer", "--version"], "");
    assert_eq!(code, SUCCESS);
    assert!(out.starts_with("nightdealer "));
    assert!(err.is_empty());

    let (code, out, _) = run_with(&["nightdealer", "sim", "--help"], "");
    assert_eq!(code, SUCCESS);
    assert!(out.contains("--jsonl"));
}
