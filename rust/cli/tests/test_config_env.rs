//! `NIGHTDEALER_*` variables, observed through `cfg`, `sim` and `play`.

use serial_test::serial;
use serde_json::Value;
use std::io::{Cursor, Write};

const VARS: [&str; 4] = [
    "NIGHTDEALER_CONFIG",
    "NIGHTDEALER_SEED",
    "NIGHTDEALER_ECLIPSE_CHANCE",
    "NIGHTDEALER_AI",
];

fn clear_env() {
    for var in VARS {
        unsafe {
            std::env::remove_var(var);
        }
    }
}

fn set_env(key: &str, value: &str) {
    unsafe {
        std::env::set_var(key, value);
    }
}

fn run(args: &[&str], input: &str) -> (i32, String, String) {
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
#[serial]
fn cfg_shows_defaults() {
    clear_env();
    let (code, out, _) = run(&["nightdealer", "cfg"], "");
    assert_eq!(code, 0);
    let json: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["seed"]["value"], Value::Null);
    assert_eq!(json["ai"]["value"], "baseline");
    for field in ["seed", "ai", "eclipse_chance", "max_rounds"] {
        assert_eq!(json[field]["source"], "default", "{}", field);
    }
}

#[test]
#[serial]
fn env_beats_file_and_flags_beat_env() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "seed = 10\nai = \"greedy\"\neclipse_chance = 0.0").unwrap();
    set_env("NIGHTDEALER_CONFIG", &file.path().to_string_lossy());
    set_env("NIGHTDEALER_SEED", "20");

    let (code, out, _) = run(&["nightdealer", "cfg"], "");
    assert_eq!(code, 0);
    let json: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["seed"]["value"], 20);
    assert_eq!(json["seed"]["source"], "env");
    assert_eq!(json["ai"]["value"], "greedy");
    assert_eq!(json["ai"]["source"], "file");
    assert_eq!(json["eclipse_chance"]["source"], "file");

    let (_, out, _) = run(&["nightdealer", "sim"], "");
    assert!(out.starts_with("sim: matches=1 seed=20 p1=GreedyAI p2=GreedyAI"));

    let (_, out, _) = run(&["nightdealer", "sim", "--seed", "30", "--ai", "random"], "");
    assert!(out.starts_with("sim: matches=1 seed=30 p1=RandomAI"));

    let (_, out, _) = run(&["nightdealer", "play"], "quit\n");
    assert!(out.contains("play: vs=ai seed=20"));
    assert!(out.contains("GreedyAI plays P2"));
    clear_env();
}

#[test]
#[serial]
fn invalid_environment_fails_every_command() {
    clear_env();
    set_env("NIGHTDEALER_ECLIPSE_CHANCE", "2.5");
    for args in [&["nightdealer", "cfg"][..], &["nightdealer", "sim"]] {
        let (code, out, err) = run(args, "");
        assert_eq!(code, 2);
        assert!(out.is_empty());
        assert!(err.starts_with("Error: Invalid configuration:"), "{}", err);
    }
    clear_env();
}

#[test]
#[serial]
fn unreadable_config_file_is_reported() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nightdealer.toml");
    set_env("NIGHTDEALER_CONFIG", &missing.to_string_lossy());
    let (code, _, err) = run(&["nightdealer", "cfg"], "");
    assert_eq!(code, 2);
    assert!(err.contains("cannot read config file"));
    clear_env();
}
