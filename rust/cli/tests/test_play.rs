use nightdealer_cli::config::Config;
use nightdealer_cli::Vs;
use nightdealer_cli::commands::handle_play_command;
use std::io::Cursor;

fn play(vs: Vs, seed: u64, input: &str) -> (String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let mut stdin = Cursor::new(input.as_bytes().to_vec());
    handle_play_command(
        vs,
        Some(seed),
        None,
        &Config::default(),
        &mut out,
        &mut err,
        &mut stdin,
    )
    .unwrap();
    (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
}

#[test]
fn passing_every_turn_against_the_computer_loses() {
    let (out, err) = play(Vs::Ai, 42, &"go\n".repeat(10));
    assert!(err.is_empty(), "{}", err);
    assert!(out.contains("You are P1; BaselineAI plays P2."));
    assert!(out.contains("P1 played no tiles"));
    assert!(out.contains("P2 played "));
    assert!(out.contains("P2 takes the round"));
    assert!(out.contains("P2 wins the match (2 - 0)"));
    // Match ended before the input did
    assert!(!out.contains("Input closed"));
}

#[test]
fn board_is_rendered_for_the_player_on_turn() {
    let (out, _) = play(Vs::Human, 7, "board\nquit\n");
    assert!(out.contains("Round 1 Turn 1 (up to 2 tile(s))"));
    assert!(out.contains("+-------------+"));
    assert!(out.contains(" wheels: [0]"));
    assert!(out.contains("| 4 .") && out.contains("| 8 ."));
}

#[test]
fn illegal_actions_are_rejected_without_ending_the_game() {
    let (out, err) = play(Vs::Human, 9, "undo\nreroll\npass\nward 3\nquit\n");
    assert_eq!(err.matches("rejected:").count(), 4, "{}", err);
    assert!(err.contains("Nothing to cancel"));
    assert!(err.contains("Reroll not available: only from turn 2"));
    assert!(err.contains("Omen not available"));
    assert!(out.contains("Quit."));
}

#[test]
fn selecting_a_wheel_marks_it() {
    let (out, err) = play(Vs::Human, 11, "wheel 2\nquit\n");
    assert!(err.is_empty(), "{}", err);
    assert!(out.contains("[2*]"));
}

#[test]
fn hot_seat_ignores_the_ai_flag_with_a_warning() {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let mut stdin = Cursor::new(b"quit\n".to_vec());
    handle_play_command(
        Vs::Human,
        Some(1),
        Some("random".into()),
        &Config::default(),
        &mut out,
        &mut err,
        &mut stdin,
    )
    .unwrap();
    let err = String::from_utf8(err).unwrap();
    assert!(err.starts_with("WARNING: --ai has no effect"));
}
