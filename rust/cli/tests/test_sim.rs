use nightdealer_engine::record::MatchRecord;
use nightdealer_engine::tiles::PlayerId;
use std::io::Cursor;

fn run(args: &[&str]) -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let mut stdin = Cursor::new(Vec::new());
    let code = nightdealer_cli::run_with_input(args.iter(), &mut stdin, &mut out, &mut err);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
fn jsonl_records_describe_whole_matches() {
    let (code, out, err) = run(&[
        "nightdealer",
        "sim",
        "--matches",
        "3",
        "--seed",
        "2024",
        "--ai",
        "greedy",
        "--opponent",
        "random",
        "--jsonl",
    ]);
    assert_eq!(code, 0, "{}", err);
    let records: Vec<MatchRecord> = out
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 3);
    for (i, rec) in records.iter().enumerate() {
        assert_eq!(rec.seed, 2024 + i as u64);
        assert_eq!(
            rec.players,
            Some(["GreedyAI".to_string(), "RandomAI".to_string()])
        );
        assert!((2..=3).contains(&rec.rounds.len()));
        assert_eq!(rec.turns.len(), rec.rounds.len() * 6);
        let wins = |p: PlayerId| rec.rounds.iter().filter(|r| r.winner == Some(p)).count();
        match rec.outcome.and_then(|o| o.winner()) {
            Some(p) => assert!(wins(p) > wins(p.other())),
            None => assert_eq!(wins(PlayerId::One), wins(PlayerId::Two)),
        }
        for round in &rec.rounds {
            assert!(round.tiles[0] + round.tiles[1] <= 9);
        }
    }
    assert!(err.contains("sim: matches=3 seed=2024 p1=GreedyAI p2=RandomAI"));
    assert!(err.contains("Avg tiles per round"));
}

#[test]
fn summary_is_reproducible() {
    let args = ["nightdealer", "sim", "--matches", "3", "--seed", "77"];
    let (_, first, _) = run(&args);
    let (_, second, _) = run(&args);
    assert_eq!(first, second);
    assert!(first.starts_with("sim: matches=3 seed=77 p1=BaselineAI p2=BaselineAI"));
}

#[test]
fn opponent_defaults_to_the_p1_type() {
    let (code, out, _) = run(&["nightdealer", "sim", "--seed", "1", "--ai", "random"]);
    assert_eq!(code, 0);
    assert!(out.contains("p1=RandomAI p2=RandomAI"));
    assert!(out.contains("sim: matches=1"));
}
