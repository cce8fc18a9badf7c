use brandi_cli::run;
use brandi_engine::logger::GameRecord;
use serial_test::serial;
use std::fs;

fn run_cli(args: &[&str]) -> (i32, String, String) {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(args.iter().copied(), &mut out, &mut err);
    (
        code,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

#[test]
#[serial]
fn sim_runs_n_games_and_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("games.jsonl");
    let (code, stdout, _) = run_cli(&[
        "brandi",
        "sim",
        "--games",
        "2",
        "--seed",
        "1",
        "--bot",
        "random",
        "--max-events",
        "300",
        "--output",
        path.to_str().unwrap(),
    ]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Simulated: 2 games"));
    let contents = fs::read_to_string(&path).unwrap();
    let records: Vec<GameRecord> = contents
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).expect("game record"))
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].seed, Some(1));
    assert_eq!(records[1].seed, Some(2));
    assert_ne!(records[0].game_id, records[1].game_id);
    assert!(records.iter().all(|r| r.ts.is_some() && r.events.len() <= 300));
}

#[test]
#[serial]
fn sim_is_reproducible_with_seed() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.jsonl");
    let b = dir.path().join("b.jsonl");
    for path in [&a, &b] {
        let (code, _, _) = run_cli(&[
            "brandi",
            "sim",
            "--games",
            "1",
            "--seed",
            "77",
            "--bot",
            "random",
            "--max-events",
            "200",
            "--output",
            path.to_str().unwrap(),
        ]);
        assert_eq!(code, 0);
    }
    let read = |p: &std::path::Path| -> GameRecord {
        serde_json::from_str(fs::read_to_string(p).unwrap().trim()).unwrap()
    };
    assert_eq!(read(&a).events, read(&b).events);
}

#[test]
#[serial]
fn unknown_bot_is_an_error() {
    let (code, _, stderr) = run_cli(&["brandi", "sim", "--bot", "oracle"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("unknown bot 'oracle'"));
}

#[test]
#[serial]
fn break_after_reports_interrupt() {
    unsafe { std::env::set_var("BRANDI_SIM_BREAK_AFTER", "1") };
    let (code, stdout, _) = run_cli(&[
        "brandi",
        "sim",
        "--games",
        "3",
        "--seed",
        "4",
        "--bot",
        "random",
        "--max-events",
        "50",
    ]);
    unsafe { std::env::remove_var("BRANDI_SIM_BREAK_AFTER") };
    assert_eq!(code, 130);
    assert!(stdout.contains("Interrupted: 1 games"));
}
