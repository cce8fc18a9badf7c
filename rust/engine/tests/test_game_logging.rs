use std::fs;
use std::path::PathBuf;

use brandi_engine::cards::{CardId, MoveAction};
use brandi_engine::game::MoveRequest;
use brandi_engine::logger::{EventKind, EventRecord, GameLogger, GameRecord};
use brandi_engine::marble::MarbleId;

fn tmp_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("target");
    p.push(format!("{}_{}.jsonl", name, std::process::id()));
    p
}

fn record(ts: Option<String>) -> GameRecord {
    GameRecord {
        game_id: "20261018-000001".to_string(),
        seed: Some(1),
        order: vec!["AAAA".into(), "BBBB".into(), "CCCC".into(), "DDDD".into()],
        events: vec![
            EventRecord {
                round: 1,
                player: "AAAA".into(),
                event: EventKind::Swap { card: CardId(4) },
                note: "Card has been swapped.".to_string(),
            },
            EventRecord {
                round: 1,
                player: "AAAA".into(),
                event: EventKind::Move(MoveRequest::new(CardId(4), MoveAction::Enter, MarbleId(0))),
                note: "Marble 0 moved to 0.".to_string(),
            },
        ],
        rounds: 1,
        winning_team: None,
        ts,
        meta: None,
    }
}

#[test]
fn writes_jsonl_with_lf_only() {
    let path = tmp_path("gamelog");
    let mut logger = GameLogger::create(&path).expect("create logger");
    logger.write(&record(None)).expect("write");
    logger.write(&record(None)).expect("write");
    let bytes = fs::read(&path).expect("read file");
    assert!(bytes.ends_with(b"\n"));
    assert!(!bytes.contains(&b'\r'));
    let content = String::from_utf8(bytes).unwrap();
    assert_eq!(content.lines().count(), 2);
    let _ = fs::remove_file(&path);
}

#[test]
fn ts_is_generated_when_missing_and_preserved_when_present() {
    let path = tmp_path("gamelog_ts");
    let mut logger = GameLogger::create(&path).expect("create logger");
    logger.write(&record(None)).unwrap();
    logger
        .write(&record(Some("2026-10-18T12:00:00Z".to_string())))
        .unwrap();
    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<GameRecord> = content
        .lines()
        .map(|l| serde_json::from_str(l).expect("valid record"))
        .collect();
    assert!(lines[0].ts.is_some());
    assert_eq!(lines[1].ts.as_deref(), Some("2026-10-18T12:00:00Z"));
    assert_eq!(lines[1].events, record(None).events);
    let _ = fs::remove_file(&path);
}

#[test]
fn sequential_ids_increment() {
    let mut logger = GameLogger::with_seq_for_test("20261231");
    assert_eq!(logger.next_id(), "20261231-000001");
    assert_eq!(logger.next_id(), "20261231-000002");
}
