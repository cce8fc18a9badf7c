use brandi_cli::run;

fn deal(seed: &str) -> String {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(["brandi", "deal", "--seed", seed], &mut out, &mut err);
    assert_eq!(code, 0);
    String::from_utf8(out).unwrap()
}

#[test]
fn same_seed_same_hands() {
    assert_eq!(deal("42"), deal("42"));
}

#[test]
fn different_seeds_differ() {
    assert_ne!(deal("1"), deal("2"));
}

#[test]
fn six_cards_per_seat_in_first_round() {
    let output = deal("3");
    let seats: Vec<&str> = output.lines().filter(|l| l.starts_with("Seat ")).collect();
    assert_eq!(seats.len(), 4);
    for line in seats {
        let (_, cards) = line.split_once(": ").unwrap();
        assert_eq!(cards.split(' ').count(), 6, "{}", line);
    }
}
