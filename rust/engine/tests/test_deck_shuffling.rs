use std::collections::HashSet;

use brandi_engine::cards::{Card, Rank, STOCK_SIZE};
use brandi_engine::deck::Deck;

#[test]
fn deck_holds_108_unique_cards() {
    let mut deck = Deck::new_with_seed(42);
    let mut set = HashSet::new();
    for i in 0..STOCK_SIZE {
        let c = deck.deal_card().expect("should have 108 cards");
        assert!(set.insert(c.uid), "card {} duplicated at position {}", c, i);
    }
    assert!(deck.deal_card().is_err(), "after 108 cards, deck should be empty");
}

#[test]
fn stock_has_two_packs_and_four_jokers() {
    let mut deck = Deck::new_with_seed(5);
    let cards: Vec<Card> = (0..STOCK_SIZE).map(|_| deck.deal_card().unwrap()).collect();
    let jokers = cards.iter().filter(|c| c.rank == Rank::Joker).count();
    let sevens = cards.iter().filter(|c| c.rank == Rank::Seven).count();
    assert_eq!(jokers, 4);
    assert_eq!(sevens, 8);
    assert!(cards.iter().filter(|c| c.rank == Rank::Joker).all(|c| c.suit.is_none()));
}

#[test]
fn same_seed_yields_identical_order() {
    let mut d1 = Deck::new_with_seed(12345);
    let mut d2 = Deck::new_with_seed(12345);
    let a: Vec<Card> = (0..24).map(|_| d1.deal_card().unwrap()).collect();
    let b: Vec<Card> = (0..24).map(|_| d2.deal_card().unwrap()).collect();
    assert_eq!(a, b, "same seed must yield identical order");
}

#[test]
fn different_seeds_differ() {
    let mut d1 = Deck::new_with_seed(1);
    let mut d2 = Deck::new_with_seed(2);
    let a: Vec<Card> = (0..10).map(|_| d1.deal_card().unwrap()).collect();
    let b: Vec<Card> = (0..10).map(|_| d2.deal_card().unwrap()).collect();
    assert_ne!(
        a, b,
        "different seeds should produce different orders (high probability)"
    );
}

#[test]
fn rebuild_restores_stock_and_stays_reproducible() {
    let mut d1 = Deck::new_with_seed(77);
    let mut d2 = Deck::new_with_seed(77);
    for d in [&mut d1, &mut d2] {
        for _ in 0..30 {
            d.deal_card().unwrap();
        }
        d.rebuild();
    }
    assert_eq!(d1.remaining(), STOCK_SIZE);
    let a: Vec<Card> = (0..10).map(|_| d1.deal_card().unwrap()).collect();
    let b: Vec<Card> = (0..10).map(|_| d2.deal_card().unwrap()).collect();
    assert_eq!(a, b);
}
