use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_stock, Card, STOCK_SIZE};
use crate::errors::GameError;

/// Shuffled supply of the full card stock.
///
/// The deck owns its RNG, so the sequence of shuffles across rounds is
/// reproducible from the seed alone.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    seed: u64,
    rng: ChaCha20Rng,
}

impl Deck {
    /// Creates a shuffled deck; a missing seed draws one from the thread RNG.
    pub fn new(seed: Option<u64>) -> Self {
        Self::new_with_seed(seed.unwrap_or_else(rand::random))
    }

    pub fn new_with_seed(seed: u64) -> Self {
        let mut deck = Self {
            cards: full_stock(),
            position: 0,
            seed,
            rng: ChaCha20Rng::seed_from_u64(seed),
        };
        deck.shuffle();
        deck
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffles whatever has not been dealt yet.
    pub fn shuffle(&mut self) {
        let position = self.position;
        self.cards[position..].shuffle(&mut self.rng);
    }

    /// Restores the full stock and shuffles it with the next draw of the RNG stream.
    pub fn rebuild(&mut self) {
        self.cards = full_stock();
        self.position = 0;
        self.shuffle();
    }

    pub fn deal_card(&mut self) -> Result<Card, GameError> {
        let card = self
            .cards
            .get(self.position)
            .copied()
            .ok_or(GameError::DeckExhausted)?;
        self.position += 1;
        Ok(card)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }

    pub fn total(&self) -> usize {
        STOCK_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dealing_past_the_end_is_an_error() {
        let mut deck = Deck::new_with_seed(3);
        for _ in 0..STOCK_SIZE {
            deck.deal_card().expect("stock not yet exhausted");
        }
        assert_eq!(deck.remaining(), 0);
        assert_eq!(deck.deal_card(), Err(GameError::DeckExhausted));
    }

    #[test]
    fn rebuild_restores_full_stock_in_a_new_order() {
        let mut deck = Deck::new_with_seed(11);
        let first: Vec<Card> = (0..10).map(|_| deck.deal_card().unwrap()).collect();
        deck.rebuild();
        assert_eq!(deck.remaining(), STOCK_SIZE);
        let second: Vec<Card> = (0..10).map(|_| deck.deal_card().unwrap()).collect();
        assert_ne!(first, second);
    }
}
