use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};
use crate::errors::GameError;

/// Cards held by one player, kept in the order they arrived.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, card: Card) -> Result<(), GameError> {
        if self.contains(card.uid) {
            return Err(GameError::InvalidState(format!(
                "card {} is already in the hand",
                card.uid
            )));
        }
        self.cards.push(card);
        Ok(())
    }

    /// Removes and returns the card with the given uid.
    pub fn take(&mut self, uid: CardId) -> Result<Card, GameError> {
        let idx = self
            .cards
            .iter()
            .position(|c| c.uid == uid)
            .ok_or(GameError::CardNotHeld { card: uid })?;
        Ok(self.cards.remove(idx))
    }

    pub fn get(&self, uid: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.uid == uid)
    }

    pub fn contains(&self, uid: CardId) -> bool {
        self.get(uid).is_some()
    }

    /// Empties the hand, returning everything it held.
    pub fn fold(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::full_stock;

    #[test]
    fn take_returns_card_and_keeps_order() {
        let stock = full_stock();
        let mut hand = Hand::new();
        for c in &stock[..4] {
            hand.add(*c).unwrap();
        }
        assert_eq!(hand.take(stock[1].uid).unwrap(), stock[1]);
        let left: Vec<CardId> = hand.cards().iter().map(|c| c.uid).collect();
        assert_eq!(left, vec![stock[0].uid, stock[2].uid, stock[3].uid]);
        assert_eq!(
            hand.take(stock[1].uid),
            Err(GameError::CardNotHeld { card: stock[1].uid })
        );
    }

    #[test]
    fn duplicate_uid_is_rejected() {
        let stock = full_stock();
        let mut hand = Hand::new();
        hand.add(stock[7]).unwrap();
        assert!(hand.add(stock[7]).is_err());
        assert_eq!(hand.len(), 1);
    }

    #[test]
    fn fold_discards_everything() {
        let stock = full_stock();
        let mut hand = Hand::new();
        hand.add(stock[0]).unwrap();
        hand.add(stock[50]).unwrap();
        let discarded = hand.fold();
        assert_eq!(discarded.len(), 2);
        assert!(hand.is_empty());
    }
}
