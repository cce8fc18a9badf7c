use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Seat};
use crate::cards::{Card, CardId};
use crate::hand::Hand;
use crate::marble::{Marble, MarbleId, MarbleLookup, MARBLES_PER_PLAYER};

/// External user id, resolved by the transport layer.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        PlayerId(s.to_string())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Split-seven that has been started but not yet fully walked.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct OpenSeven {
    pub card: CardId,
    pub remaining: u8,
}

/// A seated player with their hand and marbles.
#[derive(Debug, Clone)]
pub struct Player {
    id: PlayerId,
    name: String,
    pub(crate) hand: Hand,
    /// Card handed over by the partner, revealed once every seat has swapped
    pub(crate) incoming: Option<Card>,
    pub(crate) marbles: Vec<Marble>,
    pub(crate) has_folded: bool,
    pub(crate) may_swap_cards: bool,
    pub(crate) seven: Option<OpenSeven>,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            hand: Hand::new(),
            incoming: None,
            marbles: Vec::new(),
            has_folded: false,
            may_swap_cards: true,
            seven: None,
        }
    }

    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn marbles(&self) -> &[Marble] {
        &self.marbles
    }

    pub fn marble(&self, id: MarbleId) -> Option<&Marble> {
        self.marbles.iter().find(|m| m.id == id)
    }

    pub fn has_folded(&self) -> bool {
        self.has_folded
    }

    pub fn may_swap_cards(&self) -> bool {
        self.may_swap_cards
    }

    pub fn open_seven(&self) -> Option<OpenSeven> {
        self.seven
    }

    /// Steps of an open seven, or -1 when none is in progress.
    pub fn steps_of_seven_remaining(&self) -> i8 {
        self.seven.map_or(-1, |s| s.remaining as i8)
    }

    pub fn has_no_cards(&self) -> bool {
        self.hand.is_empty()
    }

    /// True once all four marbles rest in the home lane.
    pub fn has_finished(&self, board: &Board) -> bool {
        !self.marbles.is_empty() && self.marbles.iter().all(|m| m.is_home(board))
    }

    /// Binds four fresh marbles at base to the seat's entry node.
    pub(crate) fn set_starting_position(&mut self, board: &Board, seat: Seat) {
        let start = board.entry_node(seat);
        self.marbles = (0..MARBLES_PER_PLAYER)
            .map(|k| Marble::new(MarbleId::new(seat, k), seat, start))
            .collect();
    }

    pub(crate) fn marble_mut(&mut self, id: MarbleId) -> Option<&mut Marble> {
        self.marbles.iter_mut().find(|m| m.id == id)
    }
}

impl MarbleLookup for [Player] {
    fn marble(&self, id: MarbleId) -> Option<&Marble> {
        self.get(id.seat()).and_then(|p| p.marble(id))
    }
}

impl MarbleLookup for Vec<Player> {
    fn marble(&self, id: MarbleId) -> Option<&Marble> {
        self.as_slice().marble(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::PLAYER_COUNT;

    #[test]
    fn starting_position_creates_four_marbles_at_base() {
        let board = Board::new(PLAYER_COUNT);
        let mut p = Player::new("BBBB".into(), "Lara");
        p.set_starting_position(&board, 1);
        let ids: Vec<u8> = p.marbles().iter().map(|m| m.id.0).collect();
        assert_eq!(ids, vec![4, 5, 6, 7]);
        assert!(p.marbles().iter().all(|m| m.is_at_base()));
        assert!(p.marbles().iter().all(|m| m.start == board.entry_node(1)));
        assert!(!p.has_finished(&board));
        assert_eq!(p.steps_of_seven_remaining(), -1);
    }

    #[test]
    fn finished_only_when_every_marble_is_home() {
        let board = Board::new(PLAYER_COUNT);
        let mut p = Player::new("AAAA".into(), "Thilo");
        p.set_starting_position(&board, 0);
        let lane = board.lane(0);
        for (m, node) in p.marbles.iter_mut().zip(lane.iter()).take(3) {
            m.node = Some(*node);
        }
        assert!(!p.has_finished(&board));
        p.marbles[3].node = Some(lane[3]);
        assert!(p.has_finished(&board));
    }
}
