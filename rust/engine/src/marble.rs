use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Board, NodeId, Seat};

/// Marbles per player.
pub const MARBLES_PER_PLAYER: usize = 4;

/// Game-wide marble id; seat `s` owns ids `4s..4s+4`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarbleId(pub u8);

impl MarbleId {
    pub fn new(seat: Seat, index: usize) -> Self {
        MarbleId((seat * MARBLES_PER_PLAYER + index) as u8)
    }

    pub fn seat(self) -> Seat {
        self.0 as usize / MARBLES_PER_PLAYER
    }
}

impl fmt::Display for MarbleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A marble token. `node` is a key into the [`Board`] arena, `None` while at base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marble {
    pub id: MarbleId,
    pub owner: Seat,
    pub node: Option<NodeId>,
    /// Entry node the marble is released onto
    pub start: NodeId,
    /// Set while freshly released onto the entry node or resting in the home lane
    pub blocking: bool,
    /// Cleared on release, set by any later move
    pub can_enter_goal: bool,
}

impl Marble {
    pub fn new(id: MarbleId, owner: Seat, start: NodeId) -> Self {
        Self {
            id,
            owner,
            node: None,
            start,
            blocking: false,
            can_enter_goal: false,
        }
    }

    pub fn is_at_base(&self) -> bool {
        self.node.is_none()
    }

    pub fn is_home(&self, board: &Board) -> bool {
        self.node.and_then(|n| board.lane_seat(n)) == Some(self.owner)
    }

    pub fn reset_to_base(&mut self) {
        self.node = None;
        self.blocking = false;
        self.can_enter_goal = false;
    }

    /// Public position: board position, or `-(id + 1)` at base.
    pub fn position(&self, board: &Board) -> i32 {
        match self.node {
            Some(n) => board.position_of(n),
            None => -(self.id.0 as i32) - 1,
        }
    }
}

/// Resolves marble ids to marbles, wherever they are stored.
pub trait MarbleLookup {
    fn marble(&self, id: MarbleId) -> Option<&Marble>;
}

impl MarbleLookup for [Marble] {
    fn marble(&self, id: MarbleId) -> Option<&Marble> {
        self.iter().find(|m| m.id == id)
    }
}
