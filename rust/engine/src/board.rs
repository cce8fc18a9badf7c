//! Track and home lanes as an arena of linked nodes.
//!
//! Track nodes `0..64` form one circle; every sixteenth node is the
//! entry/exit node of a seat and carries an `exit` link into that seat's
//! private four-node home lane. Lanes only link forward towards their last
//! cell and have no way back onto the track.

use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::marble::{MarbleId, MarbleLookup};

/// Seat index in the game's turn order (0..4).
pub type Seat = usize;

/// Number of seats at the table.
pub const PLAYER_COUNT: usize = 4;
/// Track nodes between two consecutive entry nodes.
pub const NODES_BETWEEN_PLAYERS: usize = 16;
/// Length of the shared circular track.
pub const TRACK_LEN: usize = NODES_BETWEEN_PLAYERS * PLAYER_COUNT;
/// Cells in each home lane.
pub const LANE_LEN: usize = 4;
/// Public positions of lane cells start above this offset.
pub const LANE_POSITION_BASE: i32 = 1000;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct NodeId(pub usize);

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum NodeKind {
    Track { position: usize },
    /// `depth` counts from 1 (first lane cell) to [`LANE_LEN`] (terminal cell).
    Lane { seat: Seat, depth: usize },
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub next: Option<NodeId>,
    pub prev: Option<NodeId>,
    pub exit: Option<NodeId>,
    pub entry_for: Option<Seat>,
    occupant: Option<MarbleId>,
}

#[derive(Debug, Clone)]
pub struct Board {
    nodes: Vec<Node>,
    seats: usize,
}

impl Board {
    pub fn new(seats: usize) -> Self {
        let track_len = NODES_BETWEEN_PLAYERS * seats;
        let mut nodes = Vec::with_capacity(track_len + LANE_LEN * seats);
        for position in 0..track_len {
            let entry_for = (position % NODES_BETWEEN_PLAYERS == 0)
                .then_some(position / NODES_BETWEEN_PLAYERS);
            nodes.push(Node {
                kind: NodeKind::Track { position },
                next: Some(NodeId((position + 1) % track_len)),
                prev: Some(NodeId((position + track_len - 1) % track_len)),
                exit: entry_for.map(|seat| NodeId(track_len + seat * LANE_LEN)),
                entry_for,
                occupant: None,
            });
        }
        for seat in 0..seats {
            let first = track_len + seat * LANE_LEN;
            for k in 0..LANE_LEN {
                nodes.push(Node {
                    kind: NodeKind::Lane { seat, depth: k + 1 },
                    next: (k + 1 < LANE_LEN).then_some(NodeId(first + k + 1)),
                    prev: (k > 0).then(|| NodeId(first + k - 1)),
                    exit: None,
                    entry_for: None,
                    occupant: None,
                });
            }
        }
        Self { nodes, seats }
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Resolves a public position (track `0..64` or lane code) to its node.
    pub fn node_at(&self, position: i32) -> Result<NodeId, GameError> {
        let track_len = (NODES_BETWEEN_PLAYERS * self.seats) as i32;
        if (0..track_len).contains(&position) {
            return Ok(NodeId(position as usize));
        }
        let code = position - LANE_POSITION_BASE;
        let (seat, depth) = (code / 10, code % 10);
        if code > 0 && (seat as usize) < self.seats && (1..=LANE_LEN as i32).contains(&depth) {
            return Ok(self.lane(seat as usize)[depth as usize - 1]);
        }
        Err(GameError::OutOfRange { position })
    }

    /// Public position of a node; lane cells encode as `1000 + 10 * seat + depth`.
    pub fn position_of(&self, id: NodeId) -> i32 {
        match self.node(id).kind {
            NodeKind::Track { position } => position as i32,
            NodeKind::Lane { seat, depth } => LANE_POSITION_BASE + 10 * seat as i32 + depth as i32,
        }
    }

    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next
    }

    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).prev
    }

    pub fn exit(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).exit
    }

    pub fn entry_node(&self, seat: Seat) -> NodeId {
        NodeId(seat * NODES_BETWEEN_PLAYERS)
    }

    pub fn lane(&self, seat: Seat) -> [NodeId; LANE_LEN] {
        let first = NODES_BETWEEN_PLAYERS * self.seats + seat * LANE_LEN;
        std::array::from_fn(|k| NodeId(first + k))
    }

    /// Seat whose entry/exit node this is, `None` for ordinary cells.
    pub fn owner_of_entry(&self, id: NodeId) -> Option<Seat> {
        self.node(id).entry_for
    }

    pub fn lane_seat(&self, id: NodeId) -> Option<Seat> {
        match self.node(id).kind {
            NodeKind::Lane { seat, .. } => Some(seat),
            NodeKind::Track { .. } => None,
        }
    }

    pub fn is_lane(&self, id: NodeId) -> bool {
        self.lane_seat(id).is_some()
    }

    pub fn occupant(&self, id: NodeId) -> Option<MarbleId> {
        self.node(id).occupant
    }

    pub fn has_marble(&self, id: NodeId) -> bool {
        self.occupant(id).is_some()
    }

    pub fn is_blocking<M: MarbleLookup + ?Sized>(&self, id: NodeId, marbles: &M) -> bool {
        self.occupant(id)
            .and_then(|mid| marbles.marble(mid))
            .is_some_and(|m| m.blocking)
    }

    /// All occupied nodes with their marble.
    pub fn occupied(&self) -> impl Iterator<Item = (NodeId, MarbleId)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.occupant.map(|m| (NodeId(i), m)))
    }

    pub(crate) fn place(&mut self, id: NodeId, marble: MarbleId) {
        self.nodes[id.0].occupant = Some(marble);
    }

    pub(crate) fn vacate(&mut self, id: NodeId) {
        self.nodes[id.0].occupant = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_is_circular() {
        let board = Board::new(PLAYER_COUNT);
        assert_eq!(board.next(NodeId(63)), Some(NodeId(0)));
        assert_eq!(board.prev(NodeId(0)), Some(NodeId(63)));
        assert_eq!(board.next(NodeId(10)), Some(NodeId(11)));
    }

    #[test]
    fn entry_nodes_are_owned_every_sixteen_cells() {
        let board = Board::new(PLAYER_COUNT);
        for seat in 0..PLAYER_COUNT {
            let entry = board.entry_node(seat);
            assert_eq!(board.owner_of_entry(entry), Some(seat));
            assert_eq!(board.exit(entry), Some(board.lane(seat)[0]));
        }
        assert_eq!(board.owner_of_entry(NodeId(5)), None);
        assert_eq!(board.exit(NodeId(5)), None);
    }

    #[test]
    fn lanes_never_lead_back_to_the_track() {
        let board = Board::new(PLAYER_COUNT);
        let lane = board.lane(2);
        assert_eq!(board.prev(lane[0]), None);
        assert_eq!(board.next(lane[3]), None);
        assert_eq!(board.next(lane[1]), Some(lane[2]));
        assert_eq!(board.prev(lane[2]), Some(lane[1]));
    }

    #[test]
    fn positions_round_trip() {
        let board = Board::new(PLAYER_COUNT);
        assert_eq!(board.position_of(board.lane(0)[1]), 1002);
        assert_eq!(board.position_of(board.lane(3)[3]), 1034);
        for pos in (0..64).chain([1001, 1014, 1023, 1031]) {
            let id = board.node_at(pos).unwrap();
            assert_eq!(board.position_of(id), pos);
        }
    }

    #[test]
    fn node_at_rejects_unknown_positions() {
        let board = Board::new(PLAYER_COUNT);
        for pos in [-1, 64, 1000, 1005, 1040, 999] {
            assert_eq!(
                board.node_at(pos),
                Err(GameError::OutOfRange { position: pos })
            );
        }
    }
}
