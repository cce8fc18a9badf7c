//! Move legality over the board, independent of turn and card bookkeeping.
//!
//! Every check produces a [`Plan`] without touching the board; [`apply`]
//! commits a plan. Callers validate first and apply second, so a rejected
//! move never leaves partial changes behind.

use crate::board::{Board, NodeId, Seat, LANE_LEN};
use crate::errors::IllegalMove;
use crate::marble::{Marble, MarbleId, MarbleLookup};
use crate::player::Player;

/// Nodes walked by the backwards four.
pub const BACKWARD_STEPS: u8 = 4;
/// Units distributed by a split seven.
pub const SEVEN_STEPS: u8 = 7;

/// A validated board change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// Move one marble along `path`, ending on its last node.
    Relocate {
        marble: MarbleId,
        path: Vec<NodeId>,
        /// Kick on every visited node instead of the landing node only
        kick_along: bool,
        blocking: bool,
        can_enter_goal: bool,
    },
    /// Exchange the nodes of two marbles.
    Switch { first: MarbleId, second: MarbleId },
}

impl Plan {
    pub fn destination(&self) -> Option<NodeId> {
        match self {
            Plan::Relocate { path, .. } => path.last().copied(),
            Plan::Switch { .. } => None,
        }
    }
}

/// Whether a marble standing on `at` turns into its home lane with `remaining` steps left.
fn diverts_home<M: MarbleLookup + ?Sized>(
    board: &Board,
    marbles: &M,
    marble: &Marble,
    at: NodeId,
    remaining: usize,
) -> bool {
    marble.can_enter_goal
        && board.owner_of_entry(at) == Some(marble.owner)
        && remaining <= LANE_LEN
        && board.lane(marble.owner)[..remaining]
            .iter()
            .all(|&n| !board.is_blocking(n, marbles))
}

fn step<M: MarbleLookup + ?Sized>(
    board: &Board,
    marbles: &M,
    marble: &Marble,
    at: NodeId,
    remaining: usize,
) -> Result<NodeId, IllegalMove> {
    let next = if diverts_home(board, marbles, marble, at, remaining) {
        board.exit(at)
    } else {
        board.next(at)
    };
    let next = next.ok_or(IllegalMove::LaneOverrun { marble: marble.id })?;
    if board.is_blocking(next, marbles) {
        return Err(IllegalMove::Blocked {
            position: board.position_of(next),
        });
    }
    Ok(next)
}

/// Path of a forward move of `steps` nodes.
///
/// With `per_unit` each step is judged on its own (split seven), otherwise the
/// lane is only entered when the whole remainder fits into it.
pub fn walk_forward<M: MarbleLookup + ?Sized>(
    board: &Board,
    marbles: &M,
    marble: &Marble,
    steps: u8,
    per_unit: bool,
) -> Result<Vec<NodeId>, IllegalMove> {
    let mut at = marble
        .node
        .ok_or(IllegalMove::StillAtBase { marble: marble.id })?;
    let steps = steps as usize;
    let mut path = Vec::with_capacity(steps);
    for i in 0..steps {
        let remaining = if per_unit { 1 } else { steps - i };
        at = step(board, marbles, marble, at, remaining)?;
        path.push(at);
    }
    Ok(path)
}

pub fn walk_backward<M: MarbleLookup + ?Sized>(
    board: &Board,
    marbles: &M,
    marble: &Marble,
) -> Result<Vec<NodeId>, IllegalMove> {
    let mut at = marble
        .node
        .ok_or(IllegalMove::StillAtBase { marble: marble.id })?;
    if board.is_lane(at) {
        return Err(IllegalMove::LaneLocked { marble: marble.id });
    }
    let mut path = Vec::with_capacity(BACKWARD_STEPS as usize);
    for _ in 0..BACKWARD_STEPS {
        at = board
            .prev(at)
            .ok_or(IllegalMove::LaneLocked { marble: marble.id })?;
        if board.is_blocking(at, marbles) {
            return Err(IllegalMove::Blocked {
                position: board.position_of(at),
            });
        }
        path.push(at);
    }
    Ok(path)
}

/// Single steps a marble can take before hitting a blocker, up to `cap`.
pub fn runway<M: MarbleLookup + ?Sized>(
    board: &Board,
    marbles: &M,
    marble: &Marble,
    cap: u8,
) -> u8 {
    let Some(mut at) = marble.node else {
        return 0;
    };
    let mut n = 0;
    while n < cap {
        match step(board, marbles, marble, at, 1) {
            Ok(next) => {
                at = next;
                n += 1;
            }
            Err(_) => break,
        }
    }
    n
}

/// Total runway of a player's marbles, each capped at a full seven.
pub fn seven_capacity<M: MarbleLookup + ?Sized>(board: &Board, marbles: &M, own: &[Marble]) -> u8 {
    own.iter()
        .map(|m| runway(board, marbles, m, SEVEN_STEPS))
        .fold(0u8, u8::saturating_add)
}

/// Whether the marbles of `seat` can still walk `units` seven steps one at a time.
///
/// Searches the orders in which the units could be spent, since a unit may
/// kick an own marble or close the home lane for another one.
pub fn seven_walkable(board: &Board, players: &[Player], seat: Seat, units: u8) -> bool {
    if units == 0 {
        return true;
    }
    let Some(player) = players.get(seat) else {
        return false;
    };
    player.marbles().iter().any(|marble| {
        let Ok(plan) = plan_seven_units(board, players, marble, 1) else {
            return false;
        };
        let mut board = board.clone();
        let mut players = players.to_vec();
        apply(&mut board, &mut players, &plan);
        seven_walkable(&board, &players, seat, units - 1)
    })
}

pub fn plan_enter(board: &Board, players: &[Player], marble: &Marble) -> Result<Plan, IllegalMove> {
    if !marble.is_at_base() {
        return Err(IllegalMove::NotAtBase { marble: marble.id });
    }
    if board.is_blocking(marble.start, players) {
        return Err(IllegalMove::Blocked {
            position: board.position_of(marble.start),
        });
    }
    Ok(Plan::Relocate {
        marble: marble.id,
        path: vec![marble.start],
        kick_along: false,
        blocking: true,
        can_enter_goal: false,
    })
}

pub fn plan_forward(
    board: &Board,
    players: &[Player],
    marble: &Marble,
    steps: u8,
) -> Result<Plan, IllegalMove> {
    let path = walk_forward(board, players, marble, steps, false)?;
    Ok(relocation(board, marble, path, false))
}

pub fn plan_backward(board: &Board, players: &[Player], marble: &Marble) -> Result<Plan, IllegalMove> {
    let path = walk_backward(board, players, marble)?;
    Ok(relocation(board, marble, path, false))
}

/// A chunk of a split seven: `units` single steps, kicking on every node passed.
pub fn plan_seven_units(
    board: &Board,
    players: &[Player],
    marble: &Marble,
    units: u8,
) -> Result<Plan, IllegalMove> {
    let path = walk_forward(board, players, marble, units, true)?;
    Ok(relocation(board, marble, path, true))
}

fn relocation(board: &Board, marble: &Marble, path: Vec<NodeId>, kick_along: bool) -> Plan {
    let blocking = path.last().is_some_and(|&n| board.is_lane(n));
    Plan::Relocate {
        marble: marble.id,
        path,
        kick_along,
        blocking,
        can_enter_goal: true,
    }
}

pub fn plan_switch(
    board: &Board,
    players: &[Player],
    first: &Marble,
    second: &Marble,
) -> Result<Plan, IllegalMove> {
    if first.owner == second.owner {
        return Err(IllegalMove::SelfSwitch);
    }
    let a = first
        .node
        .ok_or(IllegalMove::StillAtBase { marble: first.id })?;
    let b = second
        .node
        .ok_or(IllegalMove::TargetNotFound { marble: second.id })?;
    for node in [a, b] {
        if board.is_blocking(node, players) {
            return Err(IllegalMove::Blocked {
                position: board.position_of(node),
            });
        }
    }
    Ok(Plan::Switch {
        first: first.id,
        second: second.id,
    })
}

/// Kicks a non-moving occupant of `node` back to base.
fn kick(board: &mut Board, players: &mut [Player], node: NodeId, mover: MarbleId) {
    let Some(other) = board.occupant(node) else {
        return;
    };
    if other == mover {
        return;
    }
    if let Some(victim) = players
        .get_mut(other.seat())
        .and_then(|p| p.marble_mut(other))
    {
        victim.reset_to_base();
    }
    board.vacate(node);
    tracing::debug!(marble = %other, node = node.0, "marble kicked to base");
}

/// Commits a plan produced by one of the `plan_*` functions.
pub fn apply(board: &mut Board, players: &mut [Player], plan: &Plan) {
    match plan {
        Plan::Relocate {
            marble,
            path,
            kick_along,
            blocking,
            can_enter_goal,
        } => {
            let Some(&to) = path.last() else {
                return;
            };
            let kicks = if *kick_along { &path[..] } else { &path[path.len() - 1..] };
            for &node in kicks {
                kick(board, players, node, *marble);
            }
            let Some(m) = players
                .get_mut(marble.seat())
                .and_then(|p| p.marble_mut(*marble))
            else {
                return;
            };
            if let Some(from) = m.node {
                board.vacate(from);
            }
            m.node = Some(to);
            m.blocking = *blocking;
            m.can_enter_goal = *can_enter_goal;
            board.place(to, *marble);
        }
        Plan::Switch { first, second } => {
            let a = players.marble(*first).and_then(|m| m.node);
            let b = players.marble(*second).and_then(|m| m.node);
            let (Some(a), Some(b)) = (a, b) else {
                return;
            };
            for (id, node) in [(*first, b), (*second, a)] {
                if let Some(m) = players.get_mut(id.seat()).and_then(|p| p.marble_mut(id)) {
                    m.node = Some(node);
                }
                board.place(node, id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::PLAYER_COUNT;
    use crate::player::PlayerId;

    fn table() -> (Board, Vec<Player>) {
        let board = Board::new(PLAYER_COUNT);
        let players = ["AAAA", "BBBB", "CCCC", "DDDD"]
            .iter()
            .enumerate()
            .map(|(seat, id)| {
                let mut p = Player::new(PlayerId::from(*id), *id);
                p.set_starting_position(&board, seat);
                p
            })
            .collect();
        (board, players)
    }

    fn put(board: &mut Board, players: &mut [Player], id: MarbleId, pos: i32, blocking: bool) {
        let node = board.node_at(pos).unwrap();
        let m = players[id.seat()].marble_mut(id).unwrap();
        m.node = Some(node);
        m.blocking = blocking;
        m.can_enter_goal = !blocking || board.is_lane(node);
        board.place(node, id);
    }

    #[test]
    fn forward_stops_at_blocking_marble() {
        let (mut board, mut players) = table();
        put(&mut board, &mut players, MarbleId(0), 10, false);
        put(&mut board, &mut players, MarbleId(4), 16, true);
        let m = players[0].marbles[0].clone();
        assert_eq!(
            plan_forward(&board, &players, &m, 8),
            Err(IllegalMove::Blocked { position: 16 })
        );
        assert!(plan_forward(&board, &players, &m, 5).is_ok());
    }

    #[test]
    fn forward_enters_own_lane_when_it_fits() {
        let (mut board, mut players) = table();
        put(&mut board, &mut players, MarbleId(1), 60, false);
        let m = players[0].marbles[1].clone();
        let plan = plan_forward(&board, &players, &m, 6).unwrap();
        assert_eq!(plan.destination().map(|n| board.position_of(n)), Some(1002));
        // nine steps cannot fit into the lane, so the marble stays on the track
        let plan = plan_forward(&board, &players, &m, 9).unwrap();
        assert_eq!(plan.destination().map(|n| board.position_of(n)), Some(5));
    }

    #[test]
    fn occupied_lane_cell_keeps_marble_on_track() {
        let (mut board, mut players) = table();
        put(&mut board, &mut players, MarbleId(1), 62, false);
        put(&mut board, &mut players, MarbleId(2), 1001, true);
        let m = players[0].marbles[1].clone();
        let plan = plan_forward(&board, &players, &m, 4).unwrap();
        assert_eq!(plan.destination().map(|n| board.position_of(n)), Some(2));
    }

    #[test]
    fn fresh_marble_passes_its_own_entry() {
        let (mut board, mut players) = table();
        put(&mut board, &mut players, MarbleId(0), 0, true);
        players[0].marbles[0].can_enter_goal = false;
        let m = players[0].marbles[0].clone();
        let plan = plan_forward(&board, &players, &m, 3).unwrap();
        assert_eq!(plan.destination().map(|n| board.position_of(n)), Some(3));
    }

    #[test]
    fn lane_overrun_is_rejected() {
        let (mut board, mut players) = table();
        put(&mut board, &mut players, MarbleId(0), 1003, true);
        let m = players[0].marbles[0].clone();
        assert_eq!(
            plan_forward(&board, &players, &m, 2),
            Err(IllegalMove::LaneOverrun { marble: MarbleId(0) })
        );
        assert_eq!(
            plan_backward(&board, &players, &m),
            Err(IllegalMove::LaneLocked { marble: MarbleId(0) })
        );
    }

    #[test]
    fn backward_wraps_around_the_track() {
        let (mut board, mut players) = table();
        put(&mut board, &mut players, MarbleId(0), 2, false);
        let m = players[0].marbles[0].clone();
        let plan = plan_backward(&board, &players, &m).unwrap();
        assert_eq!(plan.destination().map(|n| board.position_of(n)), Some(62));
    }

    #[test]
    fn apply_kicks_landing_occupant() {
        let (mut board, mut players) = table();
        put(&mut board, &mut players, MarbleId(12), 48, false);
        put(&mut board, &mut players, MarbleId(0), 60, false);
        let m = players[3].marbles[0].clone();
        let plan = plan_forward(&board, &players, &m, 12).unwrap();
        apply(&mut board, &mut players, &plan);
        assert_eq!(players[3].marbles[0].position(&board), 60);
        assert!(players[0].marbles[0].is_at_base());
        assert_eq!(board.occupant(board.node_at(60).unwrap()), Some(MarbleId(12)));
        assert!(!board.has_marble(board.node_at(48).unwrap()));
    }

    #[test]
    fn seven_units_kick_everything_passed() {
        let (mut board, mut players) = table();
        put(&mut board, &mut players, MarbleId(4), 20, false);
        put(&mut board, &mut players, MarbleId(8), 21, false);
        put(&mut board, &mut players, MarbleId(9), 23, false);
        let m = players[1].marbles[0].clone();
        let plan = plan_seven_units(&board, &players, &m, 3).unwrap();
        apply(&mut board, &mut players, &plan);
        assert_eq!(players[1].marbles[0].position(&board), 23);
        assert!(players[2].marbles[0].is_at_base());
        assert!(players[2].marbles[1].is_at_base());
    }

    #[test]
    fn runway_counts_up_to_blocker() {
        let (mut board, mut players) = table();
        put(&mut board, &mut players, MarbleId(0), 11, false);
        put(&mut board, &mut players, MarbleId(4), 16, true);
        let m = players[0].marbles[0].clone();
        assert_eq!(runway(&board, &players, &m, 7), 4);
        assert_eq!(seven_capacity(&board, &players, &players[0].marbles), 4);
    }

    #[test]
    fn seven_walkable_tries_every_order() {
        let (mut board, mut players) = table();
        put(&mut board, &mut players, MarbleId(0), 9, false);
        put(&mut board, &mut players, MarbleId(1), 12, false);
        put(&mut board, &mut players, MarbleId(4), 16, true);
        // front marble to 15 first, then the back one catches up and kicks it
        assert!(seven_walkable(&board, &players, 0, 9));
        assert!(!seven_walkable(&board, &players, 0, 10));
        assert!(seven_walkable(&board, &players, 0, 0));
        assert!(!seven_walkable(&board, &players, 2, 1));
    }

    #[test]
    fn switch_requires_unblocked_marbles_of_different_players() {
        let (mut board, mut players) = table();
        put(&mut board, &mut players, MarbleId(0), 5, false);
        put(&mut board, &mut players, MarbleId(1), 7, false);
        put(&mut board, &mut players, MarbleId(4), 16, true);
        put(&mut board, &mut players, MarbleId(8), 40, false);
        let p = |s: usize, k: usize| players[s].marbles[k].clone();
        assert_eq!(
            plan_switch(&board, &players, &p(0, 0), &p(0, 1)),
            Err(IllegalMove::SelfSwitch)
        );
        assert_eq!(
            plan_switch(&board, &players, &p(0, 0), &p(1, 0)),
            Err(IllegalMove::Blocked { position: 16 })
        );
        assert_eq!(
            plan_switch(&board, &players, &p(0, 0), &p(3, 0)),
            Err(IllegalMove::TargetNotFound { marble: MarbleId(12) })
        );
        let plan = plan_switch(&board, &players, &p(0, 0), &p(2, 0)).unwrap();
        apply(&mut board, &mut players, &plan);
        assert_eq!(players[0].marbles[0].position(&board), 40);
        assert_eq!(players[2].marbles[0].position(&board), 5);
        assert_eq!(board.occupant(board.node_at(5).unwrap()), Some(MarbleId(8)));
    }
}
