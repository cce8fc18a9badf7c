//! Greedy bot for simulations and tests.
//!
//! Tries every legal move on a copy of the game and keeps the one that leaves
//! its team furthest ahead of the opponents.

use crate::{Bot, Decision};
use brandi_engine::board::{Seat, LANE_POSITION_BASE, NODES_BETWEEN_PLAYERS, TRACK_LEN};
use brandi_engine::game::{Game, MoveRequest, RoundState};
use brandi_engine::player::PlayerId;

/// Bonus for a marble resting in its home lane, on top of a full lap.
const HOME_BONUS: i32 = 8;

/// Rule-based bot that maximizes team progress one event at a time.
///
/// # Strategy
///
/// - Swap: hands the partner its lowest card
/// - Move: simulates each legal move and scores own team progress minus
///   opponent progress; a winning move beats everything
/// - Fold: only when no card can be played
///
/// # Example
///
/// ```rust
/// use brandi_ai::baseline::BaselineBot;
/// use brandi_ai::Bot;
///
/// let bot = BaselineBot::new();
/// assert_eq!(bot.name(), "BaselineBot");
/// ```
#[derive(Debug, Clone, Default)]
pub struct BaselineBot;

impl BaselineBot {
    pub fn new() -> Self {
        Self
    }

    /// Distance covered by a seat's marbles: 0 at base, one per track cell
    /// past the entry, a full lap plus depth in the home lane.
    pub fn progress(game: &Game, seat: Seat) -> i32 {
        let Some(player) = game.players().get(seat) else {
            return 0;
        };
        let lap = TRACK_LEN as i32;
        let entry = (seat * NODES_BETWEEN_PLAYERS) as i32;
        player
            .marbles()
            .iter()
            .map(|m| {
                let pos = m.position(game.board());
                if pos < 0 {
                    0
                } else if pos >= LANE_POSITION_BASE {
                    lap + HOME_BONUS + pos % 10
                } else {
                    (pos - entry).rem_euclid(lap) + 1
                }
            })
            .sum()
    }

    /// Team progress minus opponent progress, seen from `seat`.
    pub fn evaluate(game: &Game, seat: Seat) -> i32 {
        (0..game.players().len())
            .map(|s| {
                let p = Self::progress(game, s);
                if s % 2 == seat % 2 { p } else { -p }
            })
            .sum()
    }

    fn score(game: &Game, player: &PlayerId, seat: Seat, req: &MoveRequest) -> i32 {
        let mut trial = game.clone();
        match trial.move_marble(player, req) {
            Ok(out) if out.game_over && out.winning_team == Some(seat % 2) => i32::MAX,
            Ok(_) => Self::evaluate(&trial, seat),
            Err(_) => i32::MIN,
        }
    }
}

impl Bot for BaselineBot {
    fn decide(&mut self, game: &Game, player: &PlayerId) -> Option<Decision> {
        let me = game.player(player).ok()?;
        if game.round_state() == RoundState::AwaitingSwap {
            if !me.may_swap_cards() {
                return None;
            }
            return me
                .hand()
                .cards()
                .iter()
                .min_by_key(|c| c.rank)
                .map(|c| Decision::Swap(c.uid));
        }
        if game.active_player() != Some(player) {
            return None;
        }
        let seat = game.seat_of(player).ok()?;
        let moves = game.legal_moves(player).ok()?;
        if moves.is_empty() {
            return Some(Decision::Fold);
        }
        moves
            .into_iter()
            .map(|req| (Self::score(game, player, seat, &req), req))
            .max_by_key(|(score, _)| *score)
            .map(|(_, req)| Decision::Move(req))
    }

    fn name(&self) -> &str {
        "BaselineBot"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table;

    #[test]
    fn fresh_game_has_no_progress() {
        let game = table::seat_game(Some(4)).unwrap();
        for seat in 0..4 {
            assert_eq!(BaselineBot::progress(&game, seat), 0);
            assert_eq!(BaselineBot::evaluate(&game, seat), 0);
        }
    }

    #[test]
    fn swaps_lowest_card_once() {
        let game = table::seat_game(Some(4)).unwrap();
        let mut bot = BaselineBot::new();
        let id = game.order()[0].clone();
        let lowest = game
            .player(&id)
            .unwrap()
            .hand()
            .cards()
            .iter()
            .map(|c| c.rank)
            .min()
            .unwrap();
        match bot.decide(&game, &id) {
            Some(Decision::Swap(uid)) => {
                let card = game.player(&id).unwrap().hand().get(uid).copied().unwrap();
                assert_eq!(card.rank, lowest);
            }
            other => panic!("expected a swap, got {:?}", other),
        }
    }
}
