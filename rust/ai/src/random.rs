//! Bot choosing uniformly among legal events, reproducible from its seed.

use crate::{Bot, Decision};
use brandi_engine::game::{Game, RoundState};
use brandi_engine::player::PlayerId;
use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_chacha::ChaCha20Rng;

#[derive(Debug, Clone)]
pub struct RandomBot {
    rng: ChaCha20Rng,
}

impl RandomBot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl Bot for RandomBot {
    fn decide(&mut self, game: &Game, player: &PlayerId) -> Option<Decision> {
        let me = game.player(player).ok()?;
        if game.round_state() == RoundState::AwaitingSwap {
            if !me.may_swap_cards() {
                return None;
            }
            return me
                .hand()
                .cards()
                .choose(&mut self.rng)
                .map(|c| Decision::Swap(c.uid));
        }
        if game.active_player() != Some(player) {
            return None;
        }
        let moves = game.legal_moves(player).ok()?;
        match moves.choose(&mut self.rng) {
            Some(req) => Some(Decision::Move(req.clone())),
            None => Some(Decision::Fold),
        }
    }

    fn name(&self) -> &str {
        "RandomBot"
    }
}
