//! # brandi-ai: Automated Players for Brandi Dog
//!
//! Bots pick the next event for a seat: which card to hand the partner during
//! the swap phase, and which move to make (or whether to fold) on their turn.
//! They are used by the simulator and by tests that drive whole games.
//!
//! ## Core Components
//!
//! - [`Bot`] - Trait defining the interface for automated decisions
//! - [`baseline`] - Greedy bot that maximizes its team's progress
//! - [`random`] - Seeded bot choosing uniformly among legal events
//! - [`table`] - Drives a game to its end with one bot per seat
//! - [`create_bot`] - Factory function for creating bots by name
//!
//! ## Quick Start
//!
//! ```rust
//! use brandi_ai::{create_bot, table};
//!
//! let mut bots: Vec<_> = (0..4).map(|_| create_bot("baseline", 1).unwrap()).collect();
//! let played = table::play(Some(3), &mut bots, 200).unwrap();
//! assert!(played.record.events.len() > 0);
//! ```

use brandi_engine::cards::CardId;
use brandi_engine::game::{Game, MoveRequest};
use brandi_engine::player::PlayerId;

pub mod baseline;
pub mod random;
pub mod table;

/// An event a bot wants to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Swap(CardId),
    Move(MoveRequest),
    Fold,
}

/// Interface for automated players.
///
/// # Example Implementation
///
/// ```rust
/// use brandi_ai::{Bot, Decision};
/// use brandi_engine::game::Game;
/// use brandi_engine::player::PlayerId;
///
/// struct Quitter;
///
/// impl Bot for Quitter {
///     fn decide(&mut self, game: &Game, player: &PlayerId) -> Option<Decision> {
///         let me = game.player(player).ok()?;
///         if me.may_swap_cards() && game.active_player().is_none() {
///             return me.hand().cards().first().map(|c| Decision::Swap(c.uid));
///         }
///         (game.active_player() == Some(player)).then_some(Decision::Fold)
///     }
///
///     fn name(&self) -> &str {
///         "Quitter"
///     }
/// }
/// ```
pub trait Bot: Send {
    /// The event `player` should submit now, or `None` if it is not their move.
    fn decide(&mut self, game: &Game, player: &PlayerId) -> Option<Decision>;

    fn name(&self) -> &str;
}

/// Creates a bot by name; `seed` drives bots that use randomness.
///
/// # Example
///
/// ```rust
/// use brandi_ai::create_bot;
///
/// let bot = create_bot("baseline", 0).unwrap();
/// assert_eq!(bot.name(), "BaselineBot");
/// assert!(create_bot("genius", 0).is_none());
/// ```
pub fn create_bot(kind: &str, seed: u64) -> Option<Box<dyn Bot>> {
    match kind {
        "baseline" => Some(Box::new(baseline::BaselineBot::new())),
        "random" => Some(Box::new(random::RandomBot::new(seed))),
        _ => None,
    }
}

/// Names accepted by [`create_bot`].
pub const BOT_KINDS: [&str; 2] = ["baseline", "random"];
