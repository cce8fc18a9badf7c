//! # brandi-engine: Brandi Dog Rules Engine
//!
//! Authoritative game state for Brandi Dog, the four-player team race game
//! played with marbles and cards. Teams of two (seats 0/2 and 1/3) race their
//! marbles from base around a 64-cell ring into their home lanes; cards drive
//! every move. The engine validates and applies player events and exposes
//! public and per-player views; transport and persistence live elsewhere.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card catalog (Suit, Rank, Card) and the actions each card offers
//! - [`deck`] - Seeded 108-card deck with ChaCha20 shuffling
//! - [`board`] - Node arena for the ring and the four home lanes
//! - [`marble`] - Marble tokens and their public positions
//! - [`hand`] - Cards held by a player
//! - [`player`] - Seated player state
//! - [`rules`] - Move legality and board changes
//! - [`game`] - Game and round state machine
//! - [`state`] - Public/private projections and event responses
//! - [`logger`] - GameRecord serialization to JSONL
//! - [`registry`] - Per-process collection of running games
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use brandi_engine::cards::MoveAction;
//! use brandi_engine::game::{Game, MoveRequest};
//! use brandi_engine::state::Response;
//!
//! let mut game = Game::new("ABCD", "AAAA".into(), Some(7));
//! for id in ["AAAA", "BBBB", "CCCC", "DDDD"] {
//!     game.join(id.into(), id).unwrap();
//! }
//! game.start_game().unwrap();
//!
//! // Moving before every seat has swapped a card is rejected
//! let card = game.player(&"AAAA".into()).unwrap().hand().cards()[0].uid;
//! let marble = game.player(&"AAAA".into()).unwrap().marbles()[0].id;
//! let res = Response::from(game.move_marble(
//!     &"AAAA".into(),
//!     &MoveRequest::new(card, MoveAction::Enter, marble),
//! ));
//! assert!(!res.valid);
//! assert_eq!(res.reason.as_deref(), Some("WrongPhase"));
//! ```
//!
//! ## Deterministic Gameplay
//!
//! All shuffles are reproducible from the deck seed:
//!
//! ```rust
//! use brandi_engine::deck::Deck;
//!
//! let mut a = Deck::new_with_seed(42);
//! let mut b = Deck::new_with_seed(42);
//! assert_eq!(a.deal_card().unwrap(), b.deal_card().unwrap());
//! ```

pub mod board;
pub mod cards;
pub mod deck;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod marble;
pub mod player;
pub mod registry;
pub mod rules;
pub mod state;
