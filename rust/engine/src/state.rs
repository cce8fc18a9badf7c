//! Serializable views of a [`Game`] for clients.
//!
//! [`PublicState`] is what every participant may see; [`PrivateState`] adds
//! the hand of one player. [`Response`] is the flat envelope an event result
//! is sent back in.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::board::Seat;
use crate::cards::Card;
use crate::errors::GameError;
use crate::game::{Game, GameState, Outcome, RoundState};
use crate::marble::{Marble, MarbleId};
use crate::player::{Player, PlayerId};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct MarbleView {
    pub mid: MarbleId,
    pub position: i32,
    pub blocking: bool,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub seat: Option<Seat>,
    pub marbles: Vec<MarbleView>,
    pub card_count: usize,
    pub has_folded: bool,
    pub steps_of_seven_remaining: i8,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PublicState {
    pub game_id: String,
    pub game_name: Option<String>,
    pub host: PlayerId,
    pub game_state: GameState,
    pub round_state: RoundState,
    pub round_turn: u32,
    pub order: Vec<PlayerId>,
    pub active_player_index: Seat,
    pub players: BTreeMap<PlayerId, PlayerView>,
    pub top_card: Option<Card>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PrivateState {
    pub id: PlayerId,
    pub name: String,
    pub hand: Vec<Card>,
    pub marbles: Vec<MarbleView>,
    pub may_swap_cards: bool,
    pub steps_of_seven_remaining: i8,
}

fn marble_views(game: &Game, marbles: &[Marble]) -> Vec<MarbleView> {
    marbles
        .iter()
        .map(|m| MarbleView {
            mid: m.id,
            position: m.position(game.board()),
            blocking: m.blocking,
        })
        .collect()
}

fn player_view(game: &Game, player: &Player) -> PlayerView {
    PlayerView {
        id: player.id().clone(),
        name: player.name().to_string(),
        seat: game.seat_of(player.id()).ok(),
        marbles: marble_views(game, player.marbles()),
        card_count: player.hand().len(),
        has_folded: player.has_folded(),
        steps_of_seven_remaining: player.steps_of_seven_remaining(),
    }
}

impl PublicState {
    pub fn of(game: &Game) -> Self {
        Self {
            game_id: game.game_id().to_string(),
            game_name: game.game_name().map(str::to_string),
            host: game.host().clone(),
            game_state: game.game_state(),
            round_state: game.round_state(),
            round_turn: game.round_turn(),
            order: game.order().to_vec(),
            active_player_index: game.active_player_index(),
            players: game
                .players()
                .iter()
                .map(|p| (p.id().clone(), player_view(game, p)))
                .collect(),
            top_card: game.top_card().copied(),
        }
    }

    /// Non-negative marble positions, i.e. every marble out on the board.
    pub fn occupied_positions(&self) -> Vec<i32> {
        let mut positions: Vec<i32> = self
            .players
            .values()
            .flat_map(|p| p.marbles.iter().map(|m| m.position))
            .filter(|&pos| pos >= 0)
            .collect();
        positions.sort_unstable();
        positions
    }
}

impl PrivateState {
    pub fn of(game: &Game, player: &PlayerId) -> Result<Self, GameError> {
        let p = game.player(player)?;
        Ok(Self {
            id: p.id().clone(),
            name: p.name().to_string(),
            hand: p.hand().cards().to_vec(),
            marbles: marble_views(game, p.marbles()),
            may_swap_cards: p.may_swap_cards(),
            steps_of_seven_remaining: p.steps_of_seven_remaining(),
        })
    }
}

impl Game {
    pub fn public_state(&self) -> PublicState {
        PublicState::of(self)
    }

    pub fn private_state(&self, player: &PlayerId) -> Result<PrivateState, GameError> {
        PrivateState::of(self, player)
    }
}

/// Flat reply to an event, accepted or not.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub valid: bool,
    /// Error tag when rejected
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reason: Option<String>,
    pub note: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub task_finished: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub round_started: Option<u32>,
    #[serde(default)]
    pub game_over: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub winning_team: Option<usize>,
}

impl From<Result<Outcome, GameError>> for Response {
    fn from(result: Result<Outcome, GameError>) -> Self {
        match result {
            Ok(out) => Response {
                valid: true,
                reason: None,
                note: out.note,
                task_finished: out.task_finished,
                round_started: out.round_started,
                game_over: out.game_over,
                winning_team: out.winning_team,
            },
            Err(err) => Response {
                valid: false,
                reason: Some(err.tag().to_string()),
                note: err.to_string(),
                ..Response::default()
            },
        }
    }
}
