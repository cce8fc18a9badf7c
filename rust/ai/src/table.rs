//! Plays games with one bot per seat.

use brandi_engine::board::Seat;
use brandi_engine::errors::GameError;
use brandi_engine::game::{Game, GameState, RoundState};
use brandi_engine::logger::{EventKind, EventRecord, GameRecord};
use brandi_engine::player::PlayerId;

use crate::{Bot, Decision};

/// Player ids of the four seats at a simulated table.
pub const SEAT_IDS: [&str; 4] = ["AAAA", "BBBB", "CCCC", "DDDD"];

#[derive(Debug, Clone)]
pub struct PlayedGame {
    pub record: GameRecord,
    pub finished: bool,
}

/// A started game with the four simulated seats.
pub fn seat_game(seed: Option<u64>) -> Result<Game, GameError> {
    let mut game = Game::new("SIM", PlayerId::from(SEAT_IDS[0]), seed);
    for id in SEAT_IDS {
        game.join(id.into(), id)?;
    }
    game.start_game()?;
    Ok(game)
}

/// Seat expected to submit the next event, if any.
pub fn acting_seat(game: &Game) -> Option<Seat> {
    if game.game_state() != GameState::Running {
        return None;
    }
    match game.round_state() {
        RoundState::AwaitingSwap => game.players().iter().position(|p| p.may_swap_cards()),
        RoundState::Active => Some(game.active_player_index()),
        _ => None,
    }
}

/// Asks the acting seat's bot for one event and submits it.
///
/// Returns `Ok(None)` once nobody has to act, i.e. the game is over.
pub fn step(game: &mut Game, bots: &mut [Box<dyn Bot>]) -> Result<Option<EventRecord>, GameError> {
    let Some(seat) = acting_seat(game) else {
        return Ok(None);
    };
    let player = game.order()[seat].clone();
    let round = game.round_turn();
    let bot = bots
        .get_mut(seat)
        .ok_or_else(|| GameError::InvalidState(format!("no bot for seat {}", seat)))?;
    let decision = bot.decide(game, &player).ok_or_else(|| {
        GameError::InvalidState(format!("{} had no event for {}", bot.name(), player))
    })?;

    let (event, outcome) = match decision {
        Decision::Swap(card) => (EventKind::Swap { card }, game.swap_card(&player, card)?),
        Decision::Fold => (EventKind::Fold, game.fold(&player)?),
        Decision::Move(req) => {
            let outcome = game.move_marble(&player, &req)?;
            (EventKind::Move(req), outcome)
        }
    };
    Ok(Some(EventRecord {
        round,
        player,
        event,
        note: outcome.note,
    }))
}

/// Steps until the game ends or `max_events` events were played.
pub fn play_out(
    game: &mut Game,
    bots: &mut [Box<dyn Bot>],
    max_events: usize,
) -> Result<PlayedGame, GameError> {
    let mut events = Vec::new();
    while events.len() < max_events {
        match step(game, bots)? {
            Some(ev) => events.push(ev),
            None => break,
        }
    }
    let finished = game.game_state() == GameState::Finished;
    Ok(PlayedGame {
        record: GameRecord {
            game_id: game.game_id().to_string(),
            seed: Some(game.seed()),
            order: game.order().to_vec(),
            events,
            rounds: game.round_turn(),
            winning_team: if finished { game.winning_team() } else { None },
            ts: None,
            meta: None,
        },
        finished,
    })
}

pub fn play(
    seed: Option<u64>,
    bots: &mut [Box<dyn Bot>],
    max_events: usize,
) -> Result<PlayedGame, GameError> {
    let mut game = seat_game(seed)?;
    play_out(&mut game, bots, max_events)
}
