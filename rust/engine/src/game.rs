use serde::{Deserialize, Serialize};

use crate::board::{Board, Seat, PLAYER_COUNT};
use crate::cards::{Card, CardId, MoveAction};
use crate::deck::Deck;
use crate::errors::{GameError, IllegalMove};
use crate::marble::MarbleId;
use crate::player::{OpenSeven, Player, PlayerId};
use crate::rules::{self, Plan, SEVEN_STEPS};

/// Cards dealt per player at the start of each round, cycling.
pub const ROUND_CARDS: [usize; 5] = [6, 5, 4, 3, 2];

/// Lifecycle of a game.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum GameState {
    /// Waiting for players to join
    Waiting,
    /// All four seats are taken
    ReadyToStart,
    Running,
    Finished,
}

/// Lifecycle of a round within a running game.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum RoundState {
    NotStarted,
    Dealing,
    AwaitingSwap,
    /// Every seat has swapped, cards are being handed over
    SwapRevealed,
    Active,
    RoundOver,
}

/// Target of a switch move.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SwitchTarget {
    pub player: PlayerId,
    pub marble: MarbleId,
}

/// A request to play `card` for `action` on `marble`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub card: CardId,
    pub action: MoveAction,
    pub marble: MarbleId,
    /// Units of a split seven walked by this request, defaults to one
    #[serde(default)]
    pub steps: Option<u8>,
    /// Marble to switch places with
    #[serde(default)]
    pub target: Option<SwitchTarget>,
}

impl MoveRequest {
    pub fn new(card: CardId, action: MoveAction, marble: MarbleId) -> Self {
        Self {
            card,
            action,
            marble,
            steps: None,
            target: None,
        }
    }

    pub fn with_steps(mut self, steps: u8) -> Self {
        self.steps = Some(steps);
        self
    }

    pub fn with_target(mut self, player: PlayerId, marble: MarbleId) -> Self {
        self.target = Some(SwitchTarget { player, marble });
        self
    }
}

/// Result of turn advancement.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Advance {
    /// The turn passed to the next eligible seat
    Next,
    /// No seat could play; the given round was started
    RoundStarted { round: u32 },
    /// Team 0 (seats 0 and 2) or team 1 (seats 1 and 3) has won
    GameOver { team: usize },
}

/// Successful result of a game event.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub note: String,
    /// Set by swaps: whether the swap phase is complete
    #[serde(default)]
    pub task_finished: Option<bool>,
    /// Round number when this event started a new round
    #[serde(default)]
    pub round_started: Option<u32>,
    #[serde(default)]
    pub game_over: bool,
    #[serde(default)]
    pub winning_team: Option<usize>,
    /// Units of an open seven still to be walked
    #[serde(default)]
    pub seven_remaining: Option<u8>,
}

impl Outcome {
    fn note(note: impl Into<String>) -> Self {
        Self {
            note: note.into(),
            ..Self::default()
        }
    }
}

/// Seat playing in the same team as `seat`.
pub fn partner_index(seat: Seat) -> Seat {
    (seat + PLAYER_COUNT / 2) % PLAYER_COUNT
}

/// One game of Brandi Dog: board, deck, seated players and turn bookkeeping.
///
/// Every event validates completely before it mutates anything, so an `Err`
/// leaves the game exactly as it was.
///
/// # Examples
///
/// ```
/// use brandi_engine::game::{Game, GameState, RoundState};
///
/// let mut game = Game::new("ABCD", "AAAA".into(), Some(1));
/// for (id, name) in [("AAAA", "Thilo"), ("BBBB", "Lara"), ("CCCC", "Bibi"), ("DDDD", "Bene")] {
///     game.join(id.into(), name).unwrap();
/// }
/// game.start_game().unwrap();
/// assert_eq!(game.game_state(), GameState::Running);
/// assert_eq!(game.round_state(), RoundState::AwaitingSwap);
/// assert_eq!(game.player(&"AAAA".into()).unwrap().hand().len(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    game_id: String,
    game_name: Option<String>,
    host: PlayerId,
    game_state: GameState,
    round_state: RoundState,
    deck: Deck,
    board: Board,
    /// Join order until the game starts, seat order afterwards
    players: Vec<Player>,
    order: Vec<PlayerId>,
    active_player_index: Seat,
    round_turn: u32,
    card_swap_count: u32,
    discard: Vec<Card>,
    top_card: Option<Card>,
}

impl Game {
    pub fn new(game_id: impl Into<String>, host: PlayerId, seed: Option<u64>) -> Self {
        Self {
            game_id: game_id.into(),
            game_name: None,
            host,
            game_state: GameState::Waiting,
            round_state: RoundState::NotStarted,
            deck: Deck::new(seed),
            board: Board::new(PLAYER_COUNT),
            players: Vec::with_capacity(PLAYER_COUNT),
            order: Vec::with_capacity(PLAYER_COUNT),
            active_player_index: 0,
            round_turn: 0,
            card_swap_count: 0,
            discard: Vec::new(),
            top_card: None,
        }
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    pub fn game_name(&self) -> Option<&str> {
        self.game_name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.game_name = Some(name.into());
    }

    pub fn host(&self) -> &PlayerId {
        &self.host
    }

    pub fn set_host(&mut self, host: PlayerId) {
        self.host = host;
    }

    pub fn game_state(&self) -> GameState {
        self.game_state
    }

    pub fn round_state(&self) -> RoundState {
        self.round_state
    }

    pub fn round_turn(&self) -> u32 {
        self.round_turn
    }

    pub fn card_swap_count(&self) -> u32 {
        self.card_swap_count
    }

    pub fn order(&self) -> &[PlayerId] {
        &self.order
    }

    pub fn active_player_index(&self) -> Seat {
        self.active_player_index
    }

    /// Player whose turn it is while a round is being played.
    pub fn active_player(&self) -> Option<&PlayerId> {
        match (self.game_state, self.round_state) {
            (GameState::Running, RoundState::Active) => self.order.get(self.active_player_index),
            _ => None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: &PlayerId) -> Result<&Player, GameError> {
        self.players
            .iter()
            .find(|p| p.id() == id)
            .ok_or_else(|| GameError::UnknownPlayer(id.clone()))
    }

    pub fn seat_of(&self, id: &PlayerId) -> Result<Seat, GameError> {
        self.order
            .iter()
            .position(|p| p == id)
            .ok_or_else(|| GameError::UnknownPlayer(id.clone()))
    }

    pub fn top_card(&self) -> Option<&Card> {
        self.top_card.as_ref()
    }

    /// Seed of the deck, enough to replay the game's shuffles.
    pub fn seed(&self) -> u64 {
        self.deck.seed()
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    pub fn discarded(&self) -> &[Card] {
        &self.discard
    }

    /// Cards in hands, in transit between partners, in the deck and on the discard pile.
    pub fn cards_accounted(&self) -> usize {
        let held: usize = self
            .players
            .iter()
            .map(|p| p.hand.len() + usize::from(p.incoming.is_some()))
            .sum();
        held + self.deck.remaining() + self.discard.len()
    }

    pub fn join(&mut self, id: PlayerId, name: impl Into<String>) -> Result<Outcome, GameError> {
        if self.players.iter().any(|p| p.id() == &id) {
            return Err(GameError::InvalidState(format!(
                "Player {} has already joined the game.",
                id
            )));
        }
        if self.game_state != GameState::Waiting || self.players.len() >= PLAYER_COUNT {
            return Err(GameError::InvalidState(
                "The game is full or has already started.".to_string(),
            ));
        }
        let player = Player::new(id.clone(), name);
        let note = format!("Player {} joined the game.", player.name());
        self.players.push(player);
        self.order.push(id);
        if self.players.len() == PLAYER_COUNT {
            self.game_state = GameState::ReadyToStart;
        }
        tracing::debug!(game_id = %self.game_id, players = self.players.len(), "player joined");
        Ok(Outcome::note(note))
    }

    /// Reorders the seats before the game starts; seats 0/2 and 1/3 form the teams.
    pub fn change_teams(&mut self, order: Vec<PlayerId>) -> Result<Outcome, GameError> {
        if !matches!(self.game_state, GameState::Waiting | GameState::ReadyToStart) {
            return Err(GameError::InvalidState(
                "Game has already started, teams can no longer change.".to_string(),
            ));
        }
        if order.len() != self.players.len()
            || !self.players.iter().all(|p| order.contains(p.id()))
        {
            return Err(GameError::InvalidState(
                "The new order must list every player exactly once.".to_string(),
            ));
        }
        self.order = order;
        Ok(Outcome::note("Teams modified successfully."))
    }

    pub fn start_game(&mut self) -> Result<Outcome, GameError> {
        if !matches!(self.game_state, GameState::Waiting | GameState::ReadyToStart) {
            return Err(GameError::InvalidState("Game has already started.".to_string()));
        }
        if self.order.len() != PLAYER_COUNT {
            return Err(GameError::InvalidState("Not all players are present.".to_string()));
        }

        let mut players = std::mem::take(&mut self.players);
        players.sort_by_key(|p| self.order.iter().position(|id| id == p.id()));
        self.board = Board::new(PLAYER_COUNT);
        for (seat, player) in players.iter_mut().enumerate() {
            player.set_starting_position(&self.board, seat);
        }
        self.players = players;
        self.game_state = GameState::Running;
        tracing::info!(game_id = %self.game_id, order = ?self.order, "game started");

        let round = self.start_round()?;
        Ok(Outcome {
            note: "Game is started.".to_string(),
            ..round
        })
    }

    pub fn start_round(&mut self) -> Result<Outcome, GameError> {
        if self.game_state != GameState::Running
            || !matches!(
                self.round_state,
                RoundState::NotStarted | RoundState::RoundOver
            )
        {
            return Err(self.wrong_phase("start_round"));
        }
        self.round_state = RoundState::Dealing;

        for player in &mut self.players {
            player.hand.fold();
            player.incoming = None;
            player.has_folded = false;
            player.may_swap_cards = true;
            player.seven = None;
        }
        self.discard.clear();
        if self.deck.remaining() < self.deck.total() {
            self.deck.rebuild();
        }

        let count = ROUND_CARDS[self.round_turn as usize % ROUND_CARDS.len()];
        for seat in 0..self.players.len() {
            for _ in 0..count {
                let card = self.deck.deal_card()?;
                self.players[seat].hand.add(card)?;
            }
        }

        let opener = self.round_turn as usize % PLAYER_COUNT;
        self.active_player_index = (0..PLAYER_COUNT)
            .map(|offset| (opener + offset) % PLAYER_COUNT)
            .find(|&seat| self.is_eligible(seat))
            .unwrap_or(opener);
        self.round_state = RoundState::AwaitingSwap;
        self.round_turn += 1;
        tracing::info!(
            game_id = %self.game_id,
            round = self.round_turn,
            cards = count,
            "round started"
        );
        Ok(Outcome {
            round_started: Some(self.round_turn),
            ..Outcome::note(format!("Round #{} is started.", self.round_turn))
        })
    }

    /// Hands one card to the partner; the swap phase ends once all four seats have swapped.
    pub fn swap_card(&mut self, player: &PlayerId, card: CardId) -> Result<Outcome, GameError> {
        if self.round_state != RoundState::AwaitingSwap {
            return Err(self.wrong_phase("swap_card"));
        }
        let seat = self.seat_of(player)?;
        if !self.players[seat].may_swap_cards {
            return Err(GameError::AlreadySwapped {
                player: player.clone(),
            });
        }
        let card = self.players[seat].hand.take(card)?;
        self.players[partner_index(seat)].incoming = Some(card);
        self.players[seat].may_swap_cards = false;
        self.card_swap_count += 1;
        tracing::debug!(game_id = %self.game_id, seat, card = %card.uid, "card swapped");

        if self.card_swap_count % PLAYER_COUNT as u32 != 0 {
            return Ok(Outcome {
                task_finished: Some(false),
                ..Outcome::note("Card has been swapped.")
            });
        }

        self.round_state = RoundState::SwapRevealed;
        for p in &mut self.players {
            if let Some(received) = p.incoming.take() {
                p.hand.add(received)?;
            }
            p.may_swap_cards = true;
        }
        self.round_state = RoundState::Active;
        Ok(Outcome {
            task_finished: Some(true),
            ..Outcome::note("Cards have been swapped.")
        })
    }

    /// Discards the whole hand and sits out the rest of the round.
    pub fn fold(&mut self, player: &PlayerId) -> Result<Outcome, GameError> {
        let seat = self.acting_seat(player, "fold")?;
        if let Some(open) = self.players[seat].seven {
            return Err(IllegalMove::SevenInProgress {
                remaining: open.remaining,
            }
            .into());
        }
        let cards = self.players[seat].hand.fold();
        self.discard.extend(cards);
        self.players[seat].has_folded = true;
        tracing::debug!(game_id = %self.game_id, seat, "player folded");

        let advance = self.increment_active_player_index()?;
        Ok(self.advance_outcome(
            format!("Player {} has folded for this round.", player),
            advance,
        ))
    }

    /// Plays a card to move a marble.
    ///
    /// A split seven may span several calls; the card stays in the hand and
    /// the turn stays with the player until all seven units are walked.
    pub fn move_marble(
        &mut self,
        player: &PlayerId,
        request: &MoveRequest,
    ) -> Result<Outcome, GameError> {
        let seat = self.acting_seat(player, "move_marble")?;
        let (plan, seven_left) = self.plan_move(seat, request)?;
        rules::apply(&mut self.board, &mut self.players, &plan);

        let landed = plan
            .destination()
            .map(|n| self.board.position_of(n).to_string())
            .unwrap_or_else(|| "a switched place".to_string());
        let note = format!("Marble {} moved to {}.", request.marble, landed);
        tracing::debug!(
            game_id = %self.game_id,
            seat,
            card = %request.card,
            action = %request.action,
            marble = %request.marble,
            to = %landed,
            "marble moved"
        );

        // a chunk is only accepted while the rest of the seven stays walkable
        if let Some(remaining) = seven_left.filter(|&r| r > 0) {
            self.players[seat].seven = Some(OpenSeven {
                card: request.card,
                remaining,
            });
            return Ok(Outcome {
                seven_remaining: Some(remaining),
                ..Outcome::note(note)
            });
        }

        self.players[seat].seven = None;
        let card = self.players[seat].hand.take(request.card)?;
        self.discard.push(card);
        self.top_card = Some(card);
        let advance = self.increment_active_player_index()?;
        Ok(self.advance_outcome(note, advance))
    }

    /// Every request the player could make right now; seven steps are listed one unit at a time.
    pub fn legal_moves(&self, player: &PlayerId) -> Result<Vec<MoveRequest>, GameError> {
        let seat = self.seat_of(player)?;
        if self.acting_seat(player, "legal_moves").is_err() {
            return Ok(Vec::new());
        }
        let me = &self.players[seat];
        let mut moves = Vec::new();
        for card in me.hand.cards() {
            for action in card.actions() {
                for marble in me.marbles() {
                    let base = MoveRequest::new(card.uid, action, marble.id);
                    let mut candidates = Vec::new();
                    match action {
                        MoveAction::Switch => {
                            for other in self.players.iter().filter(|p| p.id() != player) {
                                for m in other.marbles() {
                                    candidates
                                        .push(base.clone().with_target(other.id().clone(), m.id));
                                }
                            }
                        }
                        MoveAction::Seven => candidates.push(base.with_steps(1)),
                        _ => candidates.push(base),
                    }
                    moves.extend(
                        candidates
                            .into_iter()
                            .filter(|req| self.plan_move(seat, req).is_ok()),
                    );
                }
            }
        }
        Ok(moves)
    }

    /// Whether the player holds any card that can currently be played.
    pub fn can_play(&self, player: &PlayerId) -> Result<bool, GameError> {
        Ok(!self.legal_moves(player)?.is_empty())
    }

    /// Team whose both members have brought all marbles home.
    pub fn winning_team(&self) -> Option<usize> {
        if self.players.len() != PLAYER_COUNT {
            return None;
        }
        (0..PLAYER_COUNT / 2).find(|&team| {
            self.players[team].has_finished(&self.board)
                && self.players[partner_index(team)].has_finished(&self.board)
        })
    }

    /// Checks for victory, then hands the turn to the next seat that can still play.
    ///
    /// When no seat is left the round is over and the next one is dealt.
    pub fn increment_active_player_index(&mut self) -> Result<Advance, GameError> {
        if let Some(team) = self.winning_team() {
            self.game_state = GameState::Finished;
            self.round_state = RoundState::RoundOver;
            tracing::info!(game_id = %self.game_id, team, "game finished");
            return Ok(Advance::GameOver { team });
        }

        let next = (1..=PLAYER_COUNT)
            .map(|offset| (self.active_player_index + offset) % PLAYER_COUNT)
            .find(|&seat| self.is_eligible(seat));
        if let Some(seat) = next {
            self.active_player_index = seat;
            return Ok(Advance::Next);
        }

        self.round_state = RoundState::RoundOver;
        self.start_round()?;
        Ok(Advance::RoundStarted {
            round: self.round_turn,
        })
    }

    fn is_eligible(&self, seat: Seat) -> bool {
        let p = &self.players[seat];
        !p.has_folded && !p.has_no_cards() && !p.has_finished(&self.board)
    }

    fn wrong_phase(&self, operation: &'static str) -> GameError {
        GameError::WrongPhase {
            operation,
            game_state: self.game_state,
            round_state: self.round_state,
        }
    }

    /// Seat of `player` if it may act in the current round.
    fn acting_seat(&self, player: &PlayerId, operation: &'static str) -> Result<Seat, GameError> {
        if self.game_state != GameState::Running || self.round_state != RoundState::Active {
            return Err(self.wrong_phase(operation));
        }
        let seat = self.seat_of(player)?;
        if seat != self.active_player_index {
            return Err(GameError::NotYourTurn {
                player: player.clone(),
                active: self.order[self.active_player_index].clone(),
            });
        }
        Ok(seat)
    }

    /// Validates a request against hand, card and board; returns the board change
    /// and, for sevens, the units left afterwards.
    fn plan_move(&self, seat: Seat, req: &MoveRequest) -> Result<(Plan, Option<u8>), GameError> {
        let me = &self.players[seat];
        let card = me
            .hand
            .get(req.card)
            .ok_or(GameError::CardNotHeld { card: req.card })?;
        if !card.offers(req.action) {
            return Err(GameError::ActionNotOnCard {
                card: req.card,
                action: req.action,
            });
        }
        if let Some(open) = me.seven {
            if req.action != MoveAction::Seven || req.card != open.card {
                return Err(IllegalMove::SevenInProgress {
                    remaining: open.remaining,
                }
                .into());
            }
        }
        let marble = me
            .marble(req.marble)
            .ok_or(IllegalMove::TargetNotFound { marble: req.marble })?;

        let plan = match req.action {
            MoveAction::Enter => rules::plan_enter(&self.board, &self.players, marble)?,
            MoveAction::Forward(n) => rules::plan_forward(&self.board, &self.players, marble, n)?,
            MoveAction::Backward => rules::plan_backward(&self.board, &self.players, marble)?,
            MoveAction::Switch => {
                let target = req
                    .target
                    .as_ref()
                    .ok_or(IllegalMove::TargetNotFound { marble: req.marble })?;
                let missing = IllegalMove::TargetNotFound {
                    marble: target.marble,
                };
                let other_seat = self.seat_of(&target.player).map_err(|_| missing)?;
                if other_seat == seat {
                    return Err(IllegalMove::SelfSwitch.into());
                }
                let other = self.players[other_seat]
                    .marble(target.marble)
                    .ok_or(missing)?;
                rules::plan_switch(&self.board, &self.players, marble, other)?
            }
            MoveAction::Seven => {
                let remaining = me.seven.map_or(SEVEN_STEPS, |s| s.remaining);
                let units = req.steps.unwrap_or(1);
                if units == 0 || units > remaining {
                    return Err(IllegalMove::InfeasibleSeven {
                        requested: units,
                        available: remaining,
                    }
                    .into());
                }
                if me.seven.is_none() {
                    if marble.is_at_base() {
                        return Err(IllegalMove::StillAtBase { marble: marble.id }.into());
                    }
                    let capacity = rules::seven_capacity(&self.board, &self.players, me.marbles());
                    let own = rules::runway(&self.board, &self.players, marble, SEVEN_STEPS);
                    if capacity < SEVEN_STEPS || own < units {
                        return Err(IllegalMove::InfeasibleSeven {
                            requested: units,
                            available: own.min(capacity),
                        }
                        .into());
                    }
                }
                let plan = rules::plan_seven_units(&self.board, &self.players, marble, units)?;
                let left = remaining - units;
                if left > 0 {
                    let mut board = self.board.clone();
                    let mut players = self.players.clone();
                    rules::apply(&mut board, &mut players, &plan);
                    if !rules::seven_walkable(&board, &players, seat, left) {
                        return Err(IllegalMove::InfeasibleSeven {
                            requested: units,
                            available: remaining,
                        }
                        .into());
                    }
                }
                return Ok((plan, Some(left)));
            }
        };
        Ok((plan, None))
    }

    fn advance_outcome(&self, note: String, advance: Advance) -> Outcome {
        match advance {
            Advance::Next => Outcome::note(note),
            Advance::RoundStarted { round } => Outcome {
                round_started: Some(round),
                ..Outcome::note(format!(
                    "{} Round #{} has started due to all players having no cards left.",
                    note, round
                ))
            },
            Advance::GameOver { team } => {
                let a = &self.order[team];
                let b = &self.order[partner_index(team)];
                Outcome {
                    game_over: true,
                    winning_team: Some(team),
                    ..Outcome::note(format!(
                        "{} Team {} of players {} and {} have won.",
                        note,
                        team + 1,
                        a,
                        b
                    ))
                }
            }
        }
    }
}
