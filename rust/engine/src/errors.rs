use thiserror::Error;

use crate::cards::{CardId, MoveAction};
use crate::game::{GameState, RoundState};
use crate::marble::MarbleId;
use crate::player::PlayerId;

/// Rejections of a game event. None of these leave the game modified.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("{operation} is not allowed now (game {game_state:?}, round {round_state:?})")]
    WrongPhase {
        operation: &'static str,
        game_state: GameState,
        round_state: RoundState,
    },
    #[error("It is not player {player}'s turn (expected player {active})")]
    NotYourTurn { player: PlayerId, active: PlayerId },
    #[error("Card {card} is not in the hand")]
    CardNotHeld { card: CardId },
    #[error("Card {card} does not offer action {action}")]
    ActionNotOnCard { card: CardId, action: MoveAction },
    #[error("Player {player} has already swapped a card this round")]
    AlreadySwapped { player: PlayerId },
    #[error(transparent)]
    IllegalMove(#[from] IllegalMove),
    #[error("Invalid state: {0}")]
    InvalidState(String),
    #[error("Player {0} is not part of this game")]
    UnknownPlayer(PlayerId),
    #[error("Deck exhausted")]
    DeckExhausted,
    #[error("Position {position} is not on the board")]
    OutOfRange { position: i32 },
}

/// Rule violations of an otherwise well-formed move.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum IllegalMove {
    #[error("Blocked by a marble at position {position}")]
    Blocked { position: i32 },
    #[error("Marble {marble} is still at base")]
    StillAtBase { marble: MarbleId },
    #[error("Marble {marble} is not at base")]
    NotAtBase { marble: MarbleId },
    #[error("Cannot switch two of your own marbles")]
    SelfSwitch,
    #[error("The seven cannot be fully played ({requested} steps requested, {available} available)")]
    InfeasibleSeven { requested: u8, available: u8 },
    #[error("Marble {marble} cannot be targeted")]
    TargetNotFound { marble: MarbleId },
    #[error("Marble {marble} would run past the end of its home lane")]
    LaneOverrun { marble: MarbleId },
    #[error("Marble {marble} cannot leave its home lane backwards")]
    LaneLocked { marble: MarbleId },
    #[error("{remaining} steps of the seven must be played first")]
    SevenInProgress { remaining: u8 },
}

impl GameError {
    /// Taxonomy tag reported to clients as the rejection reason.
    pub fn tag(&self) -> &'static str {
        match self {
            GameError::WrongPhase { .. } => "WrongPhase",
            GameError::NotYourTurn { .. } => "NotYourTurn",
            GameError::CardNotHeld { .. } => "CardNotHeld",
            GameError::ActionNotOnCard { .. } => "ActionNotOnCard",
            GameError::AlreadySwapped { .. } => "AlreadySwapped",
            GameError::IllegalMove(m) => m.tag(),
            GameError::InvalidState(_) => "InvalidState",
            GameError::UnknownPlayer(_) => "UnknownPlayer",
            GameError::DeckExhausted => "DeckExhausted",
            GameError::OutOfRange { .. } => "OutOfRange",
        }
    }
}

impl IllegalMove {
    pub fn tag(&self) -> &'static str {
        match self {
            IllegalMove::Blocked { .. } => "Blocked",
            IllegalMove::StillAtBase { .. } => "StillAtBase",
            IllegalMove::NotAtBase { .. } => "NotAtBase",
            IllegalMove::SelfSwitch => "SelfSwitch",
            IllegalMove::InfeasibleSeven { .. } => "InfeasibleSeven",
            IllegalMove::TargetNotFound { .. } => "TargetNotFound",
            IllegalMove::LaneOverrun { .. } => "LaneOverrun",
            IllegalMove::LaneLocked { .. } => "LaneLocked",
            IllegalMove::SevenInProgress { .. } => "SevenInProgress",
        }
    }
}
