//! Terminal output helpers shared by the subcommands.

use std::io::Write;

use brandi_engine::cards::{Card, Suit};

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Face and suit symbol, e.g. `10♥`; jokers print as `Jo`.
pub fn card_label(card: &Card) -> String {
    let suit = match card.suit {
        Some(Suit::Clubs) => "♣",
        Some(Suit::Diamonds) => "♦",
        Some(Suit::Hearts) => "♥",
        Some(Suit::Spades) => "♠",
        None => "",
    };
    format!("{}{}", card.rank.label(), suit)
}
