//! `deal`: starts a seeded game and shows the first-round hands of all four seats.

use crate::error::CliError;
use crate::ui;
use brandi_ai::table;
use std::io::Write;

pub fn handle_deal_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let seed = seed.unwrap_or_else(rand::random);
    let game = table::seat_game(Some(seed))?;
    writeln!(out, "Seed: {}", seed)?;
    for (seat, player) in game.players().iter().enumerate() {
        let cards: Vec<String> = player.hand().cards().iter().map(ui::card_label).collect();
        writeln!(out, "Seat {} ({}): {}", seat, player.id(), cards.join(" "))?;
    }
    writeln!(out, "Deck: {} cards left", game.deck_remaining())?;
    Ok(())
}
