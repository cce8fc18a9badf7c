//! `sim`: plays whole games with bots and optionally records them as JSONL.
//!
//! `BRANDI_SIM_BREAK_AFTER=N` stops after N games as if interrupted.

use crate::config::{self, Config};
use crate::error::CliError;
use crate::ui;
use brandi_ai::{create_bot, table, Bot};
use brandi_engine::logger::GameLogger;
use std::io::Write;

/// Command-line overrides for the configured simulation.
#[derive(Debug, Clone, Default)]
pub struct SimArgs {
    pub games: Option<u32>,
    pub seed: Option<u64>,
    pub bot: Option<String>,
    pub max_events: Option<usize>,
    pub output: Option<String>,
}

fn resolve(args: &SimArgs) -> Result<Config, CliError> {
    let mut cfg = config::load()?;
    if let Some(games) = args.games {
        cfg.games = games;
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    if let Some(bot) = &args.bot {
        cfg.bot = bot.clone();
    }
    if let Some(max) = args.max_events {
        cfg.max_events = max;
    }
    config::validate(&cfg).map_err(|e| CliError::InvalidInput(e.to_string()))?;
    Ok(cfg)
}

fn seat_bots(kind: &str, seed: u64) -> Result<Vec<Box<dyn Bot>>, CliError> {
    (0..4u64)
        .map(|seat| {
            create_bot(kind, seed.wrapping_add(seat))
                .ok_or_else(|| CliError::InvalidInput(format!("unknown bot '{}'", kind)))
        })
        .collect()
}

pub fn handle_sim_command(
    args: SimArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = match resolve(&args) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::write_error(err, &e.to_string())?;
            return Err(e);
        }
    };
    let base_seed = cfg.seed.unwrap_or_else(rand::random);
    let break_after = std::env::var("BRANDI_SIM_BREAK_AFTER")
        .ok()
        .and_then(|v| v.parse::<u32>().ok());

    let mut logger = match &args.output {
        Some(path) => Some(GameLogger::create(path)?),
        None => None,
    };

    let mut wins = [0u32; 2];
    let mut unfinished = 0u32;
    for i in 0..cfg.games {
        if break_after == Some(i) {
            writeln!(out, "Interrupted: {} games", i)?;
            return Err(CliError::Interrupted(format!("stopped after {} games", i)));
        }
        let seed = base_seed.wrapping_add(u64::from(i));
        let mut bots = seat_bots(&cfg.bot, seed)?;
        let mut played = table::play(Some(seed), &mut bots, cfg.max_events)?;
        match played.record.winning_team {
            Some(team) => wins[team % 2] += 1,
            None => unfinished += 1,
        }
        tracing::info!(
            game = i,
            seed,
            events = played.record.events.len(),
            rounds = played.record.rounds,
            winner = ?played.record.winning_team,
            "game simulated"
        );
        if let Some(logger) = logger.as_mut() {
            played.record.game_id = logger.next_id();
            played.record.meta = Some(serde_json::json!({ "bot": cfg.bot }));
            logger.write(&played.record)?;
        }
    }

    if unfinished > 0 {
        ui::display_warning(
            err,
            &format!("{} game(s) hit the {} event cap", unfinished, cfg.max_events),
        )?;
    }
    writeln!(out, "Simulated: {} games", cfg.games)?;
    writeln!(out, "Team 0 wins: {}", wins[0])?;
    writeln!(out, "Team 1 wins: {}", wins[1])?;
    Ok(())
}
