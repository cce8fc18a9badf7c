//! Command-line argument definitions.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "brandi", version, about = "Brandi Dog rules engine tools")]
pub struct BrandiCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deal the first round of a seeded game and show every seat's hand
    Deal {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play whole games with bots in every seat
    Sim {
        /// Number of games (overrides configuration)
        #[arg(long)]
        games: Option<u32>,
        /// Base seed; game i uses seed + i
        #[arg(long)]
        seed: Option<u64>,
        /// Bot kind: baseline or random
        #[arg(long)]
        bot: Option<String>,
        /// Event cap per game
        #[arg(long)]
        max_events: Option<usize>,
        /// Write one JSONL game record per game
        #[arg(long)]
        output: Option<String>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

/// Names of all subcommands, for the usage summary.
pub const COMMANDS: &[&str] = &["deal", "sim", "cfg"];
