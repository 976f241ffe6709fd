#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter for Number Ladder: interactive play and batch automation.

mod play;
mod render;
mod settings;

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use number_ladder_core::{GameConfig, RandomizedPlacement, Strategy};
use number_ladder_engine::{GameEngine, RandomSupply};
use number_ladder_system_batch::runner_from_config;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::settings::{FileSettings, Overrides};

const RUNNER_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

#[derive(Debug, Parser)]
#[command(name = "number-ladder", about = "Place random numbers in strictly increasing order")]
struct Cli {
    /// TOML file with [game] and [batch] settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Smallest number that may be drawn
    #[arg(long, global = true, allow_negative_numbers = true)]
    min: Option<i64>,

    /// Exclusive upper bound of the drawable numbers
    #[arg(long, global = true, allow_negative_numbers = true)]
    max: Option<i64>,

    /// Number of slots on the board
    #[arg(long, global = true)]
    board_size: Option<usize>,

    /// Seed for reproducible supplies and index choices
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Play a game interactively
    Play {
        /// Show the numbers that have not been drawn yet
        #[arg(long)]
        cheat: bool,
    },
    /// Play many games unattended and report win/loss statistics
    Automate {
        /// Number of games to play
        #[arg(long)]
        runs: Option<usize>,
        /// How placement indices are chosen
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,
        /// Index policy for the randomized strategy
        #[arg(long, value_enum)]
        placement: Option<PlacementArg>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    Sequential,
    Randomized,
}

impl From<StrategyArg> for Strategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Sequential => Self::Sequential,
            StrategyArg::Randomized => Self::Randomized,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PlacementArg {
    Permutation,
    Independent,
}

impl From<PlacementArg> for RandomizedPlacement {
    fn from(value: PlacementArg) -> Self {
        match value {
            PlacementArg::Permutation => Self::Permutation,
            PlacementArg::Independent => Self::Independent,
        }
    }
}

/// Entry point for the Number Ladder command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = FileSettings::load(cli.config.as_deref())?;
    let mut overrides = Overrides {
        min: cli.min,
        max: cli.max,
        board_size: cli.board_size,
        ..Overrides::default()
    };

    match cli.mode {
        Mode::Play { cheat } => {
            let config = settings.game_config(&overrides)?;
            let mut game = new_engine(config, cli.seed);
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut output = io::stdout().lock();
            if play::run(&mut game, &mut input, &mut output, cheat)?.is_none() {
                writeln!(output, "\ngoodbye")?;
            }
        }
        Mode::Automate {
            runs,
            strategy,
            placement,
        } => {
            overrides.runs = runs;
            overrides.strategy = strategy.map(Strategy::from);
            overrides.placement = placement.map(RandomizedPlacement::from);

            let config = settings.game_config(&overrides)?;
            let batch = settings.batch_config(&overrides)?;
            let mut game = new_engine(config, cli.seed);
            let mut runner =
                runner_from_config(&batch, cli.seed.map(|seed| seed ^ RUNNER_SEED_SALT))
                    .context("invalid batch configuration")?;
            info!(?config, ?batch, "starting automation");

            let summary = runner.run(batch.strategy, &mut game);
            println!("{summary}");
        }
    }

    Ok(())
}

fn new_engine(config: GameConfig, seed: Option<u64>) -> GameEngine<RandomSupply> {
    match seed {
        Some(seed) => GameEngine::seeded(config, seed),
        None => GameEngine::new(config),
    }
}
