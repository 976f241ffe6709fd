#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Batch automation system that plays Number Ladder sessions unattended.
//!
//! A [`BatchRunner`] repeatedly resets a [`GameEngine`], drives it to a
//! terminal outcome with a fixed index-selection strategy, and aggregates the
//! outcomes into a [`BatchSummary`]. Trials whose placements are rejected by
//! the engine are logged and skipped; they never stop the batch.

use std::fmt;

use number_ladder_core::{
    BatchConfig, BatchSummary, ConfigError, GameError, Outcome, Placement, RandomizedPlacement,
    Strategy,
};
use number_ladder_engine::{GameEngine, SupplySource};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

/// Plays batches of trials and keeps an append-only log of their outcomes.
pub struct BatchRunner<R = ChaCha8Rng> {
    total_runs: usize,
    placement: RandomizedPlacement,
    outcomes: Vec<Outcome>,
    attempted: usize,
    rng: R,
}

impl BatchRunner<ChaCha8Rng> {
    /// Creates a runner whose index choices are seeded from operating-system
    /// entropy.
    pub fn new(total_runs: usize) -> Result<Self, ConfigError> {
        Self::with_rng(total_runs, ChaCha8Rng::from_entropy())
    }

    /// Creates a runner with deterministic index choices.
    pub fn seeded(total_runs: usize, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(total_runs, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> BatchRunner<R> {
    /// Creates a runner that draws index choices from `rng`.
    ///
    /// Fails with [`ConfigError::NoRuns`] when `total_runs` is zero.
    pub fn with_rng(total_runs: usize, rng: R) -> Result<Self, ConfigError> {
        if total_runs == 0 {
            return Err(ConfigError::NoRuns);
        }
        Ok(Self {
            total_runs,
            placement: RandomizedPlacement::default(),
            outcomes: Vec::new(),
            attempted: 0,
            rng,
        })
    }

    /// Selects how [`Self::run_randomized`] chooses indices.
    #[must_use]
    pub fn with_placement(mut self, placement: RandomizedPlacement) -> Self {
        self.placement = placement;
        self
    }

    /// Number of trials executed per batch.
    #[must_use]
    pub const fn total_runs(&self) -> usize {
        self.total_runs
    }

    /// Index policy used by randomized batches.
    #[must_use]
    pub const fn placement(&self) -> RandomizedPlacement {
        self.placement
    }

    /// Every outcome recorded over the runner's lifetime, oldest first.
    #[must_use]
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Statistics across every batch this runner has executed.
    #[must_use]
    pub fn lifetime_summary(&self) -> BatchSummary {
        BatchSummary::tally(self.attempted, &self.outcomes)
    }

    /// Runs a batch with the provided strategy.
    pub fn run<S: SupplySource>(
        &mut self,
        strategy: Strategy,
        engine: &mut GameEngine<S>,
    ) -> BatchSummary {
        match strategy {
            Strategy::Sequential => self.run_sequential(engine),
            Strategy::Randomized => self.run_randomized(engine),
        }
    }

    /// Plays every trial placing draws at indices `0, 1, 2, ...`.
    pub fn run_sequential<S: SupplySource>(&mut self, engine: &mut GameEngine<S>) -> BatchSummary {
        self.run_batch(engine, |_, _| IndexOrder::Sequential { next: 0 })
    }

    /// Plays every trial placing draws at randomly chosen indices.
    ///
    /// With [`RandomizedPlacement::Independent`] a chosen slot may already be
    /// occupied; such trials are aborted and reported in the summary.
    pub fn run_randomized<S: SupplySource>(&mut self, engine: &mut GameEngine<S>) -> BatchSummary {
        let placement = self.placement;
        self.run_batch(engine, move |rng, board_size| match placement {
            RandomizedPlacement::Permutation => {
                let mut indices: Vec<usize> = (0..board_size).collect();
                indices.shuffle(rng);
                IndexOrder::Shuffled(indices)
            }
            RandomizedPlacement::Independent => IndexOrder::Uniform { board_size },
        })
    }

    fn run_batch<S, F>(&mut self, engine: &mut GameEngine<S>, mut plan: F) -> BatchSummary
    where
        S: SupplySource,
        F: FnMut(&mut R, usize) -> IndexOrder,
    {
        let first = self.outcomes.len();
        let board_size = engine.config().board_size();

        for trial in 0..self.total_runs {
            self.attempted += 1;
            let mut order = plan(&mut self.rng, board_size);

            match play_trial(engine, &mut order, &mut self.rng) {
                Ok(outcome) => {
                    debug!(trial, %outcome, "trial finished");
                    self.outcomes.push(outcome);
                }
                Err(error) => {
                    warn!(trial, %error, board = ?engine.board(), "trial aborted");
                }
            }
        }

        let summary = BatchSummary::tally(self.total_runs, &self.outcomes[first..]);
        info!(%summary, "batch complete");
        summary
    }
}

impl<R> fmt::Debug for BatchRunner<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchRunner")
            .field("total_runs", &self.total_runs)
            .field("placement", &self.placement)
            .field("outcomes", &self.outcomes.len())
            .field("attempted", &self.attempted)
            .finish_non_exhaustive()
    }
}

/// Creates a runner configured from `config`, seeded when `seed` is provided.
pub fn runner_from_config(
    config: &BatchConfig,
    seed: Option<u64>,
) -> Result<BatchRunner, ConfigError> {
    let runner = match seed {
        Some(seed) => BatchRunner::seeded(config.runs, seed)?,
        None => BatchRunner::new(config.runs)?,
    };
    Ok(runner.with_placement(config.placement))
}

/// Source of placement indices for a single trial.
#[derive(Debug)]
enum IndexOrder {
    Sequential { next: usize },
    Shuffled(Vec<usize>),
    Uniform { board_size: usize },
}

impl IndexOrder {
    fn next_index<R: Rng>(&mut self, rng: &mut R) -> usize {
        match self {
            Self::Sequential { next } => {
                let index = *next;
                *next += 1;
                index
            }
            // An exhausted permutation yields an out-of-range index, which the
            // engine rejects.
            Self::Shuffled(indices) => indices.pop().unwrap_or(usize::MAX),
            Self::Uniform { board_size } => rng.gen_range(0..*board_size),
        }
    }
}

fn play_trial<S, R>(
    engine: &mut GameEngine<S>,
    order: &mut IndexOrder,
    rng: &mut R,
) -> Result<Outcome, GameError>
where
    S: SupplySource,
    R: Rng,
{
    engine.reset_game();

    loop {
        let _ = engine.draw_number()?;
        let index = order.next_index(rng);
        if let Placement::GameOver(outcome) = engine.place(index)? {
            return Ok(outcome);
        }
    }
}
