#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Number Ladder engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative game engine, and the batch system. Adapters submit
//! [`Command`] values describing desired mutations, the engine executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! describing what happened. Rejected commands surface as [`GameError`]
//! values and never produce events.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "I WANT TO PLAY A GAME";

/// Lower bound applied when no range is configured.
pub const DEFAULT_RANGE_MIN: i64 = 0;
/// Exclusive upper bound applied when no range is configured.
pub const DEFAULT_RANGE_MAX: i64 = 1_000;
/// Number of board slots used when no board size is configured.
pub const DEFAULT_BOARD_SIZE: usize = 10;
/// Number of automated trials used when no run count is configured.
pub const DEFAULT_TOTAL_RUNS: usize = 10;

/// Half-open interval `[min, max)` bounding the integers that may be drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawNumberRange")]
pub struct NumberRange {
    min: i64,
    max: i64,
}

impl NumberRange {
    /// Creates a range, rejecting intervals that contain no integers.
    pub fn new(min: i64, max: i64) -> Result<Self, ConfigError> {
        let range = Self { min, max };
        range.ensure_non_empty()?;
        Ok(range)
    }

    /// Inclusive lower bound.
    #[must_use]
    pub const fn min(&self) -> i64 {
        self.min
    }

    /// Exclusive upper bound.
    #[must_use]
    pub const fn max(&self) -> i64 {
        self.max
    }

    /// Number of distinct integers contained in the range.
    #[must_use]
    pub fn width(&self) -> u64 {
        if self.max <= self.min {
            return 0;
        }
        self.max.abs_diff(self.min)
    }

    /// Reports whether the value lies inside the range.
    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        (self.min..self.max).contains(&value)
    }

    fn ensure_non_empty(&self) -> Result<(), ConfigError> {
        if self.max <= self.min {
            return Err(ConfigError::EmptyRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct RawNumberRange {
    min: i64,
    max: i64,
}

impl TryFrom<RawNumberRange> for NumberRange {
    type Error = ConfigError;

    fn try_from(raw: RawNumberRange) -> Result<Self, Self::Error> {
        Self::new(raw.min, raw.max)
    }
}

impl Default for NumberRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_RANGE_MIN,
            max: DEFAULT_RANGE_MAX,
        }
    }
}

impl fmt::Display for NumberRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.min, self.max)
    }
}

/// Fixed parameters of a game session, supplied once at construction.
///
/// Every constructor, deserialisation included, enforces the invariants, so
/// a `GameConfig` value is always playable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGameConfig")]
pub struct GameConfig {
    range: NumberRange,
    board_size: usize,
}

impl GameConfig {
    /// Creates a validated configuration.
    ///
    /// The range must hold at least `board_size` distinct integers so every
    /// slot can receive a unique value.
    pub fn new(range: NumberRange, board_size: usize) -> Result<Self, ConfigError> {
        let config = Self { range, board_size };
        config.validate()?;
        Ok(config)
    }

    /// Checks that the range is non-empty, the board has slots, and the range
    /// can fill every slot with a distinct value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.range.ensure_non_empty()?;

        if self.board_size == 0 {
            return Err(ConfigError::EmptyBoard);
        }

        let width = self.range.width();
        if width < self.board_size as u64 {
            return Err(ConfigError::RangeTooNarrow {
                width,
                board_size: self.board_size,
            });
        }

        Ok(())
    }

    /// Range that bounds the drawable integers.
    #[must_use]
    pub const fn range(&self) -> NumberRange {
        self.range
    }

    /// Number of slots on the board.
    #[must_use]
    pub const fn board_size(&self) -> usize {
        self.board_size
    }
}

#[derive(Deserialize)]
struct RawGameConfig {
    range: NumberRange,
    board_size: usize,
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = ConfigError;

    fn try_from(raw: RawGameConfig) -> Result<Self, Self::Error> {
        Self::new(raw.range, raw.board_size)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            range: NumberRange::default(),
            board_size: DEFAULT_BOARD_SIZE,
        }
    }
}

/// Order in which the batch system chooses placement indices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Places every draw at the next index, left to right.
    #[default]
    Sequential,
    /// Places draws at randomly chosen indices.
    Randomized,
}

/// How the randomized strategy picks the index for each draw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RandomizedPlacement {
    /// Consumes a fresh permutation of all indices, so slots are never reused.
    #[default]
    Permutation,
    /// Draws each index uniformly without consulting occupancy. Selecting an
    /// occupied slot aborts the trial.
    Independent,
}

/// Tuning for unattended batch play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Number of trials executed per batch.
    pub runs: usize,
    /// Index selection strategy.
    pub strategy: Strategy,
    /// Index policy used when `strategy` is [`Strategy::Randomized`].
    pub placement: RandomizedPlacement,
}

impl BatchConfig {
    /// Ensures the batch executes at least one trial.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.runs == 0 {
            return Err(ConfigError::NoRuns);
        }
        Ok(())
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            runs: DEFAULT_TOTAL_RUNS,
            strategy: Strategy::default(),
            placement: RandomizedPlacement::default(),
        }
    }
}

/// Terminal result of a game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Every slot was filled while preserving strict ordering.
    Win,
    /// A placement broke the strict ordering before the board filled.
    Loss,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Win => write!(f, "win"),
            Self::Loss => write!(f, "loss"),
        }
    }
}

/// Result of a successful placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Placement {
    /// The game continues; another number may be drawn.
    Continue,
    /// The placement ended the session with the provided outcome.
    GameOver(Outcome),
}

impl Placement {
    /// Terminal outcome carried by the placement, if any.
    #[must_use]
    pub const fn outcome(self) -> Option<Outcome> {
        match self {
            Self::Continue => None,
            Self::GameOver(outcome) => Some(outcome),
        }
    }
}

/// Lifecycle state of a game engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineState {
    /// Freshly reset or between placements; a number may be drawn.
    Idle,
    /// A drawn number is waiting to be placed.
    AwaitingPlacement,
    /// The board was filled in order. Terminal until reset.
    Won,
    /// Ordering was broken. Terminal until reset.
    Lost,
}

impl EngineState {
    /// Reports whether the state only permits a reset.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    /// Outcome associated with a terminal state.
    #[must_use]
    pub const fn outcome(self) -> Option<Outcome> {
        match self {
            Self::Won => Some(Outcome::Win),
            Self::Lost => Some(Outcome::Loss),
            Self::Idle | Self::AwaitingPlacement => None,
        }
    }
}

impl From<Outcome> for EngineState {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Win => Self::Won,
            Outcome::Loss => Self::Lost,
        }
    }
}

/// Commands that express all permissible engine mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Clears the board and resamples the supply.
    ResetGame,
    /// Draws the next number from the supply.
    DrawNumber,
    /// Places the pending number into the slot at `index`.
    Place {
        /// Zero-based slot index.
        index: usize,
    },
}

/// Events broadcast by the engine after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// The board was cleared and a new supply sampled.
    GameReset,
    /// A number left the supply and is now pending.
    NumberDrawn {
        /// Value that was drawn.
        value: i64,
    },
    /// The pending number was written into a slot.
    NumberPlaced {
        /// Slot that received the value.
        index: usize,
        /// Value written into the slot.
        value: i64,
    },
    /// The session reached a terminal state.
    GameEnded {
        /// Terminal outcome of the session.
        outcome: Outcome,
    },
}

/// Operation invoked while the state machine forbids it.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateError {
    /// A draw was requested while an earlier number is still pending.
    #[error("must place current number before drawing another")]
    PendingNumberOutstanding,
    /// A placement was requested with nothing pending.
    #[error("no number has been drawn to place")]
    NoPendingNumber,
    /// The supply ran dry before the board filled.
    #[error("no numbers remain in the supply")]
    SupplyExhausted,
    /// The session already ended and must be reset.
    #[error("game is over ({0}); reset to play again")]
    GameFinished(Outcome),
}

/// Placement that targeted an unusable slot.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The index lies outside `[0, board_size)`.
    #[error("index {index} is outside the board (size {board_size})")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Number of slots on the board.
        board_size: usize,
    },
    /// The slot already holds a value.
    #[error("slot {index} is already occupied by {value}")]
    Occupied {
        /// Requested index.
        index: usize,
        /// Value currently stored in the slot.
        value: i64,
    },
}

/// Failures reported by engine operations.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash)]
pub enum GameError {
    /// The state machine forbids the operation. Always a caller bug.
    #[error(transparent)]
    InvalidState(#[from] StateError),
    /// The placement target is unusable. Callers may retry with another index.
    #[error(transparent)]
    InvalidPlacement(#[from] PlacementError),
}

/// Invalid engine or batch configuration.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash)]
pub enum ConfigError {
    /// The number range holds no integers.
    #[error("number range [{min}, {max}) is empty")]
    EmptyRange {
        /// Inclusive lower bound.
        min: i64,
        /// Exclusive upper bound.
        max: i64,
    },
    /// The board has no slots.
    #[error("board size must be positive")]
    EmptyBoard,
    /// The range cannot supply a distinct value for every slot.
    #[error("number range holds {width} values but the board needs {board_size}")]
    RangeTooNarrow {
        /// Distinct integers in the range.
        width: u64,
        /// Requested slot count.
        board_size: usize,
    },
    /// The batch would execute no trials.
    #[error("batch must execute at least one run")]
    NoRuns,
}

/// Aggregate statistics for a batch of trials.
///
/// Counts are derived from an outcome log; `aborted` covers trials that ended
/// on a precondition failure and therefore recorded no outcome.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BatchSummary {
    runs: usize,
    wins: usize,
    losses: usize,
}

impl BatchSummary {
    /// Tallies the outcomes recorded for `runs` attempted trials.
    #[must_use]
    pub fn tally(runs: usize, outcomes: &[Outcome]) -> Self {
        let wins = outcomes.iter().filter(|o| **o == Outcome::Win).count();
        let losses = outcomes.len() - wins;
        Self {
            runs: runs.max(outcomes.len()),
            wins,
            losses,
        }
    }

    /// Number of trials attempted.
    #[must_use]
    pub const fn runs(&self) -> usize {
        self.runs
    }

    /// Trials that ended in a win.
    #[must_use]
    pub const fn wins(&self) -> usize {
        self.wins
    }

    /// Trials that ended in a loss.
    #[must_use]
    pub const fn losses(&self) -> usize {
        self.losses
    }

    /// Trials that were abandoned without an outcome.
    #[must_use]
    pub const fn aborted(&self) -> usize {
        self.runs.saturating_sub(self.wins + self.losses)
    }

    /// Fraction of attempted trials that were won, in `[0.0, 1.0]`.
    #[must_use]
    pub fn win_percentage(&self) -> f64 {
        ratio(self.wins, self.runs)
    }

    /// Fraction of attempted trials that were lost, in `[0.0, 1.0]`.
    #[must_use]
    pub fn loss_percentage(&self) -> f64 {
        ratio(self.losses, self.runs)
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} runs: {} wins, {} losses, {} aborted ({:.1}% won)",
            self.runs,
            self.wins,
            self.losses,
            self.aborted(),
            self.win_percentage() * 100.0
        )
    }
}

fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64
}
