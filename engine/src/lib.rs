#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state management for Number Ladder.
//!
//! A [`GameEngine`] owns the board, the pending number, and the shuffled
//! supply for a single session. Values are drawn from the back of the supply
//! (last-sampled first); because the supply order is itself random this does
//! not bias outcomes.

mod supply;

use number_ladder_core::{
    Command, EngineState, Event, GameConfig, GameError, Outcome, Placement, PlacementError,
    StateError,
};
use tracing::debug;

pub use supply::{RandomSupply, ScriptedSupply, SupplySource};

/// Represents the authoritative state of one Number Ladder session.
#[derive(Debug)]
pub struct GameEngine<S = RandomSupply> {
    config: GameConfig,
    board: Vec<Option<i64>>,
    pending: Option<i64>,
    supply: Vec<i64>,
    state: EngineState,
    source: S,
}

impl GameEngine<RandomSupply> {
    /// Creates an engine whose supply is seeded from operating-system entropy.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_source(config, RandomSupply::from_entropy())
    }

    /// Creates an engine with a deterministic supply.
    #[must_use]
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_source(config, RandomSupply::seeded(seed))
    }
}

impl<S: SupplySource> GameEngine<S> {
    /// Creates an engine drawing its supplies from `source` and performs the
    /// initial reset.
    #[must_use]
    pub fn with_source(config: GameConfig, source: S) -> Self {
        let mut engine = Self {
            config,
            board: Vec::new(),
            pending: None,
            supply: Vec::new(),
            state: EngineState::Idle,
            source,
        };
        engine.reset_game();
        engine
    }

    /// Clears the board and samples a fresh supply.
    ///
    /// Any pending number is discarded and terminal states are left.
    pub fn reset_game(&mut self) {
        let board_size = self.config.board_size();
        self.board.clear();
        self.board.resize(board_size, None);
        self.pending = None;
        self.supply = self.source.sample(self.config.range(), board_size);
        self.state = EngineState::Idle;
        debug!(board_size, range = %self.config.range(), "game reset");
    }

    /// Draws the next number from the supply and holds it as pending.
    pub fn draw_number(&mut self) -> Result<i64, GameError> {
        self.ensure_in_progress()?;

        if self.pending.is_some() {
            return Err(StateError::PendingNumberOutstanding.into());
        }

        let value = self.supply.pop().ok_or(StateError::SupplyExhausted)?;
        self.pending = Some(value);
        self.state = EngineState::AwaitingPlacement;
        debug!(value, remaining = self.supply.len(), "number drawn");
        Ok(value)
    }

    /// Writes the pending number into the slot at `index`.
    ///
    /// Preconditions are checked before anything is written; a rejected call
    /// leaves the board and the pending number untouched. A successful
    /// placement that breaks the ordering ends the game in a loss, otherwise
    /// filling the final slot ends it in a win.
    pub fn place(&mut self, index: usize) -> Result<Placement, GameError> {
        self.ensure_in_progress()?;

        let value = self.pending.ok_or(StateError::NoPendingNumber)?;
        let slot = self
            .board
            .get(index)
            .copied()
            .ok_or(PlacementError::OutOfRange {
                index,
                board_size: self.board.len(),
            })?;
        if let Some(occupant) = slot {
            return Err(PlacementError::Occupied {
                index,
                value: occupant,
            }
            .into());
        }

        self.board[index] = Some(value);
        self.pending = None;

        let placement = if !self.ordered_around(index) {
            Placement::GameOver(Outcome::Loss)
        } else if self.board.iter().all(Option::is_some) {
            Placement::GameOver(Outcome::Win)
        } else {
            Placement::Continue
        };

        self.state = match placement {
            Placement::Continue => EngineState::Idle,
            Placement::GameOver(outcome) => EngineState::from(outcome),
        };
        debug!(index, value, ?placement, "number placed");
        Ok(placement)
    }

    /// Read-only view of the slots, `None` marking empty ones.
    #[must_use]
    pub fn board(&self) -> &[Option<i64>] {
        &self.board
    }

    /// Read-only view of the undrawn supply; the last value is drawn next.
    #[must_use]
    pub fn peek_supply(&self) -> &[i64] {
        &self.supply
    }

    /// Number waiting to be placed, if any.
    #[must_use]
    pub const fn pending_number(&self) -> Option<i64> {
        self.pending
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> EngineState {
        self.state
    }

    /// Configuration fixed at construction.
    #[must_use]
    pub const fn config(&self) -> GameConfig {
        self.config
    }

    fn ensure_in_progress(&self) -> Result<(), StateError> {
        match self.state.outcome() {
            Some(outcome) => Err(StateError::GameFinished(outcome)),
            None => Ok(()),
        }
    }

    // The rest of the board was ordered before this placement, so only the
    // nearest filled neighbours on each side need checking.
    fn ordered_around(&self, index: usize) -> bool {
        let Some(value) = self.board[index] else {
            return true;
        };
        let left = self.board[..index].iter().rev().find_map(|slot| *slot);
        let right = self.board[index + 1..].iter().find_map(|slot| *slot);

        left.map_or(true, |left| left < value) && right.map_or(true, |right| value < right)
    }
}

/// Applies the provided command to the engine, broadcasting the resulting
/// events.
///
/// Rejected commands return the error and push nothing into `out_events`.
pub fn apply<S: SupplySource>(
    engine: &mut GameEngine<S>,
    command: Command,
    out_events: &mut Vec<Event>,
) -> Result<(), GameError> {
    match command {
        Command::ResetGame => {
            engine.reset_game();
            out_events.push(Event::GameReset);
        }
        Command::DrawNumber => {
            let value = engine.draw_number()?;
            out_events.push(Event::NumberDrawn { value });
        }
        Command::Place { index } => {
            let pending = engine.pending_number();
            let placement = engine.place(index)?;
            if let Some(value) = pending {
                out_events.push(Event::NumberPlaced { index, value });
            }
            if let Some(outcome) = placement.outcome() {
                out_events.push(Event::GameEnded { outcome });
            }
        }
    }
    Ok(())
}

/// Query functions that provide read-only access to the engine state.
pub mod query {
    use number_ladder_core::{EngineState, GameConfig};

    use super::{GameEngine, SupplySource};

    /// Slots of the board, `None` marking empty ones.
    #[must_use]
    pub fn board<S: SupplySource>(engine: &GameEngine<S>) -> &[Option<i64>] {
        engine.board()
    }

    /// Number waiting to be placed, if any.
    #[must_use]
    pub fn pending_number<S: SupplySource>(engine: &GameEngine<S>) -> Option<i64> {
        engine.pending_number()
    }

    /// Current lifecycle state of the engine.
    #[must_use]
    pub fn state<S: SupplySource>(engine: &GameEngine<S>) -> EngineState {
        engine.state()
    }

    /// Values that have not been drawn yet; the last one is drawn next.
    #[must_use]
    pub fn supply<S: SupplySource>(engine: &GameEngine<S>) -> &[i64] {
        engine.peek_supply()
    }

    /// Configuration the engine was created with.
    #[must_use]
    pub fn config<S: SupplySource>(engine: &GameEngine<S>) -> GameConfig {
        engine.config()
    }

    /// Indices of slots that are still empty, in ascending order.
    #[must_use]
    pub fn empty_slots<S: SupplySource>(engine: &GameEngine<S>) -> Vec<usize> {
        engine
            .board()
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.is_none().then_some(index))
            .collect()
    }

    /// Number of slots that hold a value.
    #[must_use]
    pub fn filled_slots<S: SupplySource>(engine: &GameEngine<S>) -> usize {
        engine.board().iter().filter(|slot| slot.is_some()).count()
    }
}
