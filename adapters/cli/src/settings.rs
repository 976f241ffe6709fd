use std::{fs, path::Path};

use anyhow::{Context, Result};
use number_ladder_core::{
    BatchConfig, GameConfig, NumberRange, RandomizedPlacement, Strategy, DEFAULT_BOARD_SIZE,
    DEFAULT_RANGE_MAX, DEFAULT_RANGE_MIN,
};
use serde::Deserialize;

/// Settings read from an optional TOML file.
///
/// ```toml
/// [game]
/// min = 0
/// max = 1000
/// board_size = 10
///
/// [batch]
/// runs = 500
/// strategy = "randomized"
/// placement = "independent"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct FileSettings {
    game: GameSection,
    batch: BatchConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct GameSection {
    min: i64,
    max: i64,
    board_size: usize,
}

impl Default for GameSection {
    fn default() -> Self {
        Self {
            min: DEFAULT_RANGE_MIN,
            max: DEFAULT_RANGE_MAX,
            board_size: DEFAULT_BOARD_SIZE,
        }
    }
}

/// Values supplied on the command line; they take precedence over the file.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Overrides {
    pub(crate) min: Option<i64>,
    pub(crate) max: Option<i64>,
    pub(crate) board_size: Option<usize>,
    pub(crate) runs: Option<usize>,
    pub(crate) strategy: Option<Strategy>,
    pub(crate) placement: Option<RandomizedPlacement>,
}

impl FileSettings {
    /// Loads settings from `path`, or returns the defaults when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to load config file {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse config toml contents")
    }

    /// Resolves the validated game configuration.
    pub(crate) fn game_config(&self, overrides: &Overrides) -> Result<GameConfig> {
        let min = overrides.min.unwrap_or(self.game.min);
        let max = overrides.max.unwrap_or(self.game.max);
        let board_size = overrides.board_size.unwrap_or(self.game.board_size);

        let range = NumberRange::new(min, max).context("invalid number range")?;
        GameConfig::new(range, board_size).context("invalid game configuration")
    }

    /// Resolves the validated batch configuration.
    pub(crate) fn batch_config(&self, overrides: &Overrides) -> Result<BatchConfig> {
        let config = BatchConfig {
            runs: overrides.runs.unwrap_or(self.batch.runs),
            strategy: overrides.strategy.unwrap_or(self.batch.strategy),
            placement: overrides.placement.unwrap_or(self.batch.placement),
        };
        config.validate().context("invalid batch configuration")?;
        Ok(config)
    }
}
