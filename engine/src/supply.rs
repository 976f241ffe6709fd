use std::fmt;

use number_ladder_core::NumberRange;
use rand::{seq::index, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Produces the distinct values a game session draws from.
///
/// Implementations return exactly `count` distinct values from `range` in
/// storage order. The engine draws from the back of the returned sequence.
pub trait SupplySource {
    /// Samples `count` distinct values from `range` without replacement.
    fn sample(&mut self, range: NumberRange, count: usize) -> Vec<i64>;
}

/// Supply source backed by a random number generator.
pub struct RandomSupply<R = ChaCha8Rng> {
    rng: R,
}

impl RandomSupply<ChaCha8Rng> {
    /// Creates a deterministic supply seeded with the provided value.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Creates a supply seeded from operating-system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> RandomSupply<R> {
    /// Wraps an existing generator.
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R> fmt::Debug for RandomSupply<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomSupply").finish_non_exhaustive()
    }
}

impl<R: Rng> SupplySource for RandomSupply<R> {
    fn sample(&mut self, range: NumberRange, count: usize) -> Vec<i64> {
        let width = usize::try_from(range.width()).unwrap_or(usize::MAX);
        // `index::sample` shuffles its output, so the draw order is random too.
        index::sample(&mut self.rng, width, count)
            .into_iter()
            .map(|offset| range.min().wrapping_add(offset as i64))
            .collect()
    }
}

/// Supply source that replays predetermined supplies.
///
/// Each reset consumes the next script, wrapping around after the last one.
/// Scripts are stored in supply order, so the final element is drawn first.
/// A script longer than the board is cut down to the `count` values drawn
/// first.
#[derive(Clone, Debug)]
pub struct ScriptedSupply {
    scripts: Vec<Vec<i64>>,
    cursor: usize,
}

impl ScriptedSupply {
    /// Replays the provided supplies in order, one per reset.
    #[must_use]
    pub fn new(scripts: Vec<Vec<i64>>) -> Self {
        Self { scripts, cursor: 0 }
    }

    /// Replays a single supply on every reset.
    #[must_use]
    pub fn repeating(supply: Vec<i64>) -> Self {
        Self::new(vec![supply])
    }

    /// Replays a single supply whose values are drawn in the listed order.
    #[must_use]
    pub fn from_draws(mut draws: Vec<i64>) -> Self {
        draws.reverse();
        Self::repeating(draws)
    }
}

impl SupplySource for ScriptedSupply {
    fn sample(&mut self, _range: NumberRange, count: usize) -> Vec<i64> {
        let Some(script) = self.scripts.get(self.cursor) else {
            return Vec::new();
        };
        // Keep the values drawn first; a short script runs dry instead.
        let start = script.len().saturating_sub(count);
        let supply = script[start..].to_vec();
        self.cursor = (self.cursor + 1) % self.scripts.len();
        supply
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use number_ladder_core::NumberRange;

    use super::{RandomSupply, ScriptedSupply, SupplySource};

    #[test]
    fn random_supply_is_distinct_and_in_range() {
        let range = NumberRange::new(-5, 15).expect("valid range");
        let mut supply = RandomSupply::seeded(7);

        for _ in 0..32 {
            let values = supply.sample(range, 12);
            assert_eq!(values.len(), 12);
            let unique: HashSet<_> = values.iter().copied().collect();
            assert_eq!(unique.len(), 12, "values must be distinct: {values:?}");
            assert!(values.iter().all(|value| range.contains(*value)));
        }
    }

    #[test]
    fn random_supply_can_exhaust_exact_width() {
        let range = NumberRange::new(10, 14).expect("valid range");
        let mut values = RandomSupply::seeded(99).sample(range, 4);
        values.sort_unstable();
        assert_eq!(values, vec![10, 11, 12, 13]);
    }

    #[test]
    fn random_supply_handles_extreme_bounds() {
        let range = NumberRange::new(i64::MIN, i64::MAX).expect("valid range");
        let values = RandomSupply::seeded(3).sample(range, 8);
        assert_eq!(values.len(), 8);
        assert!(values.iter().all(|value| *value < i64::MAX));
    }

    #[test]
    fn seeded_supplies_repeat() {
        let range = NumberRange::new(0, 1_000).expect("valid range");
        let first = RandomSupply::seeded(42).sample(range, 10);
        let second = RandomSupply::seeded(42).sample(range, 10);
        assert_eq!(first, second);
    }

    #[test]
    fn scripted_supply_cycles_scripts() {
        let range = NumberRange::new(0, 10).expect("valid range");
        let mut supply = ScriptedSupply::new(vec![vec![1, 2], vec![3, 4]]);
        assert_eq!(supply.sample(range, 2), vec![1, 2]);
        assert_eq!(supply.sample(range, 2), vec![3, 4]);
        assert_eq!(supply.sample(range, 2), vec![1, 2]);
    }

    #[test]
    fn long_script_keeps_first_draws() {
        let range = NumberRange::new(0, 10).expect("valid range");
        let mut supply = ScriptedSupply::from_draws(vec![1, 3, 6, 9]);
        assert_eq!(supply.sample(range, 2), vec![3, 1]);
    }

    #[test]
    fn from_draws_reverses_into_supply_order() {
        let range = NumberRange::new(0, 10).expect("valid range");
        let mut supply = ScriptedSupply::from_draws(vec![1, 3, 6, 9]);
        assert_eq!(supply.sample(range, 4), vec![9, 6, 3, 1]);
    }
}
