//! Injectable random draws.
//!
//! The playback engine draws random numbers in three places: branch
//! selection (`0..=99`), the idle delay (`5000..=15000` ms) and the choice of
//! idle animation. All of them go through [`RandomSource`] so hosts can seed
//! the generator and tests can script exact sequences.

use fastrand::Rng;

/// Source of uniformly distributed integers.
pub trait RandomSource: Send + Sync {
    /// Uniform integer in `low..=high`.
    fn int_in_range(&mut self, low: u32, high: u32) -> u32;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize;
}

/// [`RandomSource`] backed by `fastrand`.
#[derive(Debug, Clone)]
pub struct FastRandSource {
    rng: Rng,
}

impl FastRandSource {
    pub fn new() -> Self {
        Self { rng: Rng::new() }
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Rng::with_seed(seed),
        }
    }
}

impl Default for FastRandSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for FastRandSource {
    fn int_in_range(&mut self, low: u32, high: u32) -> u32 {
        self.rng.u32(low..=high)
    }

    fn index(&mut self, len: usize) -> usize {
        self.rng.usize(0..len)
    }
}

/// Replays a fixed list of values, cycling when exhausted.
///
/// Each value is folded into the requested range: `int_in_range` yields
/// `low + value % (high - low + 1)` and `index` yields `value % len`, so a
/// script of `[30]` draws 30 for a branch roll and 5030 ms for an idle delay.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<u32>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        let values = values.into();
        Self { values, cursor: 0 }
    }

    /// Always draws `value`.
    pub fn constant(value: u32) -> Self {
        Self::new(vec![value])
    }

    fn next_value(&mut self) -> u32 {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

impl RandomSource for ScriptedRandom {
    fn int_in_range(&mut self, low: u32, high: u32) -> u32 {
        let span = high - low + 1;
        low + self.next_value() % span
    }

    fn index(&mut self, len: usize) -> usize {
        self.next_value() as usize % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_sources_repeat() {
        let mut a = FastRandSource::seeded(7);
        let mut b = FastRandSource::seeded(7);
        for _ in 0..32 {
            assert_eq!(a.int_in_range(0, 99), b.int_in_range(0, 99));
        }
    }

    #[test]
    fn fastrand_draws_stay_in_range() {
        let mut source = FastRandSource::seeded(42);
        for _ in 0..1000 {
            let delay = source.int_in_range(5000, 15000);
            assert!((5000..=15000).contains(&delay));
            assert!(source.index(3) < 3);
        }
    }

    #[test]
    fn scripted_values_cycle_and_fold() {
        let mut source = ScriptedRandom::new(vec![30, 250]);
        assert_eq!(source.int_in_range(0, 99), 30);
        assert_eq!(source.int_in_range(0, 99), 50);
        assert_eq!(source.int_in_range(5000, 15000), 5030);
        assert_eq!(source.index(4), 2);
    }

    #[test]
    fn empty_script_draws_zero() {
        let mut source = ScriptedRandom::new(Vec::new());
        assert_eq!(source.int_in_range(0, 99), 0);
        assert_eq!(source.index(5), 0);
    }
}
