//! Discrete weighted sampling with a cumulative-weight table.
//!
//! Drives the virtual users' action choice. Seedable through the caller's
//! RNG, so a load run with a fixed seed replays the same action sequence.

use rand::Rng;

/// Samples items from a fixed weighted set in O(log n).
#[derive(Debug, Clone)]
pub struct WeightedSampler<T> {
    /// Entries paired with their cumulative weight upper bound.
    cumulative: Vec<(u32, T)>,
    total: u32,
}

impl<T: Copy> WeightedSampler<T> {
    /// Build a sampler from `(item, weight)` pairs. Zero-weight entries are
    /// never sampled and are dropped up front.
    ///
    /// # Panics
    ///
    /// Panics if no entry has a positive weight.
    #[must_use]
    pub fn new(entries: &[(T, u32)]) -> Self {
        let mut cumulative = Vec::with_capacity(entries.len());
        let mut total = 0_u32;
        for &(item, weight) in entries {
            if weight == 0 {
                continue;
            }
            total += weight;
            cumulative.push((total, item));
        }
        assert!(total > 0, "weighted sampler requires a positive total weight");
        Self { cumulative, total }
    }

    /// Draw one item; the probability of each item is its weight divided by
    /// the total weight.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        let roll = rng.random_range(0..self.total);
        let index = self.cumulative.partition_point(|&(bound, _)| bound <= roll);
        match self.cumulative.get(index) {
            Some(&(_, item)) => item,
            // roll < total, so it always lands below the last bound
            None => unreachable!("cumulative table covers the full weight range"),
        }
    }

    /// Sum of all positive weights.
    #[must_use]
    pub const fn total_weight(&self) -> u32 {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_respects_weights() {
        let sampler = WeightedSampler::new(&[("common", 9), ("rare", 1)]);
        let mut rng = StdRng::seed_from_u64(7);

        let mut common = 0_u32;
        for _ in 0..10_000 {
            if sampler.sample(&mut rng) == "common" {
                common += 1;
            }
        }

        // 9:1 weighting; allow generous slack around the expected 9000
        assert!((8_700..=9_300).contains(&common), "got {common}");
    }

    #[test]
    fn test_zero_weight_is_never_sampled() {
        let sampler = WeightedSampler::new(&[("live", 1), ("dead", 0)]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            assert_eq!(sampler.sample(&mut rng), "live");
        }
    }

    #[test]
    fn test_same_seed_replays_sequence() {
        let sampler = WeightedSampler::new(&[(1, 5), (2, 3), (3, 1)]);

        let mut first = StdRng::seed_from_u64(42);
        let mut second = StdRng::seed_from_u64(42);
        let a: Vec<i32> = (0..100).map(|_| sampler.sample(&mut first)).collect();
        let b: Vec<i32> = (0..100).map(|_| sampler.sample(&mut second)).collect();

        assert_eq!(a, b);
    }

    #[test]
    #[should_panic(expected = "positive total weight")]
    fn test_all_zero_weights_panics() {
        let _ = WeightedSampler::new(&[("a", 0), ("b", 0)]);
    }

    #[test]
    fn test_total_weight() {
        let sampler = WeightedSampler::new(&[("a", 5), ("b", 3)]);
        assert_eq!(sampler.total_weight(), 8);
    }
}
