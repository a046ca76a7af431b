//! Seeded generator of item ids.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::Poisson;

use crate::common::config::POISSON_LAMBDA;
use crate::common::ItemId;
use crate::workload::distribution::{
    sample_hot_range, sample_poisson, sample_uniform, Distribution,
};

/// Draws item ids from a [`Distribution`].
///
/// Draws are independent: the only state is the random generator, so two
/// workloads built with the same distribution and seed yield the same ids.
///
/// # Example
/// ```
/// use textcache::workload::{Distribution, Workload};
///
/// let a: Vec<_> = Workload::new(Distribution::Poisson, 42).take(5).collect();
/// let b: Vec<_> = Workload::new(Distribution::Poisson, 42).take(5).collect();
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone)]
pub struct Workload {
    distribution: Distribution,
    rng: StdRng,
    poisson: Poisson<f64>,
}

impl Workload {
    pub fn new(distribution: Distribution, seed: u64) -> Self {
        Self {
            distribution,
            rng: StdRng::seed_from_u64(seed),
            poisson: Poisson::new(POISSON_LAMBDA).expect("POISSON_LAMBDA is positive and finite"),
        }
    }

    pub fn distribution(&self) -> Distribution {
        self.distribution
    }

    /// Restart the stream from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Draw the next id.
    pub fn next_item(&mut self) -> ItemId {
        match self.distribution {
            Distribution::Uniform => sample_uniform(&mut self.rng),
            Distribution::Poisson => sample_poisson(&mut self.rng, &self.poisson),
            Distribution::HotRange => sample_hot_range(&mut self.rng),
        }
    }
}

impl Iterator for Workload {
    type Item = ItemId;

    fn next(&mut self) -> Option<ItemId> {
        Some(self.next_item())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        for d in Distribution::ALL {
            let a: Vec<ItemId> = Workload::new(d, 99).take(50).collect();
            let b: Vec<ItemId> = Workload::new(d, 99).take(50).collect();
            assert_eq!(a, b, "{} not reproducible", d);
        }
    }

    #[test]
    fn test_reseed_restarts_stream() {
        let mut workload = Workload::new(Distribution::Uniform, 5);
        let first: Vec<ItemId> = workload.by_ref().take(20).collect();

        workload.reseed(5);
        let again: Vec<ItemId> = workload.take(20).collect();

        assert_eq!(first, again);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a: Vec<ItemId> = Workload::new(Distribution::Uniform, 1).take(50).collect();
        let b: Vec<ItemId> = Workload::new(Distribution::Uniform, 2).take(50).collect();
        assert_ne!(a, b);
    }
}
