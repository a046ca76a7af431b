//! Access-pattern distributions over the item id range.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand_distr::{Distribution as _, Poisson};

use crate::common::config::{HOT_PROBABILITY, HOT_RANGE, NUM_ITEMS, POISSON_SAMPLE_CAP};
use crate::common::{Error, ItemId, Result};

/// The shape of a simulated access stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Distribution {
    /// Every id equally likely.
    Uniform,
    /// Poisson sample folded into the id range by modulo.
    Poisson,
    /// [`HOT_PROBABILITY`] of picking from [`HOT_RANGE`], else the rest.
    HotRange,
}

impl Distribution {
    /// Every distribution, in the order experiments run them.
    pub const ALL: [Distribution; 3] = [
        Distribution::Uniform,
        Distribution::Poisson,
        Distribution::HotRange,
    ];

    /// Short name, as used in report file names.
    pub fn name(self) -> &'static str {
        match self {
            Distribution::Uniform => "uniform",
            Distribution::Poisson => "poisson",
            Distribution::HotRange => "weighted30-40",
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Distribution {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Distribution::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidCommand(s.to_string()))
    }
}

pub(crate) fn sample_uniform<R: Rng + ?Sized>(rng: &mut R) -> ItemId {
    ItemId::from_index(rng.random_range(0..NUM_ITEMS as usize))
}

pub(crate) fn sample_poisson<R: Rng + ?Sized>(rng: &mut R, poisson: &Poisson<f64>) -> ItemId {
    let k = (poisson.sample(rng) as u64).min(POISSON_SAMPLE_CAP);
    ItemId::from_index((k % u64::from(NUM_ITEMS)) as usize)
}

pub(crate) fn sample_hot_range<R: Rng + ?Sized>(rng: &mut R) -> ItemId {
    let (hot_start, hot_end) = (*HOT_RANGE.start(), *HOT_RANGE.end());
    let hot_len = hot_end - hot_start + 1;

    let id = if rng.random_bool(HOT_PROBABILITY) {
        rng.random_range(HOT_RANGE)
    } else {
        // Uniform over the complement: number the cold ids 1..=cold and
        // skip over the hot block.
        let k = rng.random_range(1..=NUM_ITEMS - hot_len);
        if k < hot_start {
            k
        } else {
            k + hot_len
        }
    };
    ItemId::from_index(id as usize - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_names_and_parse() {
        for d in Distribution::ALL {
            assert_eq!(d.name().parse::<Distribution>().unwrap(), d);
        }
        assert_eq!(Distribution::HotRange.to_string(), "weighted30-40");
        assert!("zipf".parse::<Distribution>().is_err());
    }

    #[test]
    fn test_hot_range_split() {
        let mut rng = StdRng::seed_from_u64(7);
        let draws = 20_000;
        let hot = (0..draws)
            .map(|_| sample_hot_range(&mut rng))
            .filter(|id| HOT_RANGE.contains(&id.get()))
            .count();

        let fraction = hot as f64 / draws as f64;
        assert!((0.40..0.46).contains(&fraction), "hot fraction {}", fraction);
    }

    #[test]
    fn test_hot_range_cold_side_covers_complement() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; NUM_ITEMS as usize];
        for _ in 0..50_000 {
            seen[sample_hot_range(&mut rng).index()] = true;
        }
        assert!(seen.iter().all(|&s| s), "every id should be reachable");
    }

    #[test]
    fn test_poisson_clusters_near_lambda() {
        let mut rng = StdRng::seed_from_u64(3);
        let poisson = Poisson::new(30.0).unwrap();
        let draws: Vec<u32> = (0..10_000)
            .map(|_| sample_poisson(&mut rng, &poisson).get())
            .collect();

        let mean = draws.iter().map(|&d| d as f64).sum::<f64>() / draws.len() as f64;
        // sample k maps to id k + 1
        assert!((29.0..33.0).contains(&mean), "mean {}", mean);
        assert!(draws.iter().all(|&d| (1..=NUM_ITEMS).contains(&d)));
    }

    #[test]
    fn test_uniform_in_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            let id = sample_uniform(&mut rng);
            assert!((1..=NUM_ITEMS).contains(&id.get()));
        }
    }
}
