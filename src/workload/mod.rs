//! Workload drivers for simulation runs.
//!
//! - [`Distribution`] - Uniform, clustered (Poisson) or weighted hot-range
//! - [`Workload`] - Seeded, reproducible id stream for one distribution

mod distribution;
mod generator;

pub use distribution::Distribution;
pub use generator::Workload;
