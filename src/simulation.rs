//! Simulation experiments: every policy against every distribution.
//!
//! Each experiment builds a fresh [`Cache`] and statistics, replays
//! `users × requests_per_user` ids from a seeded [`Workload`], and discards
//! the cache at the end. Policies run against identical id streams for a
//! given distribution, so their miss counts are directly comparable.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::{info, warn};

use crate::cache::{Cache, Policy, StatsSnapshot};
use crate::common::config::SimulationConfig;
use crate::report::save_miss_report;
use crate::storage::BackingStore;
use crate::workload::{Distribution, Workload};

/// Outcome of one `(policy, distribution)` experiment.
#[derive(Debug, Clone)]
pub struct ExperimentReport {
    pub policy: Policy,
    pub distribution: Distribution,
    pub stats: StatsSnapshot,
    /// Wall time of the whole run.
    pub wall_time: Duration,
    /// Requests issued, failed ones included.
    pub requests: u64,
    /// Accesses whose fetch failed.
    pub failed_requests: u64,
    /// Where the miss report was written, if it was.
    pub report_path: Option<PathBuf>,
    /// Why the miss report could not be written.
    pub report_error: Option<String>,
}

impl ExperimentReport {
    /// Mean latency per issued request, in milliseconds.
    pub fn avg_latency_ms(&self) -> f64 {
        if self.requests == 0 {
            return 0.0;
        }
        self.stats.total_latency.as_secs_f64() * 1000.0 / self.requests as f64
    }
}

impl fmt::Display for ExperimentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {}: hits={}, misses={}, total_time={:.3} s, avg_latency_per_request={:.3} ms",
            self.policy,
            self.distribution,
            self.stats.hits,
            self.stats.misses,
            self.wall_time.as_secs_f64(),
            self.avg_latency_ms()
        )
    }
}

/// Seed of the id stream for `distribution`, shared by all policies.
pub fn stream_seed(base: u64, distribution: Distribution) -> u64 {
    base.wrapping_add(distribution as u64)
}

/// Run one experiment against `store`.
pub fn run_experiment<S: BackingStore>(
    policy: Policy,
    distribution: Distribution,
    store: S,
    config: &SimulationConfig,
) -> ExperimentReport {
    let mut cache = Cache::with_hit_latency(config.capacity, config.hit_latency, store);
    let mut workload = Workload::new(distribution, stream_seed(config.seed, distribution));
    let mut failed_requests = 0;

    let start = Instant::now();
    for _user in 0..config.users {
        for _ in 0..config.requests_per_user {
            let item_id = workload.next_item();
            if let Err(e) = cache.access(item_id, policy) {
                failed_requests += 1;
                warn!("{} / {}: access to item {} failed: {}", policy, distribution, item_id, e);
            }
        }
    }
    let wall_time = start.elapsed();

    ExperimentReport {
        policy,
        distribution,
        stats: cache.stats().snapshot(),
        wall_time,
        requests: config.total_requests() as u64,
        failed_requests,
        report_path: None,
        report_error: None,
    }
}

/// Run all 9 `(policy, distribution)` experiments.
///
/// `make_store` supplies a fresh store per experiment. If `report_dir` is
/// given, a miss report is written for every run; a failed write is logged
/// and recorded on the report but does not stop the suite. `observer` sees
/// each report as soon as its run completes.
pub fn run_suite<S, F, O>(
    mut make_store: F,
    config: &SimulationConfig,
    report_dir: Option<&Path>,
    mut observer: O,
) -> Vec<ExperimentReport>
where
    S: BackingStore,
    F: FnMut() -> S,
    O: FnMut(&ExperimentReport),
{
    let mut reports = Vec::with_capacity(Policy::ALL.len() * Distribution::ALL.len());

    for policy in Policy::ALL {
        for distribution in Distribution::ALL {
            let mut report = run_experiment(policy, distribution, make_store(), config);
            info!("{}", report);

            if let Some(dir) = report_dir {
                match save_miss_report(dir, policy, distribution, &report.stats) {
                    Ok(path) => report.report_path = Some(path),
                    Err(e) => {
                        warn!("could not write miss report for {} / {}: {}", policy, distribution, e);
                        report.report_error = Some(e.to_string());
                    }
                }
            }

            observer(&report);
            reports.push(report);
        }
    }

    reports
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SyntheticStore;
    use tempfile::tempdir;

    fn small_config() -> SimulationConfig {
        SimulationConfig {
            users: 2,
            requests_per_user: 50,
            ..SimulationConfig::instant()
        }
    }

    #[test]
    fn test_run_experiment_counts_every_request() {
        let config = small_config();
        let report = run_experiment(
            Policy::Lru,
            Distribution::HotRange,
            SyntheticStore::instant(),
            &config,
        );

        assert_eq!(report.requests, 100);
        assert_eq!(report.stats.requests(), 100);
        assert_eq!(report.failed_requests, 0);
        assert!(report.stats.misses >= 10);
    }

    #[test]
    fn test_experiment_is_reproducible() {
        let config = small_config();
        let a = run_experiment(Policy::Lfu, Distribution::Poisson, SyntheticStore::instant(), &config);
        let b = run_experiment(Policy::Lfu, Distribution::Poisson, SyntheticStore::instant(), &config);

        assert_eq!(a.stats.hits, b.stats.hits);
        assert_eq!(a.stats.misses, b.stats.misses);
    }

    #[test]
    fn test_suite_runs_nine_experiments_and_writes_reports() {
        let dir = tempdir().unwrap();
        let mut seen = 0;
        let reports = run_suite(
            SyntheticStore::instant,
            &small_config(),
            Some(dir.path()),
            |_| seen += 1,
        );

        assert_eq!(reports.len(), 9);
        assert_eq!(seen, 9);
        for report in &reports {
            let path = report.report_path.as_ref().unwrap();
            assert!(path.exists(), "{} missing", path.display());
            assert!(report.report_error.is_none());
        }
    }

    #[test]
    fn test_suite_survives_unwritable_report_dir() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing");
        let reports = run_suite(SyntheticStore::instant, &small_config(), Some(&missing), |_| {});

        assert_eq!(reports.len(), 9);
        for report in &reports {
            assert!(report.report_path.is_none());
            assert!(report.report_error.is_some());
            assert_eq!(report.stats.requests(), 100);
        }
    }

    #[test]
    fn test_report_display() {
        let report = run_experiment(
            Policy::Fifo,
            Distribution::Uniform,
            SyntheticStore::instant(),
            &small_config(),
        );
        let line = report.to_string();
        assert!(line.starts_with("FIFO / uniform: hits="));
        assert!(line.contains("avg_latency_per_request="));
    }
}
