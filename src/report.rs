//! Per-item miss reports written after each simulation run.

use std::io;
use std::path::{Path, PathBuf};

use crate::cache::{Policy, StatsSnapshot};
use crate::common::Result;
use crate::workload::Distribution;

/// File name for the report of one `(policy, distribution)` run.
///
/// # Example
/// ```
/// use textcache::report::report_file_name;
/// use textcache::workload::Distribution;
/// use textcache::Policy;
///
/// assert_eq!(
///     report_file_name(Policy::Lfu, Distribution::HotRange),
///     "sim_LFU_weighted30-40_per_text_misses.csv"
/// );
/// ```
pub fn report_file_name(policy: Policy, distribution: Distribution) -> String {
    format!("sim_{}_{}_per_text_misses.csv", policy, distribution)
}

/// Write the `text_id,miss_count` table for every item to `writer`.
pub fn write_miss_report<W: io::Write>(writer: W, snapshot: &StatsSnapshot) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["text_id", "miss_count"])?;
    for (item_id, misses) in snapshot.miss_histogram() {
        wtr.write_record([item_id.to_string(), misses.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the report for one run into `dir`, returning the file path.
pub fn save_miss_report(
    dir: &Path,
    policy: Policy,
    distribution: Distribution,
    snapshot: &StatsSnapshot,
) -> Result<PathBuf> {
    let path = dir.join(report_file_name(policy, distribution));
    let file = std::fs::File::create(&path)?;
    write_miss_report(file, snapshot)?;
    Ok(path)
}
