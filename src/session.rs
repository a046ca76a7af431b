//! Interactive reading session.
//!
//! The session keeps one cache per policy, each with its own statistics.
//! The user picks the active policy, then requests items by number:
//!
//! ```text
//!   choose policy (0/1/2) ──► item number ──┬─ 1..=100 → read via active cache
//!          ▲                                ├─ 0       → quit
//!          └──────── after simulation ◄─────┴─ -1      → run all 9 experiments
//! ```
//!
//! Picking a policy starts from three empty caches. Bad input is reported
//! and the prompt repeats; end of input ends the session.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use log::info;

use crate::cache::{Cache, Policy};
use crate::common::config::{SimulationConfig, CACHE_CAPACITY, CACHE_READ_LATENCY, EXCERPT_LIMIT};
use crate::common::{Error, ItemId, Result};
use crate::simulation::run_suite;
use crate::storage::BackingStore;

/// One line of session input after a policy has been chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `0`
    Quit,
    /// `-1`
    Simulate,
    /// `1..=100`
    Read(ItemId),
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let n: i64 = s.parse().map_err(|_| Error::InvalidCommand(s.to_string()))?;
        match n {
            0 => Ok(Command::Quit),
            -1 => Ok(Command::Simulate),
            n => ItemId::try_from(n).map(Command::Read),
        }
    }
}

/// Settings for an interactive session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub capacity: usize,
    pub hit_latency: Duration,
    pub simulation: SimulationConfig,
    /// Where simulation reports go; `None` skips writing them.
    pub report_dir: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            capacity: CACHE_CAPACITY,
            hit_latency: CACHE_READ_LATENCY,
            simulation: SimulationConfig::default(),
            report_dir: Some(PathBuf::from(".")),
        }
    }
}

/// Longest prefix of `content` within `limit` bytes, cut on a char
/// boundary, and whether anything was cut.
pub fn excerpt(content: &str, limit: usize) -> (&str, bool) {
    if content.len() <= limit {
        return (content, false);
    }
    let mut end = limit;
    while !content.is_char_boundary(end) {
        end -= 1;
    }
    (&content[..end], true)
}

/// An interactive session over stores produced by `make_store`.
pub struct Session<S, F> {
    config: SessionConfig,
    make_store: F,
    /// Indexed by `Policy::selector()`.
    caches: Vec<Cache<S>>,
    active: Option<Policy>,
}

impl<S, F> Session<S, F>
where
    S: BackingStore,
    F: FnMut() -> S,
{
    pub fn new(config: SessionConfig, mut make_store: F) -> Self {
        let caches = Self::fresh_caches(&config, &mut make_store);
        Self {
            config,
            make_store,
            caches,
            active: None,
        }
    }

    fn fresh_caches(config: &SessionConfig, make_store: &mut F) -> Vec<Cache<S>> {
        Policy::ALL
            .iter()
            .map(|_| Cache::with_hit_latency(config.capacity, config.hit_latency, make_store()))
            .collect()
    }

    /// The policy reads currently go through.
    pub fn active(&self) -> Option<Policy> {
        self.active
    }

    /// Make `policy` active, starting from three empty caches.
    pub fn select(&mut self, policy: Policy) {
        self.caches = Self::fresh_caches(&self.config, &mut self.make_store);
        self.active = Some(policy);
        info!("session using {}", policy);
    }

    /// The cache dedicated to `policy`.
    pub fn cache(&self, policy: Policy) -> &Cache<S> {
        &self.caches[policy.selector() as usize]
    }

    /// Read an item through the active policy's cache.
    ///
    /// # Errors
    /// - `Error::InvalidCommand` if no policy is selected
    /// - Store failures from [`Cache::access`]
    pub fn read(&mut self, item_id: ItemId) -> Result<String> {
        let policy = self
            .active
            .ok_or_else(|| Error::InvalidCommand("no algorithm selected".to_string()))?;
        self.caches[policy.selector() as usize].access(item_id, policy)
    }

    /// Drive the session from `input`, writing prompts and results to `out`.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> Result<()> {
        writeln!(out, "Enter a text number (1..100). 0 = quit. -1 = simulation mode.")?;

        loop {
            let Some(policy) = self.active else {
                write!(out, "Choose the cache algorithm: 0=FIFO 1=LRU 2=LFU\n> ")?;
                out.flush()?;
                let Some(line) = read_line(&mut input)? else {
                    return Ok(());
                };
                match line.parse::<Policy>() {
                    Ok(policy) => self.select(policy),
                    Err(e) => writeln!(out, "Invalid input: {}", e)?,
                }
                continue;
            };

            write!(out, "\nText number: ")?;
            out.flush()?;
            let Some(line) = read_line(&mut input)? else {
                return Ok(());
            };

            match line.parse::<Command>() {
                Ok(Command::Quit) => {
                    writeln!(out, "Exiting...")?;
                    return Ok(());
                }
                Ok(Command::Simulate) => self.simulate(&mut out)?,
                Ok(Command::Read(item_id)) => self.read_and_show(policy, item_id, &mut out)?,
                Err(e) => writeln!(out, "Invalid input: {}", e)?,
            }
        }
    }

    fn read_and_show<W: Write>(&mut self, policy: Policy, item_id: ItemId, out: &mut W) -> Result<()> {
        match self.read(item_id) {
            Ok(content) => {
                writeln!(out, "\n--- Text {} (excerpt) ---", item_id)?;
                let (shown, truncated) = excerpt(&content, EXCERPT_LIMIT);
                write!(out, "{}", shown)?;
                if truncated {
                    write!(out, "\n... (content truncated)")?;
                }
                writeln!(out, "\n--- End of excerpt ---")?;
            }
            Err(e) => writeln!(out, "[error loading content: {}]", e)?,
        }

        writeln!(out, "[{} stats so far] {}", policy, self.cache(policy).stats().snapshot())?;
        Ok(())
    }

    fn simulate<W: Write>(&mut self, out: &mut W) -> Result<()> {
        writeln!(out, "\n== Running full simulation suite ==")?;

        let mut lines = Vec::new();
        run_suite(
            &mut self.make_store,
            &self.config.simulation,
            self.config.report_dir.as_deref(),
            |report| {
                let mut line = format!("Result: {}", report);
                if let Some(path) = &report.report_path {
                    line.push_str(&format!("\nPer-text report saved: {}", path.display()));
                }
                if let Some(err) = &report.report_error {
                    line.push_str(&format!("\nFailed to write report: {}", err));
                }
                lines.push(line);
            },
        );
        for line in lines {
            writeln!(out, "{}", line)?;
        }

        writeln!(out, "Simulations finished.")?;
        self.active = None;
        Ok(())
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SyntheticStore;
    use std::io::Cursor;

    fn test_config() -> SessionConfig {
        SessionConfig {
            capacity: 2,
            hit_latency: Duration::ZERO,
            simulation: SimulationConfig {
                users: 1,
                requests_per_user: 20,
                ..SimulationConfig::instant()
            },
            report_dir: None,
        }
    }

    fn run_script(script: &str) -> (Session<SyntheticStore, fn() -> SyntheticStore>, String) {
        let mut session = Session::new(test_config(), SyntheticStore::instant as fn() -> SyntheticStore);
        let mut out = Vec::new();
        session.run(Cursor::new(script), &mut out).unwrap();
        (session, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_command() {
        assert_eq!("0".parse::<Command>().unwrap(), Command::Quit);
        assert_eq!(" -1 ".parse::<Command>().unwrap(), Command::Simulate);
        assert_eq!(
            "42".parse::<Command>().unwrap(),
            Command::Read(ItemId::new(42).unwrap())
        );
        assert!(matches!("101".parse::<Command>(), Err(Error::InvalidItemId(101))));
        assert!(matches!("-7".parse::<Command>(), Err(Error::InvalidItemId(-7))));
        assert!(matches!("abc".parse::<Command>(), Err(Error::InvalidCommand(_))));
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("short", 10), ("short", false));
        assert_eq!(excerpt("abcdef", 3), ("abc", true));
        // 'é' is two bytes; never split it.
        assert_eq!(excerpt("aé", 2), ("a", true));
    }

    #[test]
    fn test_session_reads_through_selected_cache() {
        let (session, out) = run_script("1\n5\n5\n0\n");

        assert_eq!(session.active(), Some(Policy::Lru));
        let lru = session.cache(Policy::Lru).stats().snapshot();
        assert_eq!((lru.hits, lru.misses), (1, 1));
        assert_eq!(session.cache(Policy::Fifo).stats().snapshot().requests(), 0);

        assert!(out.contains("--- Text 5 (excerpt) ---"));
        assert!(out.contains("SIMULATED CONTENT FOR TEXT 5"));
        assert!(out.contains("[LRU stats so far] hits=1 misses=1"));
        assert!(out.ends_with("Exiting...\n"));
    }

    #[test]
    fn test_session_rejects_bad_input_and_continues() {
        let (session, out) = run_script("9\nlru\n500\nxyz\n3\n");

        assert!(out.contains("Invalid input: invalid policy selector"));
        assert!(out.contains("Invalid input: invalid item id 500"));
        assert!(out.contains("Invalid input: invalid input \"xyz\""));
        // End of input after the last read ends the session cleanly.
        assert_eq!(session.cache(Policy::Lru).stats().snapshot().misses, 1);
    }

    #[test]
    fn test_session_simulation_then_reselect() {
        let (session, out) = run_script("0\n-1\n2\n7\n0\n");

        assert_eq!(out.matches("Result: ").count(), 9);
        assert!(out.contains("Simulations finished."));
        assert_eq!(session.active(), Some(Policy::Lfu));
        // Interactive caches start fresh after reselection.
        assert_eq!(session.cache(Policy::Lfu).stats().snapshot().misses, 1);
    }

    #[test]
    fn test_read_without_policy_fails() {
        let mut session = Session::new(test_config(), SyntheticStore::instant);
        assert!(matches!(
            session.read(ItemId::MIN),
            Err(Error::InvalidCommand(_))
        ));
    }
}
