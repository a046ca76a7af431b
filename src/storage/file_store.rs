//! File Store - one plain-text file per item.
//!
//! The [`FileStore`] is the "disk" in front of which the cache sits:
//! - Items live at `<dir>/<id>.txt`
//! - Real reads pay a base delay plus a size-proportional delay
//! - Missing files fall back to a [`SyntheticStore`]

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Instant;

use crate::common::config::StoreLatency;
use crate::common::{Error, ItemId, Result};
use crate::storage::backing_store::{BackingStore, StoreRead};
use crate::storage::synthetic_store::SyntheticStore;

/// Reads item content from a directory of text files.
///
/// # Directory Layout
/// ```text
/// texts/
/// ├── 1.txt
/// ├── 2.txt
/// ├── ...
/// └── 100.txt
/// ```
///
/// Any file may be absent. A missing file is served by the synthetic
/// fallback, which costs [`StoreLatency::fallback`] instead of the disk
/// read latency.
///
/// # Memory
/// The content buffer is reserved with `try_reserve_exact`, so an item too
/// large to hold yields [`Error::Allocation`] instead of aborting.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    latency: StoreLatency,
    fallback: SyntheticStore,
}

impl FileStore {
    /// Create a store over `dir` with the default latency model.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self::with_latency(dir, StoreLatency::default())
    }

    /// Create a store over `dir` with a custom latency model.
    pub fn with_latency<P: AsRef<Path>>(dir: P, latency: StoreLatency) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            latency,
            fallback: SyntheticStore::new(latency.fallback),
        }
    }

    /// The directory items are read from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `item_id`.
    pub fn path_for(&self, item_id: ItemId) -> PathBuf {
        self.dir.join(format!("{}.txt", item_id))
    }

    /// Whether a real file exists for `item_id`.
    pub fn contains(&self, item_id: ItemId) -> bool {
        self.path_for(item_id).is_file()
    }

    /// Number of reads that fell back to placeholder content.
    pub fn fallback_reads(&self) -> u64 {
        self.fallback.reads()
    }

    fn read_file(&self, item_id: ItemId, mut file: File) -> Result<String> {
        let len = usize::try_from(file.metadata()?.len()).unwrap_or(usize::MAX);

        let mut buf = Vec::new();
        buf.try_reserve_exact(len)
            .map_err(|_| Error::Allocation { item: item_id, bytes: len })?;
        file.read_to_end(&mut buf)?;

        Ok(match String::from_utf8(buf) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })
    }
}

impl BackingStore for FileStore {
    fn read(&mut self, item_id: ItemId) -> Result<StoreRead> {
        let start = Instant::now();

        let file = match File::open(self.path_for(item_id)) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let mut read = self.fallback.read(item_id)?;
                read.elapsed = start.elapsed();
                return Ok(read);
            }
            Err(e) => return Err(e.into()),
        };

        let content = self.read_file(item_id, file)?;

        let delay = self.latency.disk_read(content.len());
        if !delay.is_zero() {
            thread::sleep(delay);
        }

        Ok(StoreRead {
            content,
            elapsed: start.elapsed(),
            synthetic: false,
        })
    }
}
