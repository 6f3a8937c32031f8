//! Append-only JSON-lines store
//!
//! Two files under one directory: the primary record log and the pending
//! log. One mutex serializes every file mutation; the identifier allocator
//! lives behind the same lock boundary, so an identifier and its log line
//! are committed as one atomic unit and the primary log's physical order is
//! strictly increasing by identifier.
//!
//! Appends never rewrite existing lines. The pending log supports append,
//! read-all, and truncate only; truncate takes the entries to keep, so the
//! replay driver can re-queue what it failed to drain.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::alloc::IdAllocator;
use crate::error::Result;
use crate::record::{LinkStatuses, PendingRecord, Record};

/// Store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding both log files
    pub dir: PathBuf,

    /// Primary record log file name
    pub records_file: String,

    /// Pending record log file name
    pub pending_file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            records_file: "records.jsonl".to_string(),
            pending_file: "pending.jsonl".to_string(),
        }
    }
}

impl StoreConfig {
    /// Config with a custom directory and default file names
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Default::default()
        }
    }
}

struct LogPaths {
    records: PathBuf,
    pending: PathBuf,
}

/// Append-only record store backed by two JSON-lines files
pub struct FileStore {
    paths: Mutex<LogPaths>,
    alloc: IdAllocator,
}

impl FileStore {
    /// Open the store, creating the directory and log files if missing
    ///
    /// Recovers the last used identifier from the primary log and seeds the
    /// allocator with it. Recovery is never fatal: undecodable lines are
    /// skipped with a warning and the last line that decodes wins.
    pub fn open(config: StoreConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.dir)?;

        let records = config.dir.join(&config.records_file);
        let pending = config.dir.join(&config.pending_file);

        // Touch both files so later opens only ever append.
        OpenOptions::new().create(true).append(true).open(&records)?;
        OpenOptions::new().create(true).append(true).open(&pending)?;

        let last_id = recover_last_id(&records);
        info!(
            last_id,
            records = %records.display(),
            pending = %pending.display(),
            "record store opened"
        );

        Ok(Self {
            paths: Mutex::new(LogPaths { records, pending }),
            alloc: IdAllocator::new(last_id),
        })
    }

    /// Append a finished record to the primary log
    ///
    /// Allocates the record's identifier under the file lock. On a write
    /// failure the identifier is rolled back before the lock is released,
    /// so no other batch can have observed it.
    pub fn append_record(&self, links: LinkStatuses) -> Result<Record> {
        let paths = self.paths.lock();

        let record = Record {
            links,
            id: self.alloc.next(),
        };

        match append_json_line(&paths.records, &record) {
            Ok(()) => Ok(record),
            Err(err) => {
                self.alloc.rollback();
                Err(err)
            }
        }
    }

    /// Append an unclassified batch to the pending log
    pub fn append_pending(&self, links: Vec<String>) -> Result<PendingRecord> {
        let paths = self.paths.lock();

        let pending = PendingRecord {
            links,
            id: self.alloc.next(),
        };

        match append_json_line(&paths.pending, &pending) {
            Ok(()) => Ok(pending),
            Err(err) => {
                self.alloc.rollback();
                Err(err)
            }
        }
    }

    /// Read every decodable entry in the pending log
    ///
    /// Undecodable lines (a torn tail from a crash mid-append, typically)
    /// are skipped with a warning rather than aborting the read.
    pub fn read_pending(&self) -> Result<Vec<PendingRecord>> {
        let paths = self.paths.lock();

        let file = File::open(&paths.pending)?;
        let reader = BufReader::new(file);

        let mut entries = Vec::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<PendingRecord>(&line) {
                Ok(entry) => entries.push(entry),
                Err(err) => {
                    warn!(line = line_no + 1, error = %err, "skipping undecodable pending entry");
                }
            }
        }

        Ok(entries)
    }

    /// Truncate the pending log, retaining only `keep`
    ///
    /// The replay driver passes the entries it failed to drain so they
    /// survive to the next startup. Pass an empty slice for a plain clear;
    /// clearing an already empty log is a no-op.
    pub fn truncate_pending(&self, keep: &[PendingRecord]) -> Result<()> {
        let paths = self.paths.lock();

        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(&paths.pending)?;

        for entry in keep {
            let mut line = serde_json::to_vec(entry)?;
            line.push(b'\n');
            file.write_all(&line)?;
        }
        file.flush()?;

        if !keep.is_empty() {
            debug!(kept = keep.len(), "re-queued pending entries");
        }

        Ok(())
    }

    /// The last identifier committed or allocated
    pub fn last_id(&self) -> i64 {
        self.alloc.last()
    }
}

/// Serialize `entity` and append it as one newline-terminated line
fn append_json_line<T: Serialize>(path: &Path, entity: &T) -> Result<()> {
    let mut line = serde_json::to_vec(entity)?;
    line.push(b'\n');

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(&line)?;
    file.flush()?;

    Ok(())
}

/// Recover the last used identifier from the primary log
///
/// Buffered forward scan keeping the identifier of the last line that
/// decodes as a [`Record`]. A torn or corrupt tail therefore falls back to
/// the last valid line instead of resetting the counter to zero. An empty
/// or missing log yields zero.
fn recover_last_id(path: &Path) -> i64 {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(_) => return 0,
    };

    let mut last_id = 0;
    let mut skipped = 0usize;
    for line in BufReader::new(file).lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!(error = %err, "stopping identifier recovery on read error");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<Record>(&line) {
            Ok(record) => last_id = record.id,
            Err(_) => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!(
            skipped,
            last_id, "primary log contained undecodable lines, recovered from last valid line"
        );
    }

    last_id
}

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;
