//! Bundled seen-store implementations.
//!
//! [`MemorySeenStore`] for tests and single-shot runs, [`JsonlSeenStore`]
//! for the original tool's use case: one append-only file of published
//! courses surviving process restarts. Anything bigger belongs behind the
//! caller's own [`SeenStore`] implementation.

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::dedup::SeenStore;
use crate::error::ConflictError;
use crate::record::SeenRecord;

/// In-memory seen-store: a map keyed by normalized coupon URL under one
/// mutex.
#[derive(Debug, Default)]
pub struct MemorySeenStore {
    records: Mutex<HashMap<String, SeenRecord>>,
}

impl MemorySeenStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded courses.
    #[must_use]
    pub fn len(&self) -> usize {
        lock_poison_ok(&self.records).len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SeenStore for MemorySeenStore {
    fn exists(&self, coupon_url: &str) -> bool {
        lock_poison_ok(&self.records).contains_key(coupon_url)
    }

    fn find_by_slug(&self, slug: &str) -> Option<SeenRecord> {
        lock_poison_ok(&self.records)
            .values()
            .find(|record| record.course_slug.as_deref() == Some(slug))
            .cloned()
    }

    fn all_titles(&self) -> Vec<(String, SeenRecord)> {
        lock_poison_ok(&self.records)
            .values()
            .map(|record| (record.normalized_title.clone(), record.clone()))
            .collect()
    }

    fn insert(&self, record: SeenRecord) -> Result<(), ConflictError> {
        let mut records = lock_poison_ok(&self.records);
        if records.contains_key(&record.coupon_url) {
            return Err(ConflictError(record.coupon_url));
        }
        records.insert(record.coupon_url.clone(), record);
        Ok(())
    }
}

/// File-backed seen-store: one JSON object per line, append-only.
///
/// The whole file is loaded at open; inserts append under the same lock
/// that guards the in-memory index, so the uniqueness check and the write
/// cannot interleave. A failed append is logged and the row kept in
/// memory — the run continues with degraded durability rather than
/// aborting.
#[derive(Debug)]
pub struct JsonlSeenStore {
    path: PathBuf,
    records: Mutex<HashMap<String, SeenRecord>>,
}

impl JsonlSeenStore {
    /// Open a store file, creating it if absent.
    ///
    /// Lines that fail to parse are skipped with a warning; a partially
    /// torn last line (crash mid-append) must not brick the store.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut records = HashMap::new();

        match File::open(&path) {
            Ok(file) => {
                for line in BufReader::new(file).lines() {
                    let line = line?;
                    if line.trim().is_empty() {
                        continue;
                    }
                    match serde_json::from_str::<SeenRecord>(&line) {
                        Ok(record) => {
                            records.insert(record.coupon_url.clone(), record);
                        }
                        Err(err) => {
                            tracing::warn!(path = %path.display(), %err, "skipping unreadable store line");
                        }
                    }
                }
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err),
        }

        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    /// Number of recorded courses.
    #[must_use]
    pub fn len(&self) -> usize {
        lock_poison_ok(&self.records).len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn append(&self, record: &SeenRecord) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let line = serde_json::to_string(record)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        writeln!(file, "{line}")
    }
}

impl SeenStore for JsonlSeenStore {
    fn exists(&self, coupon_url: &str) -> bool {
        lock_poison_ok(&self.records).contains_key(coupon_url)
    }

    fn find_by_slug(&self, slug: &str) -> Option<SeenRecord> {
        lock_poison_ok(&self.records)
            .values()
            .find(|record| record.course_slug.as_deref() == Some(slug))
            .cloned()
    }

    fn all_titles(&self) -> Vec<(String, SeenRecord)> {
        lock_poison_ok(&self.records)
            .values()
            .map(|record| (record.normalized_title.clone(), record.clone()))
            .collect()
    }

    fn insert(&self, record: SeenRecord) -> Result<(), ConflictError> {
        let mut records = lock_poison_ok(&self.records);
        if records.contains_key(&record.coupon_url) {
            return Err(ConflictError(record.coupon_url));
        }
        if let Err(err) = self.append(&record) {
            tracing::warn!(path = %self.path.display(), %err, "store append failed, row kept in memory");
        }
        records.insert(record.coupon_url.clone(), record);
        Ok(())
    }
}

// A poisoned mutex means another thread panicked mid-operation; the map
// itself is still coherent for our single-key updates, so recover the
// guard rather than propagate the panic.
fn lock_poison_ok<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
