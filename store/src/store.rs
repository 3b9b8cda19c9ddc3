use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

use crate::error::StoreError;
use crate::record::Record;

/// Persists the full roster of records as one unit.
///
/// Implementations must be safe for concurrent use. Note that callers run
/// a plain load-then-save cycle with no write lock across the two calls:
/// two racing mutations can lose an update (last save wins).
pub trait RecordStore: Send + Sync {
    /// Returns all records in store order.
    fn load(&self) -> Result<Vec<Record>, StoreError>;

    /// Replaces the persisted roster with `records`.
    fn save(&self, records: &[Record]) -> Result<(), StoreError>;
}

/// Single-file JSON [`RecordStore`].
///
/// The backing file holds the whole roster as a pretty-printed JSON array,
/// an operational artifact meant to be readable and hand-editable. A
/// missing file reads as an empty roster. A file that exists but fails to
/// parse also reads as empty: the error is logged and the service keeps
/// answering rather than halting on bad data. The next successful save
/// overwrites whatever was there.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for FileStore {
    fn load(&self) -> Result<Vec<Record>, StoreError> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                warn!("failed to read {}: {}", self.path.display(), e);
                return Ok(Vec::new());
            }
        };

        match serde_json::from_slice(&data) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!(
                    "malformed record file {}, treating as empty: {}",
                    self.path.display(),
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, records: &[Record]) -> Result<(), StoreError> {
        let io_err = |e: std::io::Error| StoreError::Io(e.to_string());

        let data = serde_json::to_vec_pretty(records)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;

        // Write to a sibling temp file and rename so readers never see a
        // half-written roster.
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, &data).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}

/// In-memory [`RecordStore`] implementation.
/// Data is lost on restart. Suitable for testing or ephemeral use.
pub struct MemoryStore {
    records: Mutex<Vec<Record>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for MemoryStore {
    fn load(&self) -> Result<Vec<Record>, StoreError> {
        Ok(self.records.lock().unwrap().clone())
    }

    fn save(&self, records: &[Record]) -> Result<(), StoreError> {
        *self.records.lock().unwrap() = records.to_vec();
        Ok(())
    }
}
