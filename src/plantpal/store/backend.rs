use crate::error::Result;
use std::path::PathBuf;

/// Abstract interface for the key-value facility the snapshot lives in.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while RecordStore handles the "what" (hydration, merging, thumbnails).
pub trait SnapshotBackend {
    /// Read the raw value stored under `key`.
    /// Returns Ok(None) if nothing is stored there.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing what was there.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Where `key` lives. For FsBackend, this is the real path.
    /// For MemBackend, a virtual path.
    fn location(&self, key: &str) -> PathBuf;
}
