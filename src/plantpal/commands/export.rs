use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::{RecordStore, SnapshotBackend};

/// The collection in its stored JSON form.
pub fn run<B: SnapshotBackend>(store: &RecordStore<B>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    result.snapshot = Some(store.snapshot_json()?);
    Ok(result)
}
