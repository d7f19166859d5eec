use crate::commands::{CmdMessage, CmdResult};
use crate::error::{PlantError, Result};
use crate::store::{RecordStore, SnapshotBackend};

/// Discard the saved collection and go back to the starter plants.
pub fn run<B: SnapshotBackend>(store: &mut RecordStore<B>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match store.reset() {
        Ok(()) => {}
        Err(PlantError::Persistence(reason)) => {
            result.add_message(CmdMessage::warning(format!(
                "Saved collection could not be deleted: {}",
                reason
            )));
        }
        Err(e) => return Err(e),
    }
    result.add_message(CmdMessage::success(format!(
        "Collection reset to {} starter plants.",
        store.len()
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::NewPlant;
    use crate::store::mem_backend::MemBackend;
    use crate::store::{Origin, SNAPSHOT_KEY};

    #[test]
    fn reset_restores_seed_and_deletes_snapshot() {
        let mut store = RecordStore::open(MemBackend::new());
        store.create(NewPlant::named("Hoya")).unwrap();
        assert!(store.backend().raw(SNAPSHOT_KEY).is_some());

        let result = run(&mut store).unwrap();

        assert_eq!(store.len(), 6);
        assert_eq!(store.origin(), Origin::Seed);
        assert!(store.backend().raw(SNAPSHOT_KEY).is_none());
        assert!(result.has_level(MessageLevel::Success));
    }

    #[test]
    fn failed_delete_is_a_warning() {
        let mut store = RecordStore::open(MemBackend::new());
        store.backend().set_simulate_write_error(true);
        let result = run(&mut store).unwrap();
        assert!(result.has_level(MessageLevel::Warning));
        assert_eq!(store.len(), 6);
    }
}
