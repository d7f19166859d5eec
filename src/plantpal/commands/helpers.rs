use crate::commands::{CmdMessage, CmdResult};
use crate::error::{PlantError, Result};
use crate::model::{Plant, PlantId};
use crate::store::{RecordStore, SnapshotBackend};

/// Names are required and stored trimmed.
pub fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(PlantError::Validation("Plant name required".to_string()));
    }
    Ok(trimmed.to_string())
}

pub fn require_plant<B: SnapshotBackend>(store: &RecordStore<B>, id: PlantId) -> Result<&Plant> {
    store.get(id).ok_or(PlantError::PlantNotFound(id))
}

pub fn unsaved_warning(reason: &str) -> CmdMessage {
    CmdMessage::warning(format!(
        "Changes kept in memory but not saved: {}",
        reason
    ))
}

/// Resolve a store mutation into the updated plant.
///
/// A failed snapshot write is not fatal: it becomes a warning on `result`
/// and the in-memory plant is returned.
pub fn settle<B: SnapshotBackend>(
    store: &RecordStore<B>,
    id: PlantId,
    outcome: Result<Option<Plant>>,
    result: &mut CmdResult,
) -> Result<Plant> {
    match outcome {
        Ok(Some(plant)) => Ok(plant),
        Ok(None) => Err(PlantError::PlantNotFound(id)),
        Err(PlantError::Persistence(reason)) => {
            result.add_message(unsaved_warning(&reason));
            require_plant(store, id).cloned()
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::PlantPatch;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn validate_name_trims() {
        assert_eq!(validate_name("  Aloe  ").unwrap(), "Aloe");
    }

    #[test]
    fn validate_name_rejects_blank() {
        for name in ["", "   ", "\t\n"] {
            assert!(matches!(
                validate_name(name),
                Err(PlantError::Validation(_))
            ));
        }
    }

    #[test]
    fn settle_demotes_persistence_failure() {
        let mut store = RecordStore::open(MemBackend::new());
        store.backend().set_simulate_write_error(true);
        let outcome = store.update(1, PlantPatch::default().name("Monstera"));
        let mut result = CmdResult::default();

        let plant = settle(&store, 1, outcome, &mut result).unwrap();

        assert_eq!(plant.name, "Monstera");
        assert!(result.has_level(MessageLevel::Warning));
    }

    #[test]
    fn settle_maps_missing_plant() {
        let store = RecordStore::open(MemBackend::new());
        let mut result = CmdResult::default();
        let err = settle(&store, 50, Ok(None), &mut result).unwrap_err();
        assert!(matches!(err, PlantError::PlantNotFound(50)));
    }
}
