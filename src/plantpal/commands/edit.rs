use crate::commands::helpers::{require_plant, settle, validate_name};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{PlantId, PlantPatch};
use crate::store::{RecordStore, SnapshotBackend};

pub fn run<B: SnapshotBackend>(
    store: &mut RecordStore<B>,
    id: PlantId,
    mut patch: PlantPatch,
) -> Result<CmdResult> {
    if let Some(name) = &patch.name {
        patch.name = Some(validate_name(name)?);
    }
    let current = require_plant(store, id)?.clone();

    let mut result = CmdResult::default();
    if patch.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "Nothing to update for {}.",
            current.name
        )));
        return Ok(result.with_affected_plants(vec![current]));
    }

    let outcome = store.update(id, patch);
    let plant = settle(store, id, outcome, &mut result)?;
    result.add_message(CmdMessage::success(format!("{} has been updated.", plant.name)));
    Ok(result.with_affected_plants(vec![plant]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::error::PlantError;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn edits_fields() {
        let mut store = RecordStore::open(MemBackend::new());
        let patch = PlantPatch {
            where_bought: Some("Farmers market".into()),
            date_acquired: Some("2024-09-01".into()),
            ..PlantPatch::default()
        };

        let result = run(&mut store, 2, patch).unwrap();

        let plant = &result.affected_plants[0];
        assert_eq!(plant.where_bought, "Farmers market");
        assert_eq!(plant.date_acquired, "2024-09-01");
        assert_eq!(plant.name, "Snake Plant");
        assert_eq!(result.messages[0].content, "Snake Plant has been updated.");
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut store = RecordStore::open(MemBackend::new());
        let err = run(&mut store, 2, PlantPatch::default().name(" ")).unwrap_err();
        assert!(matches!(err, PlantError::Validation(_)));
        assert_eq!(store.get(2).unwrap().name, "Snake Plant");
        assert_eq!(store.backend().write_count(), 0);
    }

    #[test]
    fn missing_plant_is_an_error() {
        let mut store = RecordStore::open(MemBackend::new());
        let err = run(&mut store, 40, PlantPatch::default().notes("x")).unwrap_err();
        assert!(matches!(err, PlantError::PlantNotFound(40)));
    }

    #[test]
    fn empty_patch_writes_nothing() {
        let mut store = RecordStore::open(MemBackend::new());
        let result = run(&mut store, 2, PlantPatch::default()).unwrap();
        assert!(result.has_level(MessageLevel::Info));
        assert_eq!(store.backend().write_count(), 0);
    }
}
