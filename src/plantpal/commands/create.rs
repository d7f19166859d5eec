use crate::commands::helpers::{unsaved_warning, validate_name};
use crate::commands::photos::report_ingest;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{PlantError, Result};
use crate::ingest::{ImageSource, Ingestor};
use crate::model::NewPlant;
use crate::store::{RecordStore, SnapshotBackend};

/// Add a plant to the collection, then ingest its photos into it.
pub async fn run<B: SnapshotBackend>(
    store: &mut RecordStore<B>,
    ingestor: &Ingestor,
    mut new: NewPlant,
    photos: Vec<ImageSource>,
) -> Result<CmdResult> {
    new.name = validate_name(&new.name)?;
    let mut result = CmdResult::default();

    let plant = match store.create(new) {
        Ok(plant) => plant,
        Err(PlantError::Persistence(reason)) => {
            result.add_message(unsaved_warning(&reason));
            // create() allocates above every existing id
            store
                .get_all()
                .into_iter()
                .max_by_key(|p| p.id)
                .cloned()
                .ok_or_else(|| PlantError::Store("Created plant is missing".to_string()))?
        }
        Err(e) => return Err(e),
    };

    result.add_message(CmdMessage::success(format!(
        "{} has been added to your collection.",
        plant.name
    )));

    if photos.is_empty() {
        result.affected_plants.push(plant);
        return Ok(result);
    }

    let report = ingestor.ingest_into(store, plant.id, photos).await?;
    report_ingest(&report, &mut result);
    result.affected_plants.push(report.plant.unwrap_or(plant));
    Ok(result)
}
