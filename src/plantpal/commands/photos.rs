use crate::commands::helpers::{require_plant, settle, unsaved_warning};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{PlantError, Result};
use crate::ingest::{data_url, ImageSource, IngestReport, Ingestor};
use crate::model::PlantId;
use crate::store::{RecordStore, SnapshotBackend};
use std::fs;
use std::path::Path;

/// Ingest `sources` and append them to plant `id`.
///
/// Individual images may fail without failing the command; each failure
/// becomes an error message naming the image.
pub async fn add<B: SnapshotBackend>(
    store: &mut RecordStore<B>,
    ingestor: &Ingestor,
    id: PlantId,
    sources: Vec<ImageSource>,
) -> Result<CmdResult> {
    require_plant(store, id)?;
    let mut result = CmdResult::default();
    if sources.is_empty() {
        result.add_message(CmdMessage::info("No photos given."));
        return Ok(result);
    }

    let report = ingestor.ingest_into(store, id, sources).await?;
    report_ingest(&report, &mut result);
    if let Some(plant) = report.plant {
        result.affected_plants.push(plant);
    }
    Ok(result)
}

/// Turn an ingest report into user-facing messages.
pub(crate) fn report_ingest(report: &IngestReport, result: &mut CmdResult) {
    for failure in &report.failures {
        result.add_message(CmdMessage::error(format!(
            "Unable to process image {}, try again",
            failure.label
        )));
    }
    if let Some(reason) = &report.unsaved {
        result.add_message(unsaved_warning(reason));
    }
    let n = report.appended.len();
    if n > 0 {
        result.add_message(CmdMessage::success(format!(
            "Added {} photo{}.",
            n,
            if n == 1 { "" } else { "s" }
        )));
    }
}

pub fn remove<B: SnapshotBackend>(
    store: &mut RecordStore<B>,
    id: PlantId,
    index: usize,
) -> Result<CmdResult> {
    require_plant(store, id)?;
    let mut result = CmdResult::default();
    let outcome = store.remove_photo(id, index);
    let plant = settle(store, id, outcome, &mut result)?;
    result.add_message(CmdMessage::success(format!(
        "Removed photo {} from {}.",
        index + 1,
        plant.name
    )));
    Ok(result.with_affected_plants(vec![plant]))
}

pub fn thumbnail<B: SnapshotBackend>(
    store: &mut RecordStore<B>,
    id: PlantId,
    index: usize,
) -> Result<CmdResult> {
    require_plant(store, id)?;
    let mut result = CmdResult::default();
    let outcome = store.update_thumbnail_index(id, index);
    let plant = settle(store, id, outcome, &mut result)?;
    result.add_message(CmdMessage::success(format!(
        "Photo {} is now the cover of {}.",
        index + 1,
        plant.name
    )));
    Ok(result.with_affected_plants(vec![plant]))
}

/// Write the decoded bytes of an inline photo to `dest`.
pub fn save<B: SnapshotBackend>(
    store: &RecordStore<B>,
    id: PlantId,
    index: usize,
    dest: &Path,
) -> Result<CmdResult> {
    let plant = require_plant(store, id)?;
    let photo = plant
        .photos
        .get(index)
        .ok_or(PlantError::PhotoOutOfRange {
            index,
            len: plant.photos.len(),
        })?;
    if !photo.is_inline() {
        return Err(PlantError::Validation(format!(
            "Photo {} of {} is a bundled asset ({}) and has no inline data",
            index + 1,
            plant.name,
            photo.url
        )));
    }

    let (mime, bytes) = data_url::decode(&photo.url)?;
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(dest, &bytes)?;

    let mut result = CmdResult::default();
    result.paths.push(dest.to_path_buf());
    result.add_message(CmdMessage::success(format!(
        "Saved {} ({}, {} bytes) to {}",
        plant.name,
        mime,
        bytes.len(),
        dest.display()
    )));
    Ok(result)
}
