//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for all plantpal operations, regardless of the UI being used.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (e.g., converting 1-based photo numbers to indexes)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **I/O for presentation**: No stdout, stderr, or formatting
//!
//! ## Generic Over SnapshotBackend
//!
//! `PlantApi<B: SnapshotBackend>` is generic over where the snapshot lives:
//! - Production: `PlantApi<FsBackend>`
//! - Testing: `PlantApi<MemBackend>`

use crate::commands;
use crate::config::PlantConfig;
use crate::error::{PlantError, Result};
use crate::ingest::{ImageSource, Ingestor};
use crate::model::{NewPlant, PlantId, PlantPatch};
use crate::store::{RecordStore, SnapshotBackend};
use std::path::{Path, PathBuf};
use tracing::warn;

/// The main API facade for plantpal operations.
pub struct PlantApi<B: SnapshotBackend> {
    store: RecordStore<B>,
    ingestor: Ingestor,
    config: PlantConfig,
    config_dir: PathBuf,
}

impl<B: SnapshotBackend> PlantApi<B> {
    pub fn new(store: RecordStore<B>, config: PlantConfig, config_dir: PathBuf) -> Self {
        Self {
            store,
            ingestor: Ingestor::new(config.compression_options()),
            config,
            config_dir,
        }
    }

    /// Hydrate a store from `backend` and size photos per the config in
    /// `config_dir`. An unreadable config is logged and replaced by defaults.
    pub fn open(backend: B, config_dir: PathBuf) -> Self {
        let config = PlantConfig::load(&config_dir).unwrap_or_else(|e| {
            warn!(error = %e, "could not load config, using defaults");
            PlantConfig::default()
        });
        Self::new(RecordStore::open(backend), config, config_dir)
    }

    pub fn store(&self) -> &RecordStore<B> {
        &self.store
    }

    /// Without an explicit `sort` the configured default order is used.
    pub fn list_plants(
        &self,
        query: Option<&str>,
        sort: Option<commands::list::SortKey>,
    ) -> Result<commands::CmdResult> {
        let sort = sort.unwrap_or(self.config.default_sort);
        commands::list::run(&self.store, query, sort)
    }

    pub fn view_plant(&self, id: PlantId) -> Result<commands::CmdResult> {
        commands::view::run(&self.store, id)
    }

    pub async fn create_plant(
        &mut self,
        new: NewPlant,
        photos: Vec<ImageSource>,
    ) -> Result<commands::CmdResult> {
        commands::create::run(&mut self.store, &self.ingestor, new, photos).await
    }

    pub fn edit_plant(&mut self, id: PlantId, patch: PlantPatch) -> Result<commands::CmdResult> {
        commands::edit::run(&mut self.store, id, patch)
    }

    pub async fn add_photos(
        &mut self,
        id: PlantId,
        sources: Vec<ImageSource>,
    ) -> Result<commands::CmdResult> {
        commands::photos::add(&mut self.store, &self.ingestor, id, sources).await
    }

    /// `photo` is the 1-based number shown to users.
    pub fn remove_photo(&mut self, id: PlantId, photo: usize) -> Result<commands::CmdResult> {
        let index = photo_index(photo)?;
        commands::photos::remove(&mut self.store, id, index)
    }

    pub fn set_thumbnail(&mut self, id: PlantId, photo: usize) -> Result<commands::CmdResult> {
        let index = photo_index(photo)?;
        commands::photos::thumbnail(&mut self.store, id, index)
    }

    pub fn save_photo(
        &self,
        id: PlantId,
        photo: usize,
        dest: &Path,
    ) -> Result<commands::CmdResult> {
        let index = photo_index(photo)?;
        commands::photos::save(&self.store, id, index, dest)
    }

    pub fn reset(&mut self) -> Result<commands::CmdResult> {
        commands::reset::run(&mut self.store)
    }

    pub fn export(&self) -> Result<commands::CmdResult> {
        commands::export::run(&self.store)
    }

    pub fn config(&mut self, action: ConfigAction) -> Result<commands::CmdResult> {
        let result = commands::config::run(&self.config_dir, action)?;
        if let Some(config) = &result.config {
            if config != &self.config {
                self.ingestor = Ingestor::new(config.compression_options());
                self.config = config.clone();
            }
        }
        Ok(result)
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.store.location()
    }
}

fn photo_index(photo: usize) -> Result<usize> {
    photo
        .checked_sub(1)
        .ok_or_else(|| PlantError::Validation("Photo numbers start at 1".to_string()))
}

pub use crate::commands::config::ConfigAction;
pub use commands::list::SortKey;
pub use commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use tempfile::tempdir;

    fn api(dir: &Path) -> PlantApi<MemBackend> {
        PlantApi::open(MemBackend::new(), dir.to_path_buf())
    }

    #[test]
    fn photo_numbers_are_one_based() {
        let dir = tempdir().unwrap();
        let mut api = api(dir.path());

        let result = api.set_thumbnail(1, 6).unwrap();
        assert_eq!(result.affected_plants[0].thumbnail_index, 5);

        let err = api.set_thumbnail(1, 0).unwrap_err();
        assert!(matches!(err, PlantError::Validation(_)));
    }

    #[test]
    fn remove_photo_translates_number() {
        let dir = tempdir().unwrap();
        let mut api = api(dir.path());
        let last = api.store().get(2).unwrap().photos[5].clone();

        let result = api.remove_photo(2, 6).unwrap();

        assert_eq!(result.affected_plants[0].photos.len(), 5);
        assert!(!result.affected_plants[0].photos.contains(&last));
    }

    #[test]
    fn open_uses_configured_compression() {
        let dir = tempdir().unwrap();
        let mut config = PlantConfig::default();
        config.set("max-dimension", "640").unwrap();
        config.save(dir.path()).unwrap();

        let api = api(dir.path());
        assert_eq!(api.ingestor.options().max_dimension, 640);
    }

    #[test]
    fn unreadable_config_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("config.json"), "{ not json").unwrap();

        let api = api(dir.path());

        assert_eq!(api.config, PlantConfig::default());
        assert_eq!(api.ingestor.options().max_dimension, 1024);
    }

    #[test]
    fn list_uses_configured_sort_by_default() {
        let dir = tempdir().unwrap();
        let mut api = api(dir.path());
        api.config(ConfigAction::Set("default-sort".into(), "added".into()))
            .unwrap();

        let result = api.list_plants(None, None).unwrap();
        assert_eq!(result.listed_plants[0].id, 6);

        let result = api.list_plants(None, Some(SortKey::Name)).unwrap();
        assert_eq!(result.listed_plants[0].name, "Fiddle Leaf Fig");
    }

    #[test]
    fn config_change_resizes_future_photos() {
        let dir = tempdir().unwrap();
        let mut api = api(dir.path());
        api.config(ConfigAction::Set("max-dimension".into(), "512".into()))
            .unwrap();
        assert_eq!(api.ingestor.options().max_dimension, 512);
    }

    #[test]
    fn snapshot_path_comes_from_backend() {
        let dir = tempdir().unwrap();
        assert_eq!(api(dir.path()).snapshot_path(), PathBuf::from("memory://plantData"));
    }
}
