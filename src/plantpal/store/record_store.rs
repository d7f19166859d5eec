use super::backend::SnapshotBackend;
use super::seed;
use crate::error::{PlantError, Result};
use crate::model::{NewPlant, Photo, Plant, PlantId, PlantPatch};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Key the whole collection is stored under.
pub const SNAPSHOT_KEY: &str = "plantData";

/// Where the in-memory collection came from when the store was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Snapshot,
    Seed,
}

pub struct RecordStore<B: SnapshotBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    plants: BTreeMap<PlantId, Plant>,
    origin: Origin,
}

impl<B: SnapshotBackend> RecordStore<B> {
    /// Hydrate from the backend's snapshot, or from the seed collection if
    /// there is none or it cannot be read.
    pub fn open(backend: B) -> Self {
        let (plants, origin) = match Self::load(&backend) {
            Some(plants) => (plants, Origin::Snapshot),
            None => (seed::plants(), Origin::Seed),
        };
        debug!(count = plants.len(), ?origin, "record store hydrated");
        Self {
            backend,
            plants,
            origin,
        }
    }

    fn load(backend: &B) -> Option<BTreeMap<PlantId, Plant>> {
        let raw = match backend.read(SNAPSHOT_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "could not read plant snapshot, using seed data");
                return None;
            }
        };
        let plants = match serde_json::from_str::<BTreeMap<PlantId, Plant>>(&raw) {
            Ok(plants) => plants,
            Err(e) => {
                warn!(error = %e, "plant snapshot is corrupt, using seed data");
                return None;
            }
        };
        // Keys must agree with ids or lookups and id allocation break
        if let Some((key, plant)) = plants.iter().find(|(key, plant)| **key != plant.id) {
            warn!(
                key,
                id = plant.id,
                "plant snapshot key does not match plant id, using seed data"
            );
            return None;
        }
        Some(plants)
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn location(&self) -> PathBuf {
        self.backend.location(SNAPSHOT_KEY)
    }

    pub fn get(&self, id: PlantId) -> Option<&Plant> {
        self.plants.get(&id)
    }

    /// Every plant. Callers that need a stable order must sort.
    pub fn get_all(&self) -> Vec<&Plant> {
        self.plants.values().collect()
    }

    pub fn len(&self) -> usize {
        self.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }

    /// Shallow-merge `patch` into plant `id` and persist.
    ///
    /// Unknown ids are a no-op: `Ok(None)`, nothing is written. Replacing
    /// `photos` pulls the thumbnail index back into range. An explicit
    /// `thumbnail_index` is checked against the merged photos and rejected
    /// with `ThumbnailOutOfRange` when it points past them.
    pub fn update(&mut self, id: PlantId, patch: PlantPatch) -> Result<Option<Plant>> {
        self.mutate(id, |plant| {
            let explicit_thumbnail = patch.thumbnail_index;
            let photos_replaced = plant.apply(patch);
            match explicit_thumbnail {
                Some(index) => check_thumbnail(index, plant.photos.len()),
                None => {
                    if photos_replaced {
                        plant.clamp_thumbnail();
                    }
                    Ok(())
                }
            }
        })
    }

    /// Point the cover photo at `index`. Out-of-range indexes are rejected.
    pub fn update_thumbnail_index(&mut self, id: PlantId, index: usize) -> Result<Option<Plant>> {
        self.mutate(id, |plant| {
            check_thumbnail(index, plant.photos.len())?;
            plant.thumbnail_index = index;
            Ok(())
        })
    }

    /// Replace the whole photo list. The thumbnail index is clamped so it
    /// still points at a photo.
    pub fn update_photos(&mut self, id: PlantId, photos: Vec<Photo>) -> Result<Option<Plant>> {
        self.mutate(id, |plant| {
            plant.photos = photos;
            plant.clamp_thumbnail();
            Ok(())
        })
    }

    pub fn append_photo(&mut self, id: PlantId, photo: Photo) -> Result<Option<Plant>> {
        self.mutate(id, |plant| {
            plant.photos.push(photo);
            Ok(())
        })
    }

    /// Remove one photo, keeping the thumbnail on the same picture when it
    /// survives and falling back to the first photo when it does not.
    pub fn remove_photo(&mut self, id: PlantId, index: usize) -> Result<Option<Plant>> {
        self.mutate(id, |plant| {
            let len = plant.photos.len();
            if index >= len {
                return Err(PlantError::PhotoOutOfRange { index, len });
            }
            plant.photos.remove(index);
            if index == plant.thumbnail_index {
                plant.thumbnail_index = 0;
            } else if index < plant.thumbnail_index {
                plant.thumbnail_index -= 1;
            }
            plant.clamp_thumbnail();
            Ok(())
        })
    }

    /// Insert a new plant under the next free id and persist.
    ///
    /// On a failed write the plant stays in memory and the error is returned.
    pub fn create(&mut self, new: NewPlant) -> Result<Plant> {
        let id = self.next_id()?;
        let plant = Plant::from_new(id, new);
        self.plants.insert(id, plant.clone());
        debug!(id, name = %plant.name, "plant created");
        self.persist()?;
        Ok(plant)
    }

    fn next_id(&self) -> Result<PlantId> {
        match self.plants.keys().next_back() {
            None => Ok(1),
            Some(max) => max
                .checked_add(1)
                .ok_or_else(|| PlantError::Store("Plant ids exhausted".to_string())),
        }
    }

    /// Back to the seed collection; the snapshot is deleted.
    pub fn reset(&mut self) -> Result<()> {
        self.plants = seed::plants();
        self.origin = Origin::Seed;
        if let Err(e) = self.backend.remove(SNAPSHOT_KEY) {
            warn!(error = %e, "could not delete plant snapshot");
            return Err(PlantError::Persistence(e.to_string()));
        }
        debug!("record store reset to seed data");
        Ok(())
    }

    /// The serialized form of the whole collection, as written to the backend.
    pub fn snapshot_json(&self) -> Result<String> {
        serde_json::to_string(&self.plants).map_err(PlantError::Serialization)
    }

    fn persist(&self) -> Result<()> {
        let json = self.snapshot_json()?;
        if let Err(e) = self.backend.write(SNAPSHOT_KEY, &json) {
            warn!(error = %e, "could not save plant snapshot, changes are in memory only");
            return Err(PlantError::Persistence(e.to_string()));
        }
        debug!(bytes = json.len(), "plant snapshot saved");
        Ok(())
    }

    /// Apply `f` to plant `id` and persist. An error from `f` leaves the
    /// plant untouched and skips the write.
    fn mutate<F>(&mut self, id: PlantId, f: F) -> Result<Option<Plant>>
    where
        F: FnOnce(&mut Plant) -> Result<()>,
    {
        let Some(plant) = self.plants.get_mut(&id) else {
            debug!(id, "update for unknown plant ignored");
            return Ok(None);
        };
        let mut draft = plant.clone();
        f(&mut draft)?;
        *plant = draft.clone();
        self.persist()?;
        Ok(Some(draft))
    }
}

/// With no photos only index 0 is allowed.
fn check_thumbnail(index: usize, len: usize) -> Result<()> {
    let valid = if len == 0 { index == 0 } else { index < len };
    if valid {
        Ok(())
    } else {
        Err(PlantError::ThumbnailOutOfRange { index, len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    fn store() -> RecordStore<MemBackend> {
        RecordStore::open(MemBackend::new())
    }

    fn photo(n: usize) -> Photo {
        Photo::new(format!("/p/{}.jpg", n), "2024-05-01")
    }

    #[test]
    fn opens_with_seed_when_no_snapshot() {
        let store = store();
        assert_eq!(store.origin(), Origin::Seed);
        assert_eq!(store.len(), 6);
        assert_eq!(store.backend().write_count(), 0);
    }

    #[test]
    fn opens_from_snapshot() {
        let backend = MemBackend::new();
        backend.insert_raw(SNAPSHOT_KEY, r#"{"42": {"id": 42, "name": "Aloe"}}"#);
        let store = RecordStore::open(backend);
        assert_eq!(store.origin(), Origin::Snapshot);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(42).unwrap().name, "Aloe");
    }

    #[test]
    fn corrupt_snapshot_falls_back_to_seed() {
        let backend = MemBackend::new();
        backend.insert_raw(SNAPSHOT_KEY, "{not json");
        let store = RecordStore::open(backend);
        assert_eq!(store.origin(), Origin::Seed);
        assert_eq!(store.len(), 6);
    }

    #[test]
    fn snapshot_with_mismatched_ids_falls_back_to_seed() {
        let backend = MemBackend::new();
        backend.insert_raw(SNAPSHOT_KEY, r#"{"1": {"id": 2, "name": "Aloe"}}"#);
        let mut store = RecordStore::open(backend);
        assert_eq!(store.origin(), Origin::Seed);
        assert_eq!(store.len(), 6);

        let created = store.create(NewPlant::named("Basil")).unwrap();
        assert_eq!(created.id, 7);
        let ids: Vec<PlantId> = store.get_all().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn unreadable_storage_falls_back_to_seed() {
        let backend = MemBackend::new();
        backend.set_simulate_read_error(true);
        let store = RecordStore::open(backend);
        assert_eq!(store.origin(), Origin::Seed);
    }

    #[test]
    fn get_missing_is_none() {
        assert!(store().get(999).is_none());
    }

    #[test]
    fn update_merges_single_field() {
        let mut store = store();
        let before = store.get(3).unwrap().clone();

        let updated = store
            .update(3, PlantPatch::default().notes("Repotted"))
            .unwrap()
            .unwrap();

        assert_eq!(updated.notes, "Repotted");
        let after = store.get(3).unwrap();
        assert_eq!(after.notes, "Repotted");
        assert_eq!(after.name, before.name);
        assert_eq!(after.price, before.price);
        assert_eq!(after.photos, before.photos);
        assert_eq!(after.thumbnail_index, before.thumbnail_index);
    }

    #[test]
    fn update_persists_snapshot() {
        let mut store = store();
        store.update(1, PlantPatch::default().name("Swiss Cheese")).unwrap();

        let raw = store.backend().raw(SNAPSHOT_KEY).unwrap();
        let saved: BTreeMap<PlantId, Plant> = serde_json::from_str(&raw).unwrap();
        assert_eq!(saved[&1].name, "Swiss Cheese");
        assert_eq!(saved.len(), 6);
    }

    #[test]
    fn update_unknown_id_is_noop() {
        let mut store = store();
        let before: Vec<Plant> = store.get_all().into_iter().cloned().collect();

        let result = store.update(77, PlantPatch::default().name("Ghost")).unwrap();

        assert!(result.is_none());
        let after: Vec<Plant> = store.get_all().into_iter().cloned().collect();
        assert_eq!(before, after);
        assert_eq!(store.backend().write_count(), 0);
    }

    #[test]
    fn empty_update_keeps_snapshot_content() {
        let mut store = store();
        store.update(2, PlantPatch::default().notes("x")).unwrap();
        let first = store.backend().raw(SNAPSHOT_KEY).unwrap();

        store.update(2, PlantPatch::default()).unwrap();
        let second = store.backend().raw(SNAPSHOT_KEY).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn snapshot_round_trip_is_lossless() {
        let mut store = store();
        store.append_photo(4, photo(1)).unwrap();
        store.update_thumbnail_index(4, 6).unwrap();

        let json = store.snapshot_json().unwrap();
        let reopened = RecordStore::open({
            let backend = MemBackend::new();
            backend.insert_raw(SNAPSHOT_KEY, &json);
            backend
        });

        let original: Vec<&Plant> = store.get_all();
        let restored: Vec<&Plant> = reopened.get_all();
        assert_eq!(original, restored);
        assert_eq!(reopened.get(4).unwrap().photos[6], photo(1));
    }

    #[test]
    fn write_failure_keeps_memory_and_reports() {
        let mut store = store();
        store.backend().set_simulate_write_error(true);

        let err = store
            .update(5, PlantPatch::default().name("Lily"))
            .unwrap_err();

        assert!(matches!(err, PlantError::Persistence(_)));
        assert_eq!(store.get(5).unwrap().name, "Lily");
    }

    #[test]
    fn thumbnail_index_is_validated() {
        let mut store = store();
        let updated = store.update_thumbnail_index(1, 5).unwrap().unwrap();
        assert_eq!(updated.thumbnail_index, 5);

        let err = store.update_thumbnail_index(1, 6).unwrap_err();
        assert!(matches!(
            err,
            PlantError::ThumbnailOutOfRange { index: 6, len: 6 }
        ));
        assert_eq!(store.get(1).unwrap().thumbnail_index, 5);
    }

    #[test]
    fn thumbnail_index_on_unknown_plant_is_noop() {
        let mut store = store();
        assert!(store.update_thumbnail_index(99, 0).unwrap().is_none());
    }

    #[test]
    fn shrinking_photos_clamps_thumbnail() {
        let mut store = store();
        store.update_thumbnail_index(2, 5).unwrap();

        let updated = store
            .update_photos(2, vec![photo(0), photo(1)])
            .unwrap()
            .unwrap();

        assert_eq!(updated.thumbnail_index, 1);
        assert!(updated.thumbnail().is_some());
    }

    #[test]
    fn clearing_photos_resets_thumbnail() {
        let mut store = store();
        store.update_thumbnail_index(2, 3).unwrap();
        let updated = store.update_photos(2, Vec::new()).unwrap().unwrap();
        assert_eq!(updated.thumbnail_index, 0);
        assert!(updated.thumbnail().is_none());
    }

    #[test]
    fn patch_with_out_of_range_thumbnail_is_rejected() {
        let mut store = store();
        let patch = PlantPatch {
            thumbnail_index: Some(99),
            notes: Some("moved".into()),
            ..PlantPatch::default()
        };

        let err = store.update(1, patch).unwrap_err();

        assert!(matches!(
            err,
            PlantError::ThumbnailOutOfRange { index: 99, len: 6 }
        ));
        let plant = store.get(1).unwrap();
        assert_eq!(plant.thumbnail_index, 0);
        assert_eq!(plant.notes, seed::plants()[&1].notes);
        assert_eq!(store.backend().write_count(), 0);
    }

    #[test]
    fn patch_thumbnail_is_checked_against_new_photos() {
        let mut store = store();
        let patch = PlantPatch {
            photos: Some(vec![photo(1), photo(2)]),
            thumbnail_index: Some(1),
            ..PlantPatch::default()
        };
        let updated = store.update(5, patch).unwrap().unwrap();
        assert_eq!(updated.thumbnail_index, 1);
        assert_eq!(updated.thumbnail(), Some(&photo(2)));
    }

    #[test]
    fn patch_with_photos_clamps_thumbnail() {
        let mut store = store();
        store.update_thumbnail_index(6, 4).unwrap();
        let updated = store
            .update(6, PlantPatch::default().photos(vec![photo(9)]))
            .unwrap()
            .unwrap();
        assert_eq!(updated.thumbnail_index, 0);
    }

    #[test]
    fn removing_thumbnailed_photo_keeps_invariant() {
        let mut store = store();
        store.update_thumbnail_index(3, 5).unwrap();

        let updated = store.remove_photo(3, 5).unwrap().unwrap();

        assert_eq!(updated.photos.len(), 5);
        assert_eq!(updated.thumbnail_index, 0);
        assert!(updated.thumbnail_index < updated.photos.len());
    }

    #[test]
    fn removing_earlier_photo_follows_thumbnail() {
        let mut store = store();
        store.update_thumbnail_index(3, 4).unwrap();
        let cover = store.get(3).unwrap().thumbnail().unwrap().clone();

        let updated = store.remove_photo(3, 1).unwrap().unwrap();

        assert_eq!(updated.thumbnail_index, 3);
        assert_eq!(updated.thumbnail().unwrap(), &cover);
    }

    #[test]
    fn removing_later_photo_keeps_thumbnail() {
        let mut store = store();
        store.update_thumbnail_index(3, 1).unwrap();
        let updated = store.remove_photo(3, 4).unwrap().unwrap();
        assert_eq!(updated.thumbnail_index, 1);
    }

    #[test]
    fn remove_photo_out_of_range() {
        let mut store = store();
        let err = store.remove_photo(3, 6).unwrap_err();
        assert!(matches!(err, PlantError::PhotoOutOfRange { index: 6, len: 6 }));
        assert_eq!(store.get(3).unwrap().photos.len(), 6);
    }

    #[test]
    fn photo_removal_sequences_never_break_invariant() {
        let mut store = store();
        for (thumb, remove) in [(5, 5), (2, 0), (0, 0), (1, 2), (0, 1)] {
            let len = store.get(1).unwrap().photos.len();
            store.update_thumbnail_index(1, thumb.min(len - 1)).unwrap();
            let plant = store.remove_photo(1, remove.min(len - 1)).unwrap().unwrap();
            if !plant.photos.is_empty() {
                assert!(plant.thumbnail_index < plant.photos.len());
            }
        }
    }

    #[test]
    fn append_photo_goes_last() {
        let mut store = store();
        let updated = store.append_photo(1, photo(42)).unwrap().unwrap();
        assert_eq!(updated.photos.len(), 7);
        assert_eq!(updated.photos.last().unwrap(), &photo(42));
        assert_eq!(updated.thumbnail_index, 0);
    }

    #[test]
    fn create_allocates_next_id() {
        let mut store = store();
        let created = store.create(NewPlant::named("String of Pearls")).unwrap();
        assert_eq!(created.id, 7);
        assert!(created.photos.is_empty());
        assert_eq!(store.get(7).unwrap().name, "String of Pearls");

        let raw = store.backend().raw(SNAPSHOT_KEY).unwrap();
        assert!(raw.contains("String of Pearls"));
    }

    #[test]
    fn create_in_empty_store_starts_at_one() {
        let backend = MemBackend::new();
        backend.insert_raw(SNAPSHOT_KEY, "{}");
        let mut store = RecordStore::open(backend);
        assert!(store.is_empty());
        assert_eq!(store.create(NewPlant::named("Basil")).unwrap().id, 1);
    }

    #[test]
    fn reset_restores_seed_and_removes_snapshot() {
        let mut store = store();
        store.update(1, PlantPatch::default().name("Changed")).unwrap();
        store.create(NewPlant::named("Extra")).unwrap();
        assert!(store.backend().raw(SNAPSHOT_KEY).is_some());

        store.reset().unwrap();

        let all: BTreeMap<PlantId, Plant> = store
            .get_all()
            .into_iter()
            .map(|p| (p.id, p.clone()))
            .collect();
        assert_eq!(all, seed::plants());
        assert!(store.backend().raw(SNAPSHOT_KEY).is_none());
        assert_eq!(store.origin(), Origin::Seed);
    }
}
