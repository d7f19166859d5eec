//! # Storage Layer
//!
//! The [`RecordStore`] is the authoritative view of the collection: a map of
//! plant id to [`Plant`](crate::model::Plant), held in memory and mirrored to
//! a single snapshot after every mutation.
//!
//! ## Hydration
//!
//! The store is opened exactly once by the composition root (the API facade):
//!
//! 1. **Snapshot present and valid**: it becomes the collection.
//! 2. **Snapshot absent**: the bundled [`seed`] collection is used.
//! 3. **Snapshot unreadable or corrupt**: logged, then seed data.
//!
//! ## Persistence
//!
//! Every mutating call re-serializes the whole map and writes it under
//! [`SNAPSHOT_KEY`]. There are no transactions: a failed write leaves the
//! in-memory change in place and is returned as
//! [`PlantError::Persistence`](crate::error::PlantError::Persistence) so the
//! caller can warn the user. Concurrent writers are not supported; the last
//! write wins.
//!
//! ## Thumbnails
//!
//! Photo mutations keep `thumbnail_index` pointing at a photo whenever the
//! list is non-empty. Explicit thumbnail changes are validated.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one JSON file per key in the data directory.
//! - [`mem_backend::MemBackend`]: for testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── plantData.json      # Snapshot: {"<id>": Plant, ...}
//! └── config.json         # Compression and listing settings
//! ```

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod record_store;
pub mod seed;

pub use backend::SnapshotBackend;
pub use record_store::{Origin, RecordStore, SNAPSHOT_KEY};
