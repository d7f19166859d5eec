use super::backend::SnapshotBackend;
use crate::error::{PlantError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use uuid::Uuid;

/// Stores each key as `<key>.json` inside a data directory.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(PlantError::Io)?;
        }
        Ok(())
    }

    fn validate_key(key: &str) -> Result<()> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(PlantError::Store(format!("Invalid storage key: {:?}", key)));
        }
        Ok(())
    }
}

impl SnapshotBackend for FsBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Self::validate_key(key)?;
        let path = self.location(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PlantError::Io(e)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        Self::validate_key(key)?;
        self.ensure_dir()?;

        let target = self.location(key);

        // Atomic write
        let tmp = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp, value).map_err(PlantError::Io)?;
        if let Err(e) = fs::rename(&tmp, &target) {
            let _ = fs::remove_file(&tmp);
            return Err(PlantError::Io(e));
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        Self::validate_key(key)?;
        match fs::remove_file(self.location(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PlantError::Io(e)),
        }
    }

    fn location(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}
