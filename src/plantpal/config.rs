use crate::commands::list::SortKey;
use crate::error::{PlantError, Result};
use crate::ingest::compress::{
    CompressionOptions, DEFAULT_MAX_DIMENSION, DEFAULT_MAX_SIZE_BYTES, DEFAULT_QUALITY,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for plantpal, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlantConfig {
    /// Largest size a re-encoded photo should have, in KiB
    #[serde(default = "default_max_size_kb")]
    pub max_size_kb: u32,

    /// Largest width or height a re-encoded photo should have, in pixels
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,

    /// JPEG quality (1-100)
    #[serde(default = "default_quality")]
    pub quality: u8,

    /// Order used by `list` when none is given
    #[serde(default)]
    pub default_sort: SortKey,
}

fn default_max_size_kb() -> u32 {
    (DEFAULT_MAX_SIZE_BYTES / 1024) as u32
}

fn default_max_dimension() -> u32 {
    DEFAULT_MAX_DIMENSION
}

fn default_quality() -> u8 {
    DEFAULT_QUALITY
}

impl Default for PlantConfig {
    fn default() -> Self {
        Self {
            max_size_kb: default_max_size_kb(),
            max_dimension: default_max_dimension(),
            quality: default_quality(),
            default_sort: SortKey::default(),
        }
    }
}

impl PlantConfig {
    pub const KEYS: [&'static str; 4] = ["max-size-kb", "max-dimension", "quality", "default-sort"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(PlantError::Io)?;
        let config: PlantConfig =
            serde_json::from_str(&content).map_err(PlantError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(PlantError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(PlantError::Serialization)?;
        fs::write(config_path, content).map_err(PlantError::Io)?;
        Ok(())
    }

    pub fn compression_options(&self) -> CompressionOptions {
        CompressionOptions {
            max_size_bytes: self.max_size_kb as usize * 1024,
            max_dimension: self.max_dimension,
            quality: self.quality.clamp(1, 100),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "max-size-kb" => Some(self.max_size_kb.to_string()),
            "max-dimension" => Some(self.max_dimension.to_string()),
            "quality" => Some(self.quality.to_string()),
            "default-sort" => Some(self.default_sort.to_string()),
            _ => None,
        }
    }

    /// Set a key from its string form, validating the value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = |what: &str| PlantError::Validation(format!("Invalid {}: {}", what, value));
        match key {
            "max-size-kb" => {
                let kb: u32 = value.parse().map_err(|_| invalid(key))?;
                if kb == 0 {
                    return Err(invalid(key));
                }
                self.max_size_kb = kb;
            }
            "max-dimension" => {
                let px: u32 = value.parse().map_err(|_| invalid(key))?;
                if px == 0 {
                    return Err(invalid(key));
                }
                self.max_dimension = px;
            }
            "quality" => {
                let q: u8 = value.parse().map_err(|_| invalid(key))?;
                if !(1..=100).contains(&q) {
                    return Err(invalid(key));
                }
                self.quality = q;
            }
            "default-sort" => {
                self.default_sort = value.parse()?;
            }
            other => {
                return Err(PlantError::Validation(format!(
                    "Unknown config key: {}",
                    other
                )))
            }
        }
        Ok(())
    }
}
