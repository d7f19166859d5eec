use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type PlantId = u32;

/// Shown wherever a plant has no usable cover photo.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    /// A bundled asset path or an inline `data:` URL.
    pub url: String,
    pub date_taken: String,
}

impl Photo {
    pub fn new(url: impl Into<String>, date_taken: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            date_taken: date_taken.into(),
        }
    }

    pub fn is_inline(&self) -> bool {
        self.url.starts_with("data:")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: PlantId,
    pub name: String,
    #[serde(default)]
    pub scientific_name: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub where_bought: String,
    #[serde(default)]
    pub date_acquired: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub thumbnail_index: usize,
}

impl Plant {
    pub fn from_new(id: PlantId, new: NewPlant) -> Self {
        Self {
            id,
            name: new.name,
            scientific_name: new.scientific_name,
            price: new.price,
            where_bought: new.where_bought,
            date_acquired: new.date_acquired,
            notes: new.notes,
            photos: Vec::new(),
            thumbnail_index: 0,
        }
    }

    /// The cover photo, if the thumbnail index points at one.
    pub fn thumbnail(&self) -> Option<&Photo> {
        self.photos.get(self.thumbnail_index)
    }

    pub fn thumbnail_url(&self) -> &str {
        self.thumbnail()
            .map(|p| p.url.as_str())
            .unwrap_or(PLACEHOLDER_IMAGE)
    }

    pub fn acquired_on(&self) -> Option<NaiveDate> {
        parse_date(&self.date_acquired)
    }

    /// Pull the thumbnail index back inside `photos`.
    pub(crate) fn clamp_thumbnail(&mut self) {
        if self.photos.is_empty() {
            self.thumbnail_index = 0;
        } else if self.thumbnail_index >= self.photos.len() {
            self.thumbnail_index = self.photos.len() - 1;
        }
    }

    /// Shallow merge. Returns true if `photos` was replaced.
    pub(crate) fn apply(&mut self, patch: PlantPatch) -> bool {
        let PlantPatch {
            name,
            scientific_name,
            price,
            where_bought,
            date_acquired,
            notes,
            photos,
            thumbnail_index,
        } = patch;

        if let Some(v) = name {
            self.name = v;
        }
        if let Some(v) = scientific_name {
            self.scientific_name = v;
        }
        if let Some(v) = price {
            self.price = v;
        }
        if let Some(v) = where_bought {
            self.where_bought = v;
        }
        if let Some(v) = date_acquired {
            self.date_acquired = v;
        }
        if let Some(v) = notes {
            self.notes = v;
        }
        if let Some(v) = thumbnail_index {
            self.thumbnail_index = v;
        }
        let photos_replaced = photos.is_some();
        if let Some(v) = photos {
            self.photos = v;
        }
        photos_replaced
    }
}

/// Field values for a plant that does not exist yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPlant {
    pub name: String,
    pub scientific_name: String,
    pub price: String,
    pub where_bought: String,
    pub date_acquired: String,
    pub notes: String,
}

impl NewPlant {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A partial update. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlantPatch {
    pub name: Option<String>,
    pub scientific_name: Option<String>,
    pub price: Option<String>,
    pub where_bought: Option<String>,
    pub date_acquired: Option<String>,
    pub notes: Option<String>,
    pub photos: Option<Vec<Photo>>,
    pub thumbnail_index: Option<usize>,
}

impl PlantPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn photos(mut self, photos: Vec<Photo>) -> Self {
        self.photos = Some(photos);
        self
    }
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn today() -> String {
    format_date(chrono::Local::now().date_naive())
}
