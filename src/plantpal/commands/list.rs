use crate::commands::{CmdMessage, CmdResult};
use crate::error::{PlantError, Result};
use crate::model::Plant;
use crate::store::{RecordStore, SnapshotBackend};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Orders the collection can be listed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Alphabetical by common name
    #[default]
    Name,
    /// Oldest acquisition first
    Acquired,
    /// Most recently added first
    Added,
    /// Cheapest first
    Price,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Name,
        SortKey::Acquired,
        SortKey::Added,
        SortKey::Price,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Acquired => "acquired",
            SortKey::Added => "added",
            SortKey::Price => "price",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = PlantError;

    fn from_str(s: &str) -> Result<Self> {
        SortKey::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                PlantError::Validation(format!(
                    "Unknown sort key: {} (expected one of: name, acquired, added, price)",
                    s
                ))
            })
    }
}

pub fn run<B: SnapshotBackend>(
    store: &RecordStore<B>,
    query: Option<&str>,
    sort: SortKey,
) -> Result<CmdResult> {
    let query = query.map(str::trim).filter(|q| !q.is_empty());

    let mut plants: Vec<Plant> = store
        .get_all()
        .into_iter()
        .filter(|p| query.map_or(true, |q| matches(p, q)))
        .cloned()
        .collect();
    sort_plants(&mut plants, sort);

    let mut result = CmdResult::default();
    if plants.is_empty() {
        if query.is_some() {
            result.add_message(CmdMessage::info(
                "No plants found. Try a different search term.",
            ));
        } else {
            result.add_message(CmdMessage::info(
                "No plants yet. Start building your plant collection!",
            ));
        }
    } else {
        let n = plants.len();
        result.add_message(CmdMessage::info(format!(
            "{} plant{} found",
            n,
            if n == 1 { "" } else { "s" }
        )));
    }

    Ok(result.with_listed_plants(plants))
}

/// Case-insensitive substring match on common or scientific name.
pub fn matches(plant: &Plant, query: &str) -> bool {
    let query = query.to_lowercase();
    plant.name.to_lowercase().contains(&query)
        || plant.scientific_name.to_lowercase().contains(&query)
}

pub fn sort_plants(plants: &mut [Plant], key: SortKey) {
    match key {
        SortKey::Name => plants.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then(a.id.cmp(&b.id))
        }),
        SortKey::Acquired => plants.sort_by(|a, b| {
            none_last(a.acquired_on(), b.acquired_on(), |x, y| x.cmp(y)).then(a.id.cmp(&b.id))
        }),
        SortKey::Added => plants.sort_by(|a, b| b.id.cmp(&a.id)),
        SortKey::Price => plants.sort_by(|a, b| {
            none_last(price_value(&a.price), price_value(&b.price), |x, y| {
                x.total_cmp(y)
            })
            .then(a.id.cmp(&b.id))
        }),
    }
}

fn none_last<T>(a: Option<T>, b: Option<T>, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => cmp(&x, &y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Numeric value of a free-text price such as "$45.00" or "12 EUR".
pub fn price_value(price: &str) -> Option<f64> {
    let digits: String = price
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse().ok()
}
