//! Bundled starter collection, used when no snapshot exists and on reset.

use crate::model::{Photo, Plant, PlantId};
use std::collections::BTreeMap;

struct SeedPlant {
    id: PlantId,
    name: &'static str,
    scientific_name: &'static str,
    price: &'static str,
    where_bought: &'static str,
    date_acquired: &'static str,
    notes: &'static str,
    asset: &'static str,
    photo_dates: [&'static str; 6],
}

const SEED: [SeedPlant; 6] = [
    SeedPlant {
        id: 1,
        name: "Monstera Deliciosa",
        scientific_name: "Monstera deliciosa",
        price: "$45.00",
        where_bought: "Green Thumb Nursery",
        date_acquired: "2024-01-15",
        notes: "Beautiful specimen with fenestrated leaves. Growing well in bright indirect light.",
        asset: "monstera",
        photo_dates: [
            "2024-01-15",
            "2024-02-20",
            "2024-03-10",
            "2024-04-05",
            "2024-05-15",
            "2024-06-22",
        ],
    },
    SeedPlant {
        id: 2,
        name: "Snake Plant",
        scientific_name: "Sansevieria trifasciata",
        price: "$25.00",
        where_bought: "Home Depot",
        date_acquired: "2024-02-10",
        notes: "Low maintenance plant perfect for beginners. Tolerates low light conditions.",
        asset: "snake-plant",
        photo_dates: [
            "2024-02-10",
            "2024-03-15",
            "2024-04-20",
            "2024-05-25",
            "2024-06-30",
            "2024-07-14",
        ],
    },
    SeedPlant {
        id: 3,
        name: "Pothos",
        scientific_name: "Epipremnum aureum",
        price: "$18.00",
        where_bought: "Local Plant Shop",
        date_acquired: "2024-01-28",
        notes: "Fast-growing trailing plant. Great for hanging baskets or shelves.",
        asset: "pothos",
        photo_dates: [
            "2024-01-28",
            "2024-02-28",
            "2024-03-28",
            "2024-04-28",
            "2024-05-28",
            "2024-06-28",
        ],
    },
    SeedPlant {
        id: 4,
        name: "Fiddle Leaf Fig",
        scientific_name: "Ficus lyrata",
        price: "$65.00",
        where_bought: "Botanical Garden Shop",
        date_acquired: "2024-03-05",
        notes: "Statement plant with large glossy leaves. Requires bright indirect light.",
        asset: "fiddle-leaf",
        photo_dates: [
            "2024-03-05",
            "2024-04-05",
            "2024-05-05",
            "2024-06-05",
            "2024-07-05",
            "2024-08-05",
        ],
    },
    SeedPlant {
        id: 5,
        name: "Peace Lily",
        scientific_name: "Spathiphyllum wallisii",
        price: "$32.00",
        where_bought: "Green Thumb Nursery",
        date_acquired: "2024-02-22",
        notes: "Elegant flowering plant that indicates when it needs water by drooping.",
        asset: "peace-lily",
        photo_dates: [
            "2024-02-22",
            "2024-03-22",
            "2024-04-22",
            "2024-05-22",
            "2024-06-22",
            "2024-07-22",
        ],
    },
    SeedPlant {
        id: 6,
        name: "Rubber Plant",
        scientific_name: "Ficus elastica",
        price: "$38.00",
        where_bought: "Plant Paradise",
        date_acquired: "2024-01-08",
        notes: "Classic houseplant with glossy burgundy leaves. Very resilient and forgiving.",
        asset: "rubber-plant",
        photo_dates: [
            "2024-01-08",
            "2024-02-08",
            "2024-03-08",
            "2024-04-08",
            "2024-05-08",
            "2024-06-08",
        ],
    },
];

/// Path of the n-th (0-based) bundled photo for an asset stem.
/// The first photo has no numeric suffix: `monstera.jpg`, `monstera-2.jpg`, ...
fn asset_url(stem: &str, n: usize) -> String {
    if n == 0 {
        format!("/assets/plants/{}.jpg", stem)
    } else {
        format!("/assets/plants/{}-{}.jpg", stem, n + 1)
    }
}

impl SeedPlant {
    fn to_plant(&self) -> Plant {
        Plant {
            id: self.id,
            name: self.name.to_string(),
            scientific_name: self.scientific_name.to_string(),
            price: self.price.to_string(),
            where_bought: self.where_bought.to_string(),
            date_acquired: self.date_acquired.to_string(),
            notes: self.notes.to_string(),
            photos: self
                .photo_dates
                .iter()
                .enumerate()
                .map(|(n, date)| Photo::new(asset_url(self.asset, n), *date))
                .collect(),
            thumbnail_index: 0,
        }
    }
}

/// A fresh copy of the seed collection.
pub fn plants() -> BTreeMap<PlantId, Plant> {
    SEED.iter().map(|s| (s.id, s.to_plant())).collect()
}
