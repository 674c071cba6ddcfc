//! # Plate Store
//!
//! In-memory stand-in for the `foods` table.
//!
//! ## Behaviour
//!
//! - Insertion order is listing order
//! - Ids are `max(id) + 1`, so ids freed by a delete at the tail get reused
//! - Once a plate holds `u64::MAX` no further inserts are accepted
//! - Updates touch name, image, price and description only, `available` is kept
//! - Can be seeded from a fixture file shaped like `{"foods": [...]}`
use std::{fs::read_to_string, path::Path};

use anyhow::{Context, Result};
use plates::{NewPlate, Plate, PlateDraft};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::error::AppError;

#[derive(Deserialize)]
struct Seed {
    foods: Vec<Plate>,
}

#[derive(Default)]
pub struct PlateStore {
    plates: RwLock<Vec<Plate>>,
}

impl PlateStore {
    pub fn new(plates: Vec<Plate>) -> Self {
        Self {
            plates: RwLock::new(plates),
        }
    }

    pub fn from_seed(path: &Path) -> Result<Self> {
        let raw = read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;
        let seed: Seed = serde_json::from_str(&raw)
            .with_context(|| format!("Malformed seed file {}", path.display()))?;

        Ok(Self::new(seed.foods))
    }

    pub async fn list(&self) -> Vec<Plate> {
        self.plates.read().await.clone()
    }

    pub async fn insert(&self, new_plate: NewPlate) -> Result<Plate, AppError> {
        let mut plates = self.plates.write().await;

        let id = plates
            .iter()
            .map(|plate| plate.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or(AppError::IdsExhausted)?;
        let NewPlate { draft, available } = new_plate;

        let plate = Plate {
            id,
            name: draft.name,
            image: draft.image,
            price: draft.price,
            description: draft.description,
            available,
        };

        plates.push(plate.clone());
        Ok(plate)
    }

    pub async fn update(&self, id: u64, draft: PlateDraft) -> Option<Plate> {
        let mut plates = self.plates.write().await;
        let plate = plates.iter_mut().find(|plate| plate.id == id)?;

        plate.name = draft.name;
        plate.image = draft.image;
        plate.price = draft.price;
        plate.description = draft.description;

        Some(plate.clone())
    }

    pub async fn remove(&self, id: u64) -> Option<Plate> {
        let mut plates = self.plates.write().await;
        let index = plates.iter().position(|plate| plate.id == id)?;

        Some(plates.remove(index))
    }
}
