//! # Plate Records
//!
//! - `Plate`: a record as held by the repository, `id` assigned server side
//! - `PlateDraft`: the four fields a form edits
//! - `NewPlate`: create payload, a draft plus the availability flag
//!
//! `price` stays text end to end, the repository decides how to read it.
use serde::{Deserialize, Serialize};

pub const FOODS_PATH: &str = "foods";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plate {
    pub id: u64,
    pub name: String,
    pub image: String,
    pub price: String,
    pub description: String,
    // a full-record PUT on some backends drops the flag
    #[serde(default)]
    pub available: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlateDraft {
    pub name: String,
    pub image: String,
    pub price: String,
    pub description: String,
}

impl From<&Plate> for PlateDraft {
    fn from(plate: &Plate) -> Self {
        Self {
            name: plate.name.clone(),
            image: plate.image.clone(),
            price: plate.price.clone(),
            description: plate.description.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPlate {
    #[serde(flatten)]
    pub draft: PlateDraft,
    #[serde(default)]
    pub available: bool,
}

impl NewPlate {
    /// New plates always go on the menu as available.
    pub fn available(draft: PlateDraft) -> Self {
        Self {
            draft,
            available: true,
        }
    }
}
