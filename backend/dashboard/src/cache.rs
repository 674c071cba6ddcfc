//! # Plate Cache
//!
//! Last known server state of the `foods` collection.
//!
//! The cache is never authoritative. It only changes through:
//! - `replace_all`: a full listing from the repository, marks the cache fresh
//! - `append` / `replace` / `remove`: a mutation the repository confirmed
//! - `invalidate`: a mutation failed and the server state is unknown
//!
//! Order is fetch order, appends go to the end.
use plates::Plate;

#[derive(Debug, Default)]
pub struct PlateCache {
    plates: Vec<Plate>,
    stale: bool,
}

impl PlateCache {
    pub fn replace_all(&mut self, plates: Vec<Plate>) {
        self.plates = plates;
        self.stale = false;
    }

    pub fn append(&mut self, plate: Plate) {
        self.plates.push(plate);
    }

    /// Swaps in `plate` wherever its id matches. Returns whether anything matched.
    pub fn replace(&mut self, plate: Plate) -> bool {
        let mut matched = false;

        for cached in self.plates.iter_mut().filter(|cached| cached.id == plate.id) {
            *cached = plate.clone();
            matched = true;
        }

        matched
    }

    /// Drops every plate with `id`. Returns whether anything was dropped.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.plates.len();
        self.plates.retain(|plate| plate.id != id);

        self.plates.len() != before
    }

    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn get(&self, id: u64) -> Option<&Plate> {
        self.plates.iter().find(|plate| plate.id == id)
    }

    pub fn as_slice(&self) -> &[Plate] {
        &self.plates
    }

    pub fn len(&self) -> usize {
        self.plates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plates.is_empty()
    }
}
