//! # Dashboard Controller
//!
//! Owns the plate cache and the little bit of UI state around it: which plate
//! is being edited and whether the add/edit modals are open.
//!
//! ## Synchronization
//!
//! - Every mutation goes to the repository first, the cache only follows a confirmed response
//! - Records from the repository are taken wholesale, never patched field by field
//! - A failed call leaves the cache as it was, marks it stale and hands the error back
//! - `refresh` reloads a stale cache, nothing else triggers a reload
//!
//! Mutations take `&mut self`, so two of them can never be in flight at once.
use plates::{NewPlate, Plate, PlateDraft, PlateRepository, RepositoryError};
use tracing::{error, info, warn};

use crate::{cache::PlateCache, error::DashboardError, view::DashboardView};

pub struct Dashboard<R> {
    repository: R,
    cache: PlateCache,
    editing: Option<Plate>,
    add_modal_open: bool,
    edit_modal_open: bool,
}

impl<R: PlateRepository> Dashboard<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            cache: PlateCache::default(),
            editing: None,
            add_modal_open: false,
            edit_modal_open: false,
        }
    }

    /// Replaces the local list with a full listing from the repository.
    pub async fn load(&mut self) -> Result<(), DashboardError> {
        match self.repository.list().await {
            Ok(plates) => {
                self.cache.replace_all(plates);
                info!("Loaded {} plates", self.cache.len());
                Ok(())
            }
            Err(e) => Err(self.failed("load plates", e)),
        }
    }

    /// Reloads only when a previous call left the cache stale.
    pub async fn refresh(&mut self) -> Result<bool, DashboardError> {
        if !self.cache.is_stale() {
            return Ok(false);
        }

        self.load().await?;
        Ok(true)
    }

    pub async fn add_plate(&mut self, draft: PlateDraft) -> Result<Plate, DashboardError> {
        match self.repository.create(&NewPlate::available(draft)).await {
            Ok(plate) => {
                info!("Added plate {} ({})", plate.id, plate.name);
                self.cache.append(plate.clone());
                Ok(plate)
            }
            Err(e) => Err(self.failed("add plate", e)),
        }
    }

    /// Sends `draft` as the new contents of the plate selected for editing.
    pub async fn update_plate(&mut self, draft: PlateDraft) -> Result<Plate, DashboardError> {
        let id = self
            .editing
            .as_ref()
            .map(|plate| plate.id)
            .ok_or(DashboardError::NoSelection)?;

        let plate = match self.repository.update(id, &draft).await {
            Ok(plate) => plate,
            Err(e) => return Err(self.failed("update plate", e)),
        };

        if plate.id != id {
            error!("Update of plate {id} answered with plate {}", plate.id);
            self.cache.invalidate();

            return Err(DashboardError::UnexpectedRecord {
                requested: id,
                returned: plate.id,
            });
        }

        if !self.cache.replace(plate.clone()) {
            warn!("Plate {} updated but missing from the local list", plate.id);
        }

        info!("Updated plate {}", plate.id);
        self.editing = Some(plate.clone());

        Ok(plate)
    }

    /// Deletes remotely, then locally. `Ok(false)` means the repository accepted
    /// the delete but no local plate had that id.
    pub async fn delete_plate(&mut self, id: u64) -> Result<bool, DashboardError> {
        if let Err(e) = self.repository.delete(id).await {
            return Err(self.failed("delete plate", e));
        }

        let removed = self.cache.remove(id);
        if removed {
            info!("Deleted plate {id}");
        } else {
            warn!("Plate {id} deleted but missing from the local list");
        }

        if self.editing.as_ref().is_some_and(|plate| plate.id == id) {
            self.editing = None;
            self.edit_modal_open = false;
        }

        Ok(removed)
    }

    fn failed(&mut self, action: &str, e: RepositoryError) -> DashboardError {
        error!("Failed to {action}: {e}");
        self.cache.invalidate();

        e.into()
    }
}

impl<R> Dashboard<R> {
    pub fn select_for_edit(&mut self, plate: Plate) {
        self.editing = Some(plate);
        self.edit_modal_open = true;
    }

    pub fn toggle_add_modal(&mut self) {
        self.add_modal_open = !self.add_modal_open;
    }

    pub fn toggle_edit_modal(&mut self) {
        self.edit_modal_open = !self.edit_modal_open;
    }

    pub fn plates(&self) -> &[Plate] {
        self.cache.as_slice()
    }

    pub fn plate(&self, id: u64) -> Option<&Plate> {
        self.cache.get(id)
    }

    pub fn editing(&self) -> Option<&Plate> {
        self.editing.as_ref()
    }

    pub fn is_add_modal_open(&self) -> bool {
        self.add_modal_open
    }

    pub fn is_edit_modal_open(&self) -> bool {
        self.edit_modal_open
    }

    pub fn is_stale(&self) -> bool {
        self.cache.is_stale()
    }

    pub fn view(&self) -> DashboardView<'_> {
        DashboardView {
            plates: self.cache.as_slice(),
            editing: self.editing.as_ref(),
            add_modal_open: self.add_modal_open,
            edit_modal_open: self.edit_modal_open,
            stale: self.cache.is_stale(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    #[derive(Default)]
    struct Remote {
        plates: Vec<Plate>,
        created: Vec<NewPlate>,
        updated: Vec<(u64, PlateDraft)>,
        down: bool,
        // answer every update with this plate id instead of the requested one
        misroute_updates_to: Option<u64>,
    }

    /// Repository double that behaves like the reference server, or fails every call when down.
    #[derive(Default)]
    struct FakeRepository {
        remote: Mutex<Remote>,
    }

    impl FakeRepository {
        fn with(plates: Vec<Plate>) -> Self {
            Self {
                remote: Mutex::new(Remote {
                    plates,
                    ..Default::default()
                }),
            }
        }

        fn set_down(&self, down: bool) {
            self.remote.lock().unwrap().down = down;
        }

        fn outage() -> RepositoryError {
            RepositoryError::Status {
                status: 503,
                body: "down".to_string(),
            }
        }
    }

    #[async_trait]
    impl PlateRepository for FakeRepository {
        async fn list(&self) -> Result<Vec<Plate>, RepositoryError> {
            let remote = self.remote.lock().unwrap();
            if remote.down {
                return Err(Self::outage());
            }

            Ok(remote.plates.clone())
        }

        async fn create(&self, plate: &NewPlate) -> Result<Plate, RepositoryError> {
            let mut remote = self.remote.lock().unwrap();
            if remote.down {
                return Err(Self::outage());
            }

            remote.created.push(plate.clone());
            let id = remote
                .plates
                .iter()
                .map(|p| p.id)
                .max()
                .unwrap_or(0)
                .checked_add(1)
                .ok_or(RepositoryError::Status {
                    status: 500,
                    body: "ids exhausted".to_string(),
                })?;
            let created = Plate {
                id,
                name: plate.draft.name.clone(),
                image: plate.draft.image.clone(),
                price: plate.draft.price.clone(),
                description: plate.draft.description.clone(),
                available: plate.available,
            };
            remote.plates.push(created.clone());

            Ok(created)
        }

        async fn update(&self, id: u64, draft: &PlateDraft) -> Result<Plate, RepositoryError> {
            let mut remote = self.remote.lock().unwrap();
            if remote.down {
                return Err(Self::outage());
            }

            remote.updated.push((id, draft.clone()));
            let id = remote.misroute_updates_to.unwrap_or(id);
            let plate = remote
                .plates
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or(RepositoryError::Status {
                    status: 404,
                    body: String::new(),
                })?;

            plate.name = draft.name.clone();
            plate.image = draft.image.clone();
            plate.price = draft.price.clone();
            plate.description = draft.description.clone();

            Ok(plate.clone())
        }

        async fn delete(&self, id: u64) -> Result<(), RepositoryError> {
            let mut remote = self.remote.lock().unwrap();
            if remote.down {
                return Err(Self::outage());
            }

            // lenient on unknown ids, like a backend that answers 200 regardless
            remote.plates.retain(|p| p.id != id);
            Ok(())
        }
    }

    fn plate(id: u64, name: &str) -> Plate {
        Plate {
            id,
            name: name.to_string(),
            image: format!("{name}.png"),
            price: "19.90".to_string(),
            description: format!("{name} description"),
            available: true,
        }
    }

    fn draft(name: &str) -> PlateDraft {
        PlateDraft {
            name: name.to_string(),
            image: format!("{name}.png"),
            price: "25.00".to_string(),
            description: format!("{name} description"),
        }
    }

    fn ids<R>(dashboard: &Dashboard<R>) -> Vec<u64> {
        dashboard.plates().iter().map(|p| p.id).collect()
    }

    async fn loaded(plates: Vec<Plate>) -> Dashboard<FakeRepository> {
        let mut dashboard = Dashboard::new(FakeRepository::with(plates));
        dashboard.load().await.unwrap();
        dashboard
    }

    #[tokio::test]
    async fn test_load_keeps_server_order() {
        let dashboard = loaded(vec![plate(5, "e"), plate(2, "b"), plate(9, "i")]).await;

        assert_eq!(ids(&dashboard), [5, 2, 9]);
        assert!(!dashboard.is_stale());
    }

    #[tokio::test]
    async fn test_load_replaces_wholesale() {
        let mut dashboard = loaded(vec![plate(1, "a"), plate(2, "b")]).await;

        dashboard.repository.remote.lock().unwrap().plates = vec![plate(3, "c")];
        dashboard.load().await.unwrap();

        assert_eq!(ids(&dashboard), [3]);
    }

    #[tokio::test]
    async fn test_add_appends_server_record() {
        let mut dashboard = loaded(vec![plate(1, "a")]).await;

        let created = dashboard.add_plate(draft("X")).await.unwrap();

        assert_eq!(dashboard.plates().len(), 2);
        assert_eq!(dashboard.plates().last(), Some(&created));
        assert_eq!(created.id, 2);

        let remote = dashboard.repository.remote.lock().unwrap();
        assert_eq!(remote.created.len(), 1);
        assert!(remote.created[0].available);
    }

    #[tokio::test]
    async fn test_add_failure_is_surfaced() {
        let mut dashboard = loaded(vec![plate(1, "a")]).await;
        dashboard.repository.set_down(true);

        let err = dashboard.add_plate(draft("X")).await.unwrap_err();

        assert!(matches!(
            err,
            DashboardError::Repository(RepositoryError::Status { status: 503, .. })
        ));
        assert_eq!(ids(&dashboard), [1]);
        assert!(dashboard.is_stale());
    }

    #[tokio::test]
    async fn test_update_without_selection() {
        let mut dashboard = loaded(vec![plate(1, "a")]).await;

        let err = dashboard.update_plate(draft("X")).await.unwrap_err();

        assert!(matches!(err, DashboardError::NoSelection));
        assert!(dashboard.repository.remote.lock().unwrap().updated.is_empty());
        assert!(!dashboard.is_stale());
    }

    #[tokio::test]
    async fn test_update_replaces_selected() {
        let mut dashboard = loaded(vec![plate(1, "a"), plate(2, "b"), plate(3, "c")]).await;
        dashboard.select_for_edit(plate(2, "b"));

        let updated = dashboard.update_plate(draft("b2")).await.unwrap();

        assert_eq!(updated.id, 2);
        assert_eq!(dashboard.plates().len(), 3);
        assert_eq!(dashboard.plates()[1], updated);
        assert_eq!(dashboard.plates()[0], plate(1, "a"));
        assert_eq!(dashboard.plates()[2], plate(3, "c"));
        assert_eq!(dashboard.editing(), Some(&updated));

        let remote = dashboard.repository.remote.lock().unwrap();
        assert_eq!(remote.updated, vec![(2, draft("b2"))]);
    }

    #[tokio::test]
    async fn test_update_failure_keeps_list() {
        let mut dashboard = loaded(vec![plate(1, "a"), plate(2, "b")]).await;
        dashboard.select_for_edit(plate(2, "b"));
        dashboard.repository.set_down(true);

        assert!(dashboard.update_plate(draft("b2")).await.is_err());

        assert_eq!(dashboard.plates()[1], plate(2, "b"));
        assert_eq!(dashboard.editing(), Some(&plate(2, "b")));
        assert!(dashboard.is_stale());
    }

    #[tokio::test]
    async fn test_update_answered_with_other_plate() {
        let mut dashboard = loaded(vec![plate(1, "a"), plate(2, "b"), plate(1, "dup")]).await;
        dashboard.select_for_edit(plate(1, "a"));
        dashboard.repository.remote.lock().unwrap().misroute_updates_to = Some(2);

        let err = dashboard.update_plate(draft("NEW")).await.unwrap_err();

        assert!(matches!(
            err,
            DashboardError::UnexpectedRecord {
                requested: 1,
                returned: 2
            }
        ));
        assert_eq!(
            dashboard.plates(),
            [plate(1, "a"), plate(2, "b"), plate(1, "dup")]
        );
        assert_eq!(dashboard.editing(), Some(&plate(1, "a")));
        assert!(dashboard.is_stale());

        // the next listing shows what the repository really did
        dashboard.repository.remote.lock().unwrap().misroute_updates_to = None;
        assert!(dashboard.refresh().await.unwrap());
        assert_eq!(dashboard.plate(2).map(|p| p.name.as_str()), Some("NEW"));
    }

    #[tokio::test]
    async fn test_update_replaces_duplicates() {
        let mut dashboard = loaded(vec![plate(1, "a"), plate(2, "b"), plate(1, "dup")]).await;
        dashboard.select_for_edit(plate(1, "a"));

        let updated = dashboard.update_plate(draft("NEW")).await.unwrap();

        assert_eq!(dashboard.plates(), [updated.clone(), plate(2, "b"), updated]);
    }

    #[tokio::test]
    async fn test_plate_lookup() {
        let dashboard = loaded(vec![plate(1, "a"), plate(2, "b")]).await;

        assert_eq!(dashboard.plate(2), Some(&plate(2, "b")));
        assert!(dashboard.plate(3).is_none());
    }

    #[tokio::test]
    async fn test_delete_existing() {
        let mut dashboard = loaded(vec![plate(1, "a"), plate(2, "b")]).await;

        assert!(dashboard.delete_plate(1).await.unwrap());
        assert_eq!(ids(&dashboard), [2]);
    }

    #[tokio::test]
    async fn test_delete_unknown_is_flagged() {
        let mut dashboard = loaded(vec![plate(1, "a")]).await;

        assert!(!dashboard.delete_plate(42).await.unwrap());
        assert_eq!(ids(&dashboard), [1]);
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_list() {
        let mut dashboard = loaded(vec![plate(1, "a")]).await;
        dashboard.repository.set_down(true);

        assert!(dashboard.delete_plate(1).await.is_err());
        assert_eq!(ids(&dashboard), [1]);
        assert!(dashboard.is_stale());
    }

    #[tokio::test]
    async fn test_delete_clears_selection() {
        let mut dashboard = loaded(vec![plate(1, "a"), plate(2, "b")]).await;
        dashboard.select_for_edit(plate(1, "a"));

        dashboard.delete_plate(2).await.unwrap();
        assert_eq!(dashboard.editing().map(|p| p.id), Some(1));

        dashboard.delete_plate(1).await.unwrap();
        assert!(dashboard.editing().is_none());
        assert!(!dashboard.is_edit_modal_open());
    }

    #[tokio::test]
    async fn test_refresh_only_when_stale() {
        let mut dashboard = loaded(vec![plate(1, "a")]).await;
        assert!(!dashboard.refresh().await.unwrap());

        dashboard.repository.set_down(true);
        assert!(dashboard.delete_plate(1).await.is_err());

        // the delete did land remotely in this scenario
        dashboard.repository.set_down(false);
        dashboard.repository.remote.lock().unwrap().plates.clear();

        assert!(dashboard.refresh().await.unwrap());
        assert!(dashboard.plates().is_empty());
        assert!(!dashboard.is_stale());
    }

    #[tokio::test]
    async fn test_failed_initial_load() {
        let mut dashboard = Dashboard::new(FakeRepository::with(vec![plate(1, "a")]));
        dashboard.repository.set_down(true);

        assert!(dashboard.load().await.is_err());
        assert!(dashboard.plates().is_empty());
        assert!(dashboard.is_stale());

        dashboard.repository.set_down(false);
        assert!(dashboard.refresh().await.unwrap());
        assert_eq!(ids(&dashboard), [1]);
    }

    #[tokio::test]
    async fn test_add_then_delete_scenario() {
        let mut dashboard = loaded(vec![plate(1, "a")]).await;

        dashboard.add_plate(draft("X")).await.unwrap();
        assert_eq!(ids(&dashboard), [1, 2]);

        dashboard.delete_plate(1).await.unwrap();
        assert_eq!(ids(&dashboard), [2]);
        assert_eq!(dashboard.plates()[0].name, "X");
    }

    #[test]
    fn test_modal_state() {
        let mut dashboard = Dashboard::new(FakeRepository::default());
        assert!(!dashboard.is_add_modal_open());
        assert!(!dashboard.is_edit_modal_open());

        dashboard.toggle_add_modal();
        assert!(dashboard.is_add_modal_open());
        assert!(!dashboard.is_edit_modal_open());

        dashboard.select_for_edit(plate(4, "d"));
        assert!(dashboard.is_edit_modal_open());
        assert_eq!(dashboard.editing().map(|p| p.id), Some(4));

        dashboard.toggle_edit_modal();
        dashboard.toggle_add_modal();
        assert!(!dashboard.is_add_modal_open());
        assert!(!dashboard.is_edit_modal_open());
        // closing the modal keeps the last target
        assert_eq!(dashboard.editing().map(|p| p.id), Some(4));
    }
}
