use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use super::{config::Config, database::PlateStore};

pub struct State {
    pub config: Config,
    pub store: PlateStore,
}

impl State {
    pub fn new(config: Config) -> Result<Arc<Self>> {
        let store = match &config.seed_path {
            Some(path) => {
                info!("Seeding plates from {}", path.display());
                PlateStore::from_seed(path)?
            }
            None => PlateStore::default(),
        };

        Ok(Self::with_store(config, store))
    }

    pub fn with_store(config: Config, store: PlateStore) -> Arc<Self> {
        Arc::new(Self { config, store })
    }
}
