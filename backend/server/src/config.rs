use std::path::PathBuf;

use anyhow::Result;
use plates::config::{try_load, var};
use tracing::info;

pub struct Config {
    pub port: u16,
    pub seed_path: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let seed_path = var("SEED_PATH").map(PathBuf::from);

        if seed_path.is_none() {
            info!("SEED_PATH not set, starting with an empty menu");
        }

        Ok(Self {
            port: try_load("RUST_PORT", "3333")?,
            seed_path,
        })
    }
}
