use std::time::Duration;

use anyhow::Result;
use plates::config::{try_load, var};
use tracing::info;

pub const DEFAULT_API_URL: &str = "http://localhost:3333";

pub struct Config {
    pub api_url: String,
    pub request_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        let api_url = var("API_URL").unwrap_or_else(|| {
            info!("API_URL not set, using default: {DEFAULT_API_URL}");
            DEFAULT_API_URL.to_string()
        });

        Ok(Self {
            api_url,
            request_timeout: Duration::from_secs(try_load("REQUEST_TIMEOUT_SECS", "10")?),
        })
    }
}
