use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::debug;

use crate::{
    error::RepositoryError,
    foods::{FOODS_PATH, NewPlate, Plate, PlateDraft},
};

/// Persistence behind the dashboard. Every call is a round trip, nothing is cached here.
#[async_trait]
pub trait PlateRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Plate>, RepositoryError>;

    async fn create(&self, plate: &NewPlate) -> Result<Plate, RepositoryError>;

    async fn update(&self, id: u64, draft: &PlateDraft) -> Result<Plate, RepositoryError>;

    async fn delete(&self, id: u64) -> Result<(), RepositoryError>;
}

/// JSON-over-HTTP repository rooted at `base_url`.
#[derive(Clone, Debug)]
pub struct RemoteRepository {
    base_url: String,
    client: Client,
}

impl RemoteRepository {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RepositoryError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn foods_url(&self) -> String {
        format!("{}/{FOODS_PATH}", self.base_url)
    }

    fn food_url(&self, id: u64) -> String {
        format!("{}/{FOODS_PATH}/{id}", self.base_url)
    }
}

#[async_trait]
impl PlateRepository for RemoteRepository {
    async fn list(&self) -> Result<Vec<Plate>, RepositoryError> {
        let url = self.foods_url();
        debug!("GET {url}");

        let response = check(self.client.get(&url).send().await?).await?;

        Ok(response.json().await?)
    }

    async fn create(&self, plate: &NewPlate) -> Result<Plate, RepositoryError> {
        let url = self.foods_url();
        debug!("POST {url}");

        let response = check(self.client.post(&url).json(plate).send().await?).await?;

        Ok(response.json().await?)
    }

    async fn update(&self, id: u64, draft: &PlateDraft) -> Result<Plate, RepositoryError> {
        let url = self.food_url(id);
        debug!("PUT {url}");

        let response = check(self.client.put(&url).json(draft).send().await?).await?;

        Ok(response.json().await?)
    }

    async fn delete(&self, id: u64) -> Result<(), RepositoryError> {
        let url = self.food_url(id);
        debug!("DELETE {url}");

        check(self.client.delete(&url).send().await?).await?;

        Ok(())
    }
}

async fn check(response: Response) -> Result<Response, RepositoryError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();

    Err(RepositoryError::Status {
        status: status.as_u16(),
        body,
    })
}
