use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Repository responded with {status}: {body}")]
    Status { status: u16, body: String },
}

impl RepositoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::Status { status: 404, .. })
    }
}
