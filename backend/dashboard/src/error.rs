use plates::RepositoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("No plate selected for editing")]
    NoSelection,

    #[error("Asked to update plate {requested} but the repository returned plate {returned}")]
    UnexpectedRecord { requested: u64, returned: u64 },
}
