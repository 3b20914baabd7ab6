pub use in_memory_storage::InMemoryStorage;
pub use postgres_storage::{PostgresStorage, PostgresStorageConfig};
pub(crate) use postgres_storage::is_violation;

use crate::api::GuestId;

mod in_memory_storage;
mod postgres_storage;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Guest {0} not found")]
    GuestNotFound(GuestId),

    #[error("Guest with email {0} already exists")]
    EmailAlreadyTaken(String),

    #[error("Invalid details: {0}")]
    InvalidDetails(#[from] validator::ValidationErrors),

    #[error("DatabaseFailure failure {0}")]
    DatabaseFailure(#[from] tokio_postgres::Error),

    #[error("Other error {0}")]
    Other(String),
}
