pub use in_memory_guests_repository::InMemoryGuestsRepository;
pub use postgres_guests_repository::PostgresGuestsRepository;

use crate::api::{Guest, GuestDetails, GuestId};
use crate::storage::StorageError;

mod in_memory_guests_repository;
mod postgres_guests_repository;

#[async_trait::async_trait]
pub trait GuestsRepository: Send + Sync {
    /// Adds guest to repository, returns an id assigned to the guest
    /// Fails with EmailAlreadyTaken if another guest uses the same email
    async fn add_guest(&self, details: GuestDetails) -> Result<GuestId, StorageError>;

    async fn get_guest(&self, guest_id: GuestId) -> Result<Guest, StorageError>;

    /// Lists all guests in the repository
    async fn list_guests(&self) -> Result<Vec<Guest>, StorageError>;

    /// Removes the guest together with all of its reservations as one atomic unit
    /// Returns number of removed reservations
    async fn delete_guest(&self, guest_id: GuestId) -> Result<u64, StorageError>;
}
