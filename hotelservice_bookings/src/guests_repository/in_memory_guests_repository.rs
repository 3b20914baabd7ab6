use std::sync::Arc;

use validator::Validate;

use crate::api::{Guest, GuestDetails, GuestId};
use crate::guests_repository::GuestsRepository;
use crate::storage::{InMemoryStorage, StorageError};

pub struct InMemoryGuestsRepository {
    storage: Arc<InMemoryStorage>,
}

impl InMemoryGuestsRepository {
    pub fn new(storage: Arc<InMemoryStorage>) -> Self {
        Self { storage }
    }
}

#[async_trait::async_trait]
impl GuestsRepository for InMemoryGuestsRepository {
    async fn add_guest(&self, details: GuestDetails) -> Result<GuestId, StorageError> {
        details.validate()?;

        let mut tables = self.storage.write();
        if tables
            .guests
            .values()
            .any(|guest| guest.details.email == details.email)
        {
            return Err(StorageError::EmailAlreadyTaken(details.email));
        }

        let guest_id = tables.next_guest_id();
        tables.guests.insert(
            guest_id,
            Guest {
                guest_id,
                details,
                created_at: chrono::Utc::now(),
            },
        );
        Ok(guest_id)
    }

    async fn get_guest(&self, guest_id: GuestId) -> Result<Guest, StorageError> {
        self.storage
            .read()
            .guests
            .get(&guest_id)
            .cloned()
            .ok_or(StorageError::GuestNotFound(guest_id))
    }

    async fn list_guests(&self) -> Result<Vec<Guest>, StorageError> {
        Ok(self.storage.read().guests.values().cloned().collect())
    }

    async fn delete_guest(&self, guest_id: GuestId) -> Result<u64, StorageError> {
        let mut tables = self.storage.write();
        if tables.guests.remove(&guest_id).is_none() {
            return Err(StorageError::GuestNotFound(guest_id));
        }

        let reservations_before = tables.reservations.len();
        tables
            .reservations
            .retain(|_, reservation| reservation.details.guest_id != guest_id);
        let removed = (reservations_before - tables.reservations.len()) as u64;

        tracing::info!(
            "Removed guest {} with {} reservation(s)",
            guest_id,
            removed
        );
        Ok(removed)
    }
}
