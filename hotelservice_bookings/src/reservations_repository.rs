pub use in_memory_reservations_repository::InMemoryReservationsRepository;
pub use postgres_reservations_repository::PostgresReservationsRepository;

use crate::api::{ReservationDetails, ReservationId, ReservationWithGuest};
use crate::storage::StorageError;

mod in_memory_reservations_repository;
mod postgres_reservations_repository;

#[async_trait::async_trait]
pub trait ReservationsRepository: Send + Sync {
    /// Adds reservation for an existing guest, returns an id assigned to the reservation
    async fn add_reservation(
        &self,
        details: ReservationDetails,
    ) -> Result<ReservationId, StorageError>;

    /// Lists all reservations together with names of their guests
    async fn list_reservations(&self) -> Result<Vec<ReservationWithGuest>, StorageError>;
}

/// Reversed stays are stored as they are, only reported
fn warn_if_dates_reversed(details: &ReservationDetails) {
    if details.check_out <= details.check_in {
        tracing::warn!(
            "Reservation of room {} for guest {} has check_out {} not after check_in {}",
            details.room_number,
            details.guest_id,
            details.check_out,
            details.check_in
        );
    }
}
