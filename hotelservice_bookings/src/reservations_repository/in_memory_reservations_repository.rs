use std::sync::Arc;

use validator::Validate;

use crate::api::{Reservation, ReservationDetails, ReservationId, ReservationWithGuest};
use crate::reservations_repository::{warn_if_dates_reversed, ReservationsRepository};
use crate::storage::{InMemoryStorage, StorageError};

pub struct InMemoryReservationsRepository {
    storage: Arc<InMemoryStorage>,
}

impl InMemoryReservationsRepository {
    pub fn new(storage: Arc<InMemoryStorage>) -> Self {
        Self { storage }
    }
}

#[async_trait::async_trait]
impl ReservationsRepository for InMemoryReservationsRepository {
    async fn add_reservation(
        &self,
        details: ReservationDetails,
    ) -> Result<ReservationId, StorageError> {
        details.validate()?;
        warn_if_dates_reversed(&details);

        let mut tables = self.storage.write();
        if !tables.guests.contains_key(&details.guest_id) {
            return Err(StorageError::GuestNotFound(details.guest_id));
        }

        let reservation_id = tables.next_reservation_id();
        tables.reservations.insert(
            reservation_id,
            Reservation {
                reservation_id,
                details,
            },
        );
        Ok(reservation_id)
    }

    async fn list_reservations(&self) -> Result<Vec<ReservationWithGuest>, StorageError> {
        let tables = self.storage.read();
        tables
            .reservations
            .values()
            .map(|reservation| {
                let guest = tables
                    .guests
                    .get(&reservation.details.guest_id)
                    .ok_or(StorageError::GuestNotFound(reservation.details.guest_id))?;
                Ok(ReservationWithGuest {
                    reservation: reservation.clone(),
                    guest: guest.details.name(),
                })
            })
            .collect()
    }
}
