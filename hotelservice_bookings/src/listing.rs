use std::sync::Arc;

use crate::api::{
    guest_label, reservation_label, GetAllGuestsResponse, GetAllReservationsResponse,
    GuestListEntry, ReservationListEntry,
};
use crate::guests_repository::GuestsRepository;
use crate::reservations_repository::ReservationsRepository;
use crate::storage::StorageError;

/// Read-only views over all guests and all reservations
#[derive(Clone)]
pub struct ListingService {
    guests_repository: Arc<dyn GuestsRepository>,
    reservations_repository: Arc<dyn ReservationsRepository>,
}

impl ListingService {
    pub fn new(
        guests_repository: Arc<dyn GuestsRepository>,
        reservations_repository: Arc<dyn ReservationsRepository>,
    ) -> Self {
        Self {
            guests_repository,
            reservations_repository,
        }
    }

    pub async fn list_guests(&self) -> Result<GetAllGuestsResponse, StorageError> {
        let guests = self
            .guests_repository
            .list_guests()
            .await?
            .into_iter()
            .map(|guest| GuestListEntry {
                label: guest_label(&guest.details.name()),
                guest,
            })
            .collect();
        Ok(GetAllGuestsResponse { guests })
    }

    pub async fn list_reservations(&self) -> Result<GetAllReservationsResponse, StorageError> {
        let reservations = self
            .reservations_repository
            .list_reservations()
            .await?
            .into_iter()
            .map(|joined| ReservationListEntry {
                label: reservation_label(&joined.reservation.details.room_number, &joined.guest),
                reservation: joined.reservation,
                guest: joined.guest,
            })
            .collect();
        Ok(GetAllReservationsResponse { reservations })
    }
}

#[cfg(test)]
mod listing_service_tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;
    use crate::api::{GuestDetails, ReservationDetails};
    use crate::guests_repository::InMemoryGuestsRepository;
    use crate::reservations_repository::InMemoryReservationsRepository;
    use crate::storage::InMemoryStorage;

    fn in_memory_setup() -> (
        Arc<dyn GuestsRepository>,
        Arc<dyn ReservationsRepository>,
        ListingService,
    ) {
        let storage = Arc::new(InMemoryStorage::default());
        let guests: Arc<dyn GuestsRepository> =
            Arc::new(InMemoryGuestsRepository::new(storage.clone()));
        let reservations: Arc<dyn ReservationsRepository> =
            Arc::new(InMemoryReservationsRepository::new(storage));
        let listing = ListingService::new(guests.clone(), reservations.clone());
        (guests, reservations, listing)
    }

    fn ada() -> GuestDetails {
        GuestDetails {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_guests_returns_every_guest_intact() {
        let (guests, _, listing) = in_memory_setup();
        assert!(listing.list_guests().await.unwrap().guests.is_empty());

        let mut added = vec![];
        for i in 0..5 {
            let details = GuestDetails {
                email: format!("guest{}@example.com", i),
                ..ada()
            };
            let guest_id = guests.add_guest(details.clone()).await.unwrap();
            added.push((guest_id, details));
        }

        let listed = listing.list_guests().await.unwrap().guests;
        assert_eq!(listed.len(), added.len());
        for (guest_id, details) in added {
            let entry = listed
                .iter()
                .find(|entry| entry.guest.guest_id == guest_id)
                .expect("Guest missing from listing");
            assert_eq!(entry.guest.details, details);
            assert_eq!(entry.label, "Ada Lovelace");
            assert_eq!(
                entry.guest.created_at,
                guests.get_guest(guest_id).await.unwrap().created_at
            );
        }
    }

    #[tokio::test]
    /// 1. Ada books room 101 - listed as "Room 101 - Ada Lovelace"
    /// 2. Second guest with Ada's email is rejected, still one guest listed
    /// 3. Ada is deleted - no reservations listed
    async fn test_ada_lovelace_scenario() {
        let (guests, reservations, listing) = in_memory_setup();

        let ada_id = guests.add_guest(ada()).await.unwrap();
        reservations
            .add_reservation(ReservationDetails {
                room_number: "101".to_string(),
                check_in: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                check_out: NaiveDate::from_ymd_opt(2024, 1, 12).unwrap(),
                guest_id: ada_id,
                total_price: Decimal::new(19999, 2),
            })
            .await
            .unwrap();

        let listed = listing.list_reservations().await.unwrap().reservations;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].label, "Room 101 - Ada Lovelace");
        assert_eq!(listed[0].reservation.details.total_price, Decimal::new(19999, 2));

        let duplicate = guests
            .add_guest(GuestDetails {
                first_name: "Augusta".to_string(),
                ..ada()
            })
            .await;
        assert!(matches!(
            duplicate,
            Err(StorageError::EmailAlreadyTaken(..))
        ));
        assert_eq!(listing.list_guests().await.unwrap().guests.len(), 1);

        guests.delete_guest(ada_id).await.unwrap();
        assert!(listing
            .list_reservations()
            .await
            .unwrap()
            .reservations
            .is_empty());
    }
}
