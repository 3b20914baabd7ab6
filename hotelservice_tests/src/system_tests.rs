use chrono::NaiveDate;
use rust_decimal::Decimal;

use hotelservice_bookings::api::{GuestDetails, ReservationDetails};
use hotelservice_bookings::client::{AddGuestOutcome, HotelServiceBookingsClient};
use hotelservice_tests::{bookings_url, unique_email};

fn client() -> HotelServiceBookingsClient {
    HotelServiceBookingsClient::new(&bookings_url()).expect("Failed to create client")
}

#[tokio::test]
/// Booking flow against a running service
/// Adds a guest and books a room
/// Lists reservations and checks the label
/// Adds a guest with the same email and gets rejected
/// Deletes the guest and checks its reservation is gone
async fn hotelservice_bookings_e2e_test() {
    let client = client();

    let email = unique_email("ada");
    let guest_details = GuestDetails {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: email.clone(),
        phone: "555-0100".to_string(),
    };

    let guest_id = match client
        .add_guest(guest_details.clone())
        .await
        .expect("Failed to add guest")
    {
        AddGuestOutcome::Added(guest_id) => guest_id,
        AddGuestOutcome::EmailAlreadyTaken => panic!("Fresh email already taken"),
    };

    let returned_guest = client
        .get_guest(guest_id)
        .await
        .expect("Failed to get guest")
        .expect("Guest not found");
    assert_eq!(returned_guest.details, guest_details);

    let reservation_id = client
        .add_reservation(ReservationDetails {
            room_number: "101".to_string(),
            check_in: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2024, 1, 12).unwrap(),
            guest_id,
            total_price: Decimal::new(19999, 2),
        })
        .await
        .expect("Failed to add reservation");

    let reservations = client
        .list_reservations()
        .await
        .expect("Failed to list reservations")
        .reservations;
    let entry = reservations
        .iter()
        .find(|entry| entry.reservation.reservation_id == reservation_id)
        .expect("Reservation not listed");
    assert_eq!(entry.label, "Room 101 - Ada Lovelace");

    let guests_before = client
        .list_guests()
        .await
        .expect("Failed to list guests")
        .guests;
    let duplicate = client
        .add_guest(GuestDetails {
            first_name: "Augusta".to_string(),
            ..guest_details
        })
        .await
        .expect("Failed to call add guest");
    assert_eq!(duplicate, AddGuestOutcome::EmailAlreadyTaken);

    let guests_after = client
        .list_guests()
        .await
        .expect("Failed to list guests")
        .guests;
    assert_eq!(
        guests_after
            .iter()
            .filter(|entry| entry.guest.details.email == email)
            .count(),
        1
    );
    assert_eq!(guests_after.len(), guests_before.len());

    let removed = client
        .delete_guest(guest_id)
        .await
        .expect("Failed to delete guest");
    assert_eq!(removed, Some(1));

    let reservations = client
        .list_reservations()
        .await
        .expect("Failed to list reservations")
        .reservations;
    assert!(!reservations
        .iter()
        .any(|entry| entry.reservation.details.guest_id == guest_id));

    assert_eq!(client.get_guest(guest_id).await.unwrap(), None);
}
