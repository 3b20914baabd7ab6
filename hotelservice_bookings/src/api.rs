use chrono::{DateTime, NaiveDate, Utc};
use paperclip::actix::Apiv2Schema;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

pub type GuestId = i32;
pub type ReservationId = i32;

/// Largest integer part that still fits `NUMERIC(10, 2)`
const MAX_PRICE_INTEGER_PART: i64 = 100_000_000;
const PRICE_DECIMAL_PLACES: u32 = 2;

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Validate, Apiv2Schema)]
/// Details provided when a guest registers
pub struct GuestDetails {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    /// Unique across all guests, capped at the width of the email column
    #[validate(email, length(max = 254))]
    pub email: String,
    #[validate(length(min = 1, max = 15))]
    pub phone: String,
}

impl GuestDetails {
    pub fn name(&self) -> GuestName {
        GuestName {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
/// Stored guest record
pub struct Guest {
    pub guest_id: GuestId,
    pub details: GuestDetails,
    /// Set once when the guest is stored
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct GuestName {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Validate, Apiv2Schema)]
/// Details of a single room booking
pub struct ReservationDetails {
    #[validate(length(min = 1, max = 5))]
    pub room_number: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    /// Owning guest, removing the guest removes the reservation too
    pub guest_id: GuestId,
    /// Up to 10 digits, 2 of them after the decimal point
    #[validate(custom(function = "validate_total_price"))]
    pub total_price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct Reservation {
    pub reservation_id: ReservationId,
    pub details: ReservationDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
/// Reservation joined with the name of its guest
pub struct ReservationWithGuest {
    pub reservation: Reservation,
    pub guest: GuestName,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct GuestListEntry {
    pub guest: Guest,
    /// "{first_name} {last_name}"
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct ReservationListEntry {
    pub reservation: Reservation,
    pub guest: GuestName,
    /// "Room {room_number} - {first_name} {last_name}"
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct GetAllGuestsResponse {
    pub guests: Vec<GuestListEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct GetAllReservationsResponse {
    pub reservations: Vec<ReservationListEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct DeleteGuestResponse {
    /// Number of reservations removed together with the guest
    pub removed_reservations: u64,
}

pub fn guest_label(name: &GuestName) -> String {
    format!("{} {}", name.first_name, name.last_name)
}

pub fn reservation_label(room_number: &str, guest: &GuestName) -> String {
    format!("Room {} - {}", room_number, guest_label(guest))
}

fn validate_total_price(total_price: &Decimal) -> Result<(), ValidationError> {
    if total_price.round_dp(PRICE_DECIMAL_PLACES) != *total_price {
        return Err(ValidationError::new("too_many_decimal_places"));
    }
    if total_price.trunc().abs() >= Decimal::from(MAX_PRICE_INTEGER_PART) {
        return Err(ValidationError::new("too_many_digits"));
    }
    Ok(())
}
