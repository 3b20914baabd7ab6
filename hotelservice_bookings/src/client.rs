use anyhow::{bail, Context};
use reqwest::header::LOCATION;
use reqwest::{Response, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;

use crate::api::{
    DeleteGuestResponse, GetAllGuestsResponse, GetAllReservationsResponse, Guest, GuestDetails,
    GuestId, ReservationDetails, ReservationId,
};

/// Result of adding a guest through the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddGuestOutcome {
    Added(GuestId),
    EmailAlreadyTaken,
}

pub struct HotelServiceBookingsClient {
    url: String,
    client: ClientWithMiddleware,
}

impl HotelServiceBookingsClient {
    pub fn new(url: &str) -> anyhow::Result<Self> {
        let reqwest_client = reqwest::Client::builder()
            .build()
            .context("Failed to build reqwest client")?;
        let client = ClientBuilder::new(reqwest_client)
            // Insert the tracing middleware
            .with(TracingMiddleware::default())
            .build();

        Ok(Self {
            url: url.to_string(),
            client,
        })
    }

    /// Calls POST /api/guest endpoint
    /// Returns guest_id of added guest taken from the location header
    pub async fn add_guest(&self, guest_details: GuestDetails) -> anyhow::Result<AddGuestOutcome> {
        let response = self
            .client
            .post(format!("{}/api/guest", self.url))
            .json(&guest_details)
            .send()
            .await?;

        if response.status() == StatusCode::CONFLICT {
            return Ok(AddGuestOutcome::EmailAlreadyTaken);
        }
        if !response.status().is_success() {
            let error = response.text().await.unwrap_or_default();
            bail!("Failed to add guest {}", error)
        }

        Ok(AddGuestOutcome::Added(id_from_location(
            &response,
            "/api/guest/",
        )?))
    }

    /// Calls GET /api/guest/{guest_id} endpoint
    /// None if guest was not in the repository
    pub async fn get_guest(&self, guest_id: GuestId) -> anyhow::Result<Option<Guest>> {
        let response = self
            .client
            .get(format!("{}/api/guest/{}", self.url, guest_id))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            Ok(None)
        } else if response.status().is_success() {
            Ok(Some(response.json().await?))
        } else {
            let error = response.text().await.unwrap_or_default();
            bail!("Failed to get guest {}", error)
        }
    }

    /// Calls DELETE /api/guest/{guest_id} endpoint
    /// Returns number of reservations removed with the guest, None if guest was not found
    pub async fn delete_guest(&self, guest_id: GuestId) -> anyhow::Result<Option<u64>> {
        let response = self
            .client
            .delete(format!("{}/api/guest/{}", self.url, guest_id))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            Ok(None)
        } else if response.status().is_success() {
            let deleted: DeleteGuestResponse = response.json().await?;
            Ok(Some(deleted.removed_reservations))
        } else {
            let error = response.text().await.unwrap_or_default();
            bail!("Failed to delete guest {}", error)
        }
    }

    /// Calls GET /api/guests endpoint
    pub async fn list_guests(&self) -> anyhow::Result<GetAllGuestsResponse> {
        let response = self
            .client
            .get(format!("{}/api/guests", self.url))
            .send()
            .await?;
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            let error = response.text().await.unwrap_or_default();
            bail!("Failed to list guests {}", error)
        }
    }

    /// Calls POST /api/reservation endpoint
    pub async fn add_reservation(
        &self,
        reservation_details: ReservationDetails,
    ) -> anyhow::Result<ReservationId> {
        let response = self
            .client
            .post(format!("{}/api/reservation", self.url))
            .json(&reservation_details)
            .send()
            .await?;

        if !response.status().is_success() {
            let error = response.text().await.unwrap_or_default();
            bail!("Failed to add reservation {}", error)
        }

        id_from_location(&response, "/api/reservation/")
    }

    /// Calls GET /api/reservations endpoint
    pub async fn list_reservations(&self) -> anyhow::Result<GetAllReservationsResponse> {
        let response = self
            .client
            .get(format!("{}/api/reservations", self.url))
            .send()
            .await?;
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            let error = response.text().await.unwrap_or_default();
            bail!("Failed to list reservations {}", error)
        }
    }
}

fn id_from_location(response: &Response, prefix: &str) -> anyhow::Result<i32> {
    response
        .headers()
        .get(LOCATION)
        .context("No location header")?
        .to_str()
        .context("Failed to convert header to str")?
        .strip_prefix(prefix)
        .context("Invalid location header")?
        .parse()
        .context("Failed to parse id")
}
