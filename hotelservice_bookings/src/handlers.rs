use std::sync::Arc;

use actix_web::http::header::LOCATION;
use actix_web::web::Data;
use actix_web::Error;
use actix_web::HttpResponse;
use paperclip::actix::{
    api_v2_operation,
    web::{self},
};

use crate::api::{DeleteGuestResponse, GuestDetails, GuestId, ReservationDetails};
use crate::guests_repository::GuestsRepository;
use crate::listing::ListingService;
use crate::reservations_repository::ReservationsRepository;
use crate::storage::StorageError;

#[api_v2_operation]
pub async fn health() -> Result<HttpResponse, Error> {
    Ok(HttpResponse::Ok().finish())
}

#[api_v2_operation]
pub async fn list_guests(listing: Data<ListingService>) -> Result<HttpResponse, Error> {
    Ok(match listing.list_guests().await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(err) => {
            tracing::error!("List guests failed {}", err);
            HttpResponse::InternalServerError().finish()
        }
    })
}

#[api_v2_operation]
pub async fn list_reservations(listing: Data<ListingService>) -> Result<HttpResponse, Error> {
    Ok(match listing.list_reservations().await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(err) => {
            tracing::error!("List reservations failed {}", err);
            HttpResponse::InternalServerError().finish()
        }
    })
}

#[api_v2_operation]
pub async fn add_guest(
    guests_repository: Data<Arc<dyn GuestsRepository>>,
    details: web::Json<GuestDetails>,
) -> Result<HttpResponse, Error> {
    Ok(
        match guests_repository.add_guest(details.into_inner()).await {
            Ok(guest_id) => HttpResponse::Ok()
                .append_header((LOCATION, format!("/api/guest/{}", guest_id)))
                .finish(),
            Err(StorageError::InvalidDetails(errors)) => HttpResponse::BadRequest().json(errors),
            Err(err @ StorageError::EmailAlreadyTaken(_)) => {
                HttpResponse::Conflict().json(err.to_string())
            }
            Err(err) => {
                tracing::error!("Add guest failed {}", err);
                HttpResponse::InternalServerError().finish()
            }
        },
    )
}

#[api_v2_operation]
pub async fn get_guest(
    guests_repository: Data<Arc<dyn GuestsRepository>>,
    guest_id: web::Path<GuestId>,
) -> Result<HttpResponse, Error> {
    Ok(
        match guests_repository.get_guest(guest_id.into_inner()).await {
            Ok(guest) => HttpResponse::Ok().json(guest),
            Err(StorageError::GuestNotFound(_)) => HttpResponse::NotFound().finish(),
            Err(err) => {
                tracing::error!("Get guest failed {}", err);
                HttpResponse::InternalServerError().finish()
            }
        },
    )
}

#[api_v2_operation]
pub async fn delete_guest(
    guests_repository: Data<Arc<dyn GuestsRepository>>,
    guest_id: web::Path<GuestId>,
) -> Result<HttpResponse, Error> {
    Ok(
        match guests_repository.delete_guest(guest_id.into_inner()).await {
            Ok(removed_reservations) => HttpResponse::Ok().json(DeleteGuestResponse {
                removed_reservations,
            }),
            Err(StorageError::GuestNotFound(_)) => HttpResponse::NotFound().finish(),
            Err(err) => {
                tracing::error!("Delete guest failed {}", err);
                HttpResponse::InternalServerError().finish()
            }
        },
    )
}

#[api_v2_operation]
pub async fn add_reservation(
    reservations_repository: Data<Arc<dyn ReservationsRepository>>,
    details: web::Json<ReservationDetails>,
) -> Result<HttpResponse, Error> {
    Ok(
        match reservations_repository
            .add_reservation(details.into_inner())
            .await
        {
            Ok(reservation_id) => HttpResponse::Ok()
                .append_header((LOCATION, format!("/api/reservation/{}", reservation_id)))
                .finish(),
            Err(StorageError::InvalidDetails(errors)) => HttpResponse::BadRequest().json(errors),
            Err(err @ StorageError::GuestNotFound(_)) => {
                HttpResponse::NotFound().json(err.to_string())
            }
            Err(err) => {
                tracing::error!("Add reservation failed {}", err);
                HttpResponse::InternalServerError().finish()
            }
        },
    )
}
