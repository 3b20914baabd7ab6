use std::sync::Arc;

use tokio_postgres::error::SqlState;
use tokio_postgres::Statement;
use validator::Validate;

use crate::api::{
    GuestName, Reservation, ReservationDetails, ReservationId, ReservationWithGuest,
};
use crate::reservations_repository::{warn_if_dates_reversed, ReservationsRepository};
use crate::storage::{is_violation, PostgresStorage, StorageError};

pub struct PostgresReservationsRepository {
    storage: Arc<PostgresStorage>,
}

impl PostgresReservationsRepository {
    pub fn new(storage: Arc<PostgresStorage>) -> Self {
        Self { storage }
    }
}

#[async_trait::async_trait]
impl ReservationsRepository for PostgresReservationsRepository {
    async fn add_reservation(
        &self,
        details: ReservationDetails,
    ) -> Result<ReservationId, StorageError> {
        details.validate()?;
        warn_if_dates_reversed(&details);

        let client = self.storage.client();
        let stmt: Statement = client
            .prepare(
                "INSERT INTO reservations (room_number, check_in, check_out, guest_id, total_price) VALUES ($1, $2, $3, $4, $5) RETURNING id",
            )
            .await?;

        let rows = client
            .query(
                &stmt,
                &[
                    &details.room_number,
                    &details.check_in,
                    &details.check_out,
                    &details.guest_id,
                    &details.total_price,
                ],
            )
            .await;

        match rows {
            Ok(rows) => Ok(rows
                .first()
                .ok_or_else(|| StorageError::Other("Id not returned".to_string()))?
                .try_get(0)?),
            Err(err) if is_violation(&err, &SqlState::FOREIGN_KEY_VIOLATION) => {
                Err(StorageError::GuestNotFound(details.guest_id))
            }
            Err(other_err) => Err(other_err.into()),
        }
    }

    async fn list_reservations(&self) -> Result<Vec<ReservationWithGuest>, StorageError> {
        let client = self.storage.client();
        let stmt: Statement = client
            .prepare(
                "
        SELECT r.id, r.room_number, r.check_in, r.check_out, r.guest_id, r.total_price,
               g.first_name, g.last_name
        FROM reservations r
        LEFT JOIN guests g ON g.id = r.guest_id
        ORDER BY r.id
        ",
            )
            .await?;

        let rows = client.query(&stmt, &[]).await?;

        rows.iter()
            .map(|row| {
                let guest_id = row.try_get(4)?;
                // Reservation without its guest fails the listing, same as in memory
                let first_name: Option<String> = row.try_get(6)?;
                let last_name: Option<String> = row.try_get(7)?;
                let (Some(first_name), Some(last_name)) = (first_name, last_name) else {
                    return Err(StorageError::GuestNotFound(guest_id));
                };
                Ok(ReservationWithGuest {
                    reservation: Reservation {
                        reservation_id: row.try_get(0)?,
                        details: ReservationDetails {
                            room_number: row.try_get(1)?,
                            check_in: row.try_get(2)?,
                            check_out: row.try_get(3)?,
                            guest_id,
                            total_price: row.try_get(5)?,
                        },
                    },
                    guest: GuestName {
                        first_name,
                        last_name,
                    },
                })
            })
            .collect()
    }
}

#[cfg(all(test, feature = "postgres_tests"))]
mod tests_postgres_reservations_repository {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use serial_test::file_serial;
    use testcontainers::core::IntoContainerPort;
    use testcontainers::runners::AsyncRunner;
    use testcontainers::{ContainerAsync, GenericImage, ImageExt};

    use super::*;
    use crate::api::{GuestDetails, GuestId};
    use crate::guests_repository::{GuestsRepository, PostgresGuestsRepository};
    use crate::storage::PostgresStorageConfig;

    async fn start_postgres_container_and_init_repos() -> (
        ContainerAsync<GenericImage>,
        PostgresGuestsRepository,
        PostgresReservationsRepository,
    ) {
        let _pg_container = GenericImage::new("postgres", "latest")
            .with_mapped_port(5432, 5432.tcp())
            .with_env_var("POSTGRES_USER", "postgres")
            .with_env_var("POSTGRES_PASSWORD", "postgres")
            .start()
            .await
            .expect("Failed to start postgres");

        for _ in 0..10 {
            if let Ok(storage) = PostgresStorage::init(PostgresStorageConfig {
                hostname: "127.0.0.1".to_string(),
                username: "postgres".to_string(),
                password: "postgres".to_string(),
            })
            .await
            {
                let storage = Arc::new(storage);
                return (
                    _pg_container,
                    PostgresGuestsRepository::new(storage.clone()),
                    PostgresReservationsRepository::new(storage),
                );
            }
            tokio::time::sleep(std::time::Duration::from_millis(300)).await;
        }
        panic!("Failed to setup postgres container")
    }

    fn guest_details(first_name: &str, email: &str) -> GuestDetails {
        GuestDetails {
            first_name: first_name.to_string(),
            last_name: "Lovelace".to_string(),
            email: email.to_string(),
            phone: "555-0100".to_string(),
        }
    }

    fn reservation_details(room_number: &str, guest_id: GuestId) -> ReservationDetails {
        ReservationDetails {
            room_number: room_number.to_string(),
            check_in: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2024, 1, 12).unwrap(),
            guest_id,
            total_price: Decimal::new(19999, 2),
        }
    }

    #[tokio::test]
    #[file_serial(key, path => "../.pgtestslock")]
    /// Simple test to cover reservation management
    /// Combined into big unit test to avoid duplicate setup
    /// 1. Adds reservation for missing guest - rejected
    /// 2. Adds two guests with reservations, lists them with guest names
    /// 3. Deletes first guest - only its reservations are gone
    async fn test_reservation_management() {
        let (_container, guests, repository) = start_postgres_container_and_init_repos().await;

        assert_eq!(
            repository.list_reservations().await.unwrap(),
            Vec::<ReservationWithGuest>::default()
        );

        let missing_guest = repository
            .add_reservation(reservation_details("101", 1000))
            .await;
        assert!(matches!(
            missing_guest,
            Err(StorageError::GuestNotFound(1000))
        ));

        let ada_id = guests
            .add_guest(guest_details("Ada", "ada@example.com"))
            .await
            .unwrap();
        let byron_id = guests
            .add_guest(guest_details("Byron", "byron@example.com"))
            .await
            .unwrap();

        let ada_reservation_id = repository
            .add_reservation(reservation_details("101", ada_id))
            .await
            .unwrap();
        repository
            .add_reservation(reservation_details("102", ada_id))
            .await
            .unwrap();
        let byron_reservation_id = repository
            .add_reservation(reservation_details("201", byron_id))
            .await
            .unwrap();

        let listed = repository.list_reservations().await.unwrap();
        assert_eq!(listed.len(), 3);
        assert_eq!(
            listed[0],
            ReservationWithGuest {
                reservation: Reservation {
                    reservation_id: ada_reservation_id,
                    details: reservation_details("101", ada_id),
                },
                guest: GuestName {
                    first_name: "Ada".to_string(),
                    last_name: "Lovelace".to_string(),
                },
            }
        );

        assert_eq!(guests.delete_guest(ada_id).await.unwrap(), 2);

        let listed = repository.list_reservations().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].reservation.reservation_id, byron_reservation_id);
    }
}
