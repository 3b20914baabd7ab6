use std::sync::Arc;

use tokio_postgres::error::SqlState;
use tokio_postgres::{Row, Statement};
use validator::Validate;

use crate::api::{Guest, GuestDetails, GuestId};
use crate::guests_repository::GuestsRepository;
use crate::storage::{is_violation, PostgresStorage, StorageError};

pub struct PostgresGuestsRepository {
    storage: Arc<PostgresStorage>,
}

impl PostgresGuestsRepository {
    pub fn new(storage: Arc<PostgresStorage>) -> Self {
        Self { storage }
    }
}

fn guest_from_row(row: &Row) -> Result<Guest, StorageError> {
    Ok(Guest {
        guest_id: row.try_get(0)?,
        details: GuestDetails {
            first_name: row.try_get(1)?,
            last_name: row.try_get(2)?,
            email: row.try_get(3)?,
            phone: row.try_get(4)?,
        },
        created_at: row.try_get(5)?,
    })
}

#[async_trait::async_trait]
impl GuestsRepository for PostgresGuestsRepository {
    async fn add_guest(&self, details: GuestDetails) -> Result<GuestId, StorageError> {
        details.validate()?;

        let client = self.storage.client();
        let stmt: Statement = client
            .prepare(
                "INSERT INTO guests (first_name, last_name, email, phone) VALUES ($1, $2, $3, $4) RETURNING id",
            )
            .await?;

        let rows = client
            .query(
                &stmt,
                &[
                    &details.first_name,
                    &details.last_name,
                    &details.email,
                    &details.phone,
                ],
            )
            .await;

        match rows {
            Ok(rows) => Ok(rows
                .first()
                .ok_or_else(|| StorageError::Other("Id not returned".to_string()))?
                .try_get(0)?),
            Err(err) if is_violation(&err, &SqlState::UNIQUE_VIOLATION) => {
                Err(StorageError::EmailAlreadyTaken(details.email))
            }
            Err(other_err) => Err(other_err.into()),
        }
    }

    async fn get_guest(&self, guest_id: GuestId) -> Result<Guest, StorageError> {
        let client = self.storage.client();
        let stmt: Statement = client
            .prepare(
                "SELECT id, first_name, last_name, email, phone, created_at FROM guests WHERE id = $1",
            )
            .await?;

        let rows = client.query(&stmt, &[&guest_id]).await?;

        guest_from_row(
            rows.first()
                .ok_or(StorageError::GuestNotFound(guest_id))?,
        )
    }

    async fn list_guests(&self) -> Result<Vec<Guest>, StorageError> {
        let client = self.storage.client();
        let stmt: Statement = client
            .prepare(
                "SELECT id, first_name, last_name, email, phone, created_at FROM guests ORDER BY id",
            )
            .await?;

        let rows = client.query(&stmt, &[]).await?;
        rows.iter().map(guest_from_row).collect()
    }

    async fn delete_guest(&self, guest_id: GuestId) -> Result<u64, StorageError> {
        let client = self.storage.client();
        // Single statement, children and parent go away together
        let stmt: Statement = client
            .prepare(
                "
        WITH removed_reservations AS (
            DELETE FROM reservations WHERE guest_id = $1 RETURNING id
        )
        DELETE FROM guests WHERE id = $1
        RETURNING (SELECT COUNT(*) FROM removed_reservations)
        ",
            )
            .await?;

        let rows = client.query(&stmt, &[&guest_id]).await?;

        let removed: i64 = rows
            .first()
            .ok_or(StorageError::GuestNotFound(guest_id))?
            .try_get(0)?;

        tracing::info!(
            "Removed guest {} with {} reservation(s)",
            guest_id,
            removed
        );
        Ok(removed as u64)
    }
}
