use anyhow::Context;
use tokio_postgres::error::SqlState;
use tokio_postgres::{Client, NoTls};

pub struct PostgresStorageConfig {
    pub hostname: String,
    pub username: String,
    pub password: String,
}

/// Connection shared by the postgres repositories
pub struct PostgresStorage {
    client: Client,
}

impl PostgresStorage {
    pub async fn init(config: PostgresStorageConfig) -> anyhow::Result<Self> {
        let connection_str = format!(
            "postgresql://{}:{}@{}",
            config.username, config.password, config.hostname
        );
        tracing::info!("Postgres host: {}", config.hostname);
        let (client, connection) = tokio_postgres::connect(&connection_str, NoTls)
            .await
            .context("Failed to start postgres")?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("Postgres connection error: {}", e);
            }
        });

        client
            .batch_execute(
                "
        CREATE TABLE IF NOT EXISTS guests (
            id              SERIAL PRIMARY KEY,
            first_name      VARCHAR(100) NOT NULL,
            last_name       VARCHAR(100) NOT NULL,
            email           VARCHAR(254) NOT NULL UNIQUE,
            phone           VARCHAR(15) NOT NULL,
            created_at      TIMESTAMPTZ NOT NULL DEFAULT now()
            )
        ",
            )
            .await
            .context("Failed to setup guests table")?;

        client
            .batch_execute(
                "
        CREATE TABLE IF NOT EXISTS reservations (
            id              SERIAL PRIMARY KEY,
            room_number     VARCHAR(5) NOT NULL,
            check_in        DATE NOT NULL,
            check_out       DATE NOT NULL,
            guest_id        INTEGER NOT NULL REFERENCES guests (id) ON DELETE CASCADE,
            total_price     NUMERIC(10, 2) NOT NULL
            )
        ",
            )
            .await
            .context("Failed to setup reservations table")?;

        Ok(Self { client })
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }
}

pub(crate) fn is_violation(err: &tokio_postgres::Error, state: &SqlState) -> bool {
    err.as_db_error()
        .map(|db_err| db_err.code() == state)
        .unwrap_or_default()
}
