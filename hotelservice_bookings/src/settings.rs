use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::storage::PostgresStorageConfig;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub use_in_memory_db: bool,
    pub db_host: String,
    pub db_username: String,
    pub db_password: String,
    pub http_port: u16,
}

impl Settings {
    /// Defaults, then optional `hotelservice.toml`, then environment variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Environment::default())
    }

    fn load_from(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("use_in_memory_db", false)?
            .set_default("db_host", "127.0.0.1")?
            .set_default("db_username", "postgres")?
            .set_default("db_password", "postgres")?
            .set_default("http_port", 8080)?
            .add_source(File::with_name("hotelservice").required(false))
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn postgres_config(&self) -> PostgresStorageConfig {
        PostgresStorageConfig {
            hostname: self.db_host.clone(),
            username: self.db_username.clone(),
            password: self.db_password.clone(),
        }
    }
}
