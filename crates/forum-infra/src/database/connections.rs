//! Database connection management.

use std::time::Duration;

#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Configuration for the database connection pool.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// The live connection handle shared by all repositories.
#[cfg(feature = "postgres")]
pub struct DatabaseConnection {
    pub conn: DbConn,
}

#[cfg(feature = "postgres")]
impl DatabaseConnection {
    /// Connect to the database described by `config`.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(true)
            .to_owned();

        let conn = Database::connect(opts).await?;
        tracing::info!(pool = config.max_connections, "Database connected");

        Ok(Self { conn })
    }
}
