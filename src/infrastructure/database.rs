//! Pooled SQLite connection

use crate::config::DatabaseLocation;
use di::ServiceDescriptor;
use sqlx::SqlitePool;
use sqlx::migrate::MigrateError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::ops::Deref;
use std::path::Path;
use std::str::FromStr;

pub struct DatabaseConnection {
    connection: SqlitePool,
}

impl DatabaseConnection {
    pub fn from_pool(pool: SqlitePool) -> Self {
        DatabaseConnection { connection: pool }
    }

    /// Registers `pool` as the one connection every repository shares.
    pub fn service(pool: SqlitePool) -> ServiceDescriptor {
        di::existing_as_self(DatabaseConnection::from_pool(pool))
    }
}

/// Pool that opens connections on first use, so a missing database file
/// surfaces as an error on the first query rather than at startup.
pub fn lazy_pool(location: &DatabaseLocation) -> Result<SqlitePool, sqlx::Error> {
    let options = match location {
        DatabaseLocation::Url(url) => SqliteConnectOptions::from_str(url)?,
        // SQLite reads a name starting with `file:` as a URI.
        DatabaseLocation::Path(path) if path.to_string_lossy().starts_with("file:") => {
            SqliteConnectOptions::new().filename(Path::new(".").join(path))
        }
        DatabaseLocation::Path(path) => SqliteConnectOptions::new().filename(path),
    };

    Ok(SqlitePoolOptions::new()
        .max_connections(5)
        .connect_lazy_with(options))
}

/// Creates the `users` and `bookings` tables when they are missing.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!().run(pool).await
}

impl Deref for DatabaseConnection {
    type Target = SqlitePool;

    fn deref(&self) -> &Self::Target {
        &self.connection
    }
}
