//! Process configuration read from the environment (and `.env`).

use anyhow::{Context, bail};
use std::env;
use std::path::PathBuf;

/// Where the store shared with the CRM lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    /// sqlx connection URL, taken as given.
    Url(String),
    /// Database file on disk. Never parsed as a URL, so `?`, `#` and `%` stay literal.
    Path(PathBuf),
}

/// Everything the bot needs before it can start polling.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub telegram_token: String,
    pub database: DatabaseLocation,
    /// Create the CRM tables when they are missing; meant for local development.
    pub run_migrations: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<AppConfig> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<AppConfig> {
        let telegram_token = lookup("TELOXIDE_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .context("TELOXIDE_TOKEN must be set")?;

        let database = match (lookup("DATABASE_URL"), lookup("BOOKING_DB_PATH")) {
            (Some(url), _) if !url.trim().is_empty() => DatabaseLocation::Url(url),
            (_, Some(path)) if !path.trim().is_empty() => {
                DatabaseLocation::Path(PathBuf::from(path.trim()))
            }
            _ => bail!("either DATABASE_URL or BOOKING_DB_PATH must be set"),
        };

        let run_migrations = lookup("RUN_MIGRATIONS")
            .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(AppConfig {
            telegram_token,
            database,
            run_migrations,
        })
    }
}
