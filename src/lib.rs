//! Telegram bot registering client appointments in the Nuga Best CRM store - library exports
//!
//! (c) Softlandia 2025

pub mod config;
pub mod core;
pub mod infrastructure;
pub mod telegram;

use crate::core::services::BookingConversationService;
use crate::core::sessions::InMemorySessionStore;
use crate::infrastructure::database::DatabaseConnection;
use crate::infrastructure::repositories::{DbBookingRepository, DbCredentialRepository};
use di::{Injectable, ServiceCollection};
use sqlx::SqlitePool;

/// Every service the bot resolves, backed by `pool`.
pub fn service_collection(pool: SqlitePool) -> ServiceCollection {
    let mut services = ServiceCollection::new();
    services
        .add(DatabaseConnection::service(pool))
        .add(DbCredentialRepository::singleton())
        .add(DbBookingRepository::singleton())
        .add(InMemorySessionStore::singleton())
        .add(BookingConversationService::singleton());
    services
}
