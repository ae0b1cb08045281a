//! DB Repository abstractions

use crate::infrastructure::database::DatabaseConnection;
use crate::infrastructure::entities::{Booking, NewBooking};
use crate::infrastructure::traits::{BookingRepository, CredentialRepository};
use anyhow::Context;
use async_trait::async_trait;
use di::{Ref, injectable};
use log::{debug, error};

#[injectable(CredentialRepository)]
pub struct DbCredentialRepository {
    connection: Ref<DatabaseConnection>,
}

impl DbCredentialRepository {
    pub fn new(connection: Ref<DatabaseConnection>) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl CredentialRepository for DbCredentialRepository {
    async fn find_user_id(&self, phone: &str, password_hash: &str) -> anyhow::Result<Option<i64>> {
        let row: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM users WHERE phone = ? AND password_hash = ?")
                .bind(phone)
                .bind(password_hash)
                .fetch_optional(&**self.connection)
                .await
                .inspect_err(|e| error!("credential lookup failed: {e}"))
                .context("could not check credentials")?;

        Ok(row.map(|(id,)| id))
    }

    async fn stored_password_hash(&self, phone: &str) -> anyhow::Result<Option<String>> {
        let row: Option<(Option<String>,)> =
            sqlx::query_as("SELECT password_hash FROM users WHERE phone = ?")
                .bind(phone)
                .fetch_optional(&**self.connection)
                .await
                .inspect_err(|e| error!("password hash lookup failed: {e}"))
                .context("could not read password hash")?;

        Ok(row.and_then(|(hash,)| hash))
    }
}

#[injectable(BookingRepository)]
pub struct DbBookingRepository {
    connection: Ref<DatabaseConnection>,
}

impl DbBookingRepository {
    pub fn new(connection: Ref<DatabaseConnection>) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl BookingRepository for DbBookingRepository {
    async fn create_booking(&self, booking: NewBooking) -> anyhow::Result<i64> {
        let result = sqlx::query(
            "INSERT INTO bookings (name, phone, date, bought, status) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&booking.name)
        .bind(&booking.phone)
        .bind(&booking.date)
        .bind(booking.bought as i64)
        .bind(booking.status.as_str())
        .execute(&**self.connection)
        .await
        .inspect_err(|e| error!("booking insert failed: {e}"))
        .context("could not store booking")?;

        let id = result.last_insert_rowid();
        debug!("booking {id} stored for {}", booking.date);
        Ok(id)
    }

    async fn list_recent_bookings(&self, limit: u32) -> anyhow::Result<Vec<Booking>> {
        // Ordering is on the raw text, which is only chronological for zero-padded dates.
        sqlx::query_as(
            "SELECT id, COALESCE(name, '') AS name, COALESCE(phone, '') AS phone, \
             COALESCE(date, '') AS date, COALESCE(bought, 0) AS bought, \
             COALESCE(status, '') AS status \
             FROM bookings ORDER BY date DESC LIMIT ?",
        )
        .bind(i64::from(limit))
        .fetch_all(&**self.connection)
        .await
        .inspect_err(|e| error!("booking listing failed: {e}"))
        .context("could not read bookings")
    }
}
