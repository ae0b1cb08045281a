//! Infrastructure traits, used for DI on higher levels

use crate::infrastructure::entities;
use async_trait::async_trait;

#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Id of the user whose phone and password hash both match exactly.
    async fn find_user_id(&self, phone: &str, password_hash: &str) -> anyhow::Result<Option<i64>>;

    /// Hash stored for `phone`, used to explain refused logins.
    async fn stored_password_hash(&self, phone: &str) -> anyhow::Result<Option<String>>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Appends a booking and returns its row id.
    async fn create_booking(&self, booking: entities::NewBooking) -> anyhow::Result<i64>;

    /// Most recent bookings first, ordered by the stored date string.
    async fn list_recent_bookings(&self, limit: u32) -> anyhow::Result<Vec<entities::Booking>>;
}
