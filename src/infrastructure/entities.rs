//! Database entities

use sqlx::FromRow;

/// Status the bot writes. Later states are set by the CRM and read back as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    Pending,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
        }
    }
}

/// Row of the `bookings` table.
#[derive(Debug, Clone, FromRow)]
pub struct Booking {
    pub id: i64,
    pub name: String,
    pub phone: String,
    /// Free-form "date time" string, sorted lexicographically.
    pub date: String,
    /// 0/1 flag set by the CRM once the client paid.
    pub bought: i64,
    /// Kept as stored so statuses set by the CRM always display.
    pub status: String,
}

/// Values inserted for a new booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub name: String,
    pub phone: String,
    pub date: String,
    pub bought: bool,
    pub status: BookingStatus,
}

impl NewBooking {
    /// A not yet paid booking awaiting the visit.
    pub fn pending(name: String, phone: String, date: String) -> Self {
        NewBooking {
            name,
            phone,
            date,
            bought: false,
            status: BookingStatus::Pending,
        }
    }
}
