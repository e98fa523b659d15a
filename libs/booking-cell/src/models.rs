// libs/booking-cell/src/models.rs
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ==============================================================================
// CORE BOOKING MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub id: Uuid,
    pub client_name: String,
    pub client_email: Option<String>,
    pub client_phone: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub service: String,
    pub professional: String,
    pub notes: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// True when this record holds the `(date, time, professional)` slot.
    pub fn occupies(&self, date: NaiveDate, time: NaiveTime, professional: &str) -> bool {
        self.status == BookingStatus::Confirmed
            && self.date == date
            && self.time == time
            && self.professional == professional
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    /// Terminal statuses admit no further transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Completed)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatus::Confirmed => write!(f, "confirmed"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
            BookingStatus::Completed => write!(f, "completed"),
        }
    }
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub client_name: String,
    pub client_email: Option<String>,
    pub client_phone: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub service: String,
    pub professional: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingSearchQuery {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub status: Option<BookingStatus>,
    pub professional: Option<String>,
}

// ==============================================================================
// STATISTICS MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingStats {
    pub total_bookings: i64,
    pub confirmed_bookings: i64,
    pub completed_bookings: i64,
    pub cancelled_bookings: i64,
    /// `(service, bookings)` pairs, most requested first.
    pub service_breakdown: Vec<(String, i64)>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum BookingError {
    #[error("Booking not found")]
    NotFound,

    #[error("Requested slot is not available")]
    SlotUnavailable,

    #[error("Booking cannot be modified in current status: {0}")]
    InvalidTransition(BookingStatus),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Stored booking data is corrupt: {0}")]
    StorageCorrupt(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

// ==============================================================================
// SERDE HELPERS
// ==============================================================================

/// Slot times travel as `HH:MM`; `HH:MM:SS` is accepted on input for
/// compatibility with stores written by other tooling.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&BookingStatus::Confirmed).unwrap(),
            "\"confirmed\""
        );
        assert_eq!(
            serde_json::from_str::<BookingStatus>("\"completed\"").unwrap(),
            BookingStatus::Completed
        );
    }

    #[test]
    fn time_round_trips_as_hhmm() {
        let json = r#"{
            "client_name": "Ana Silva",
            "client_email": null,
            "client_phone": "1111-1111",
            "date": "2025-07-01",
            "time": "10:00",
            "service": "Haircut",
            "professional": "João",
            "notes": null
        }"#;

        let request: CreateBookingRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.time, NaiveTime::from_hms_opt(10, 0, 0).unwrap());

        let serialized = serde_json::to_value(&request).unwrap();
        assert_eq!(serialized["time"], "10:00");
    }

    #[test]
    fn time_accepts_seconds_on_input() {
        let value = serde_json::json!("09:30:00");
        let time: NaiveTime =
            hhmm::deserialize(value).expect("HH:MM:SS should parse");
        assert_eq!(time, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
    }
}
