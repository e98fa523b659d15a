// libs/booking-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{BookingError, BookingSearchQuery, BookingStatus, CreateBookingRequest};
use crate::services::booking::BookingService;

/// Shared application state: the one Booking Manager instance constructed at
/// startup plus the immutable configuration, passed by handle to every route.
pub struct BookingState {
    pub config: AppConfig,
    pub bookings: BookingService,
}

// ==============================================================================
// QUERY PARAMETER STRUCTS
// ==============================================================================

#[derive(Debug, Deserialize)]
pub struct BookingQueryParams {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub status: Option<BookingStatus>,
    pub professional: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQueryParams {
    pub date: Option<String>,
    pub professional: String,
}

// ==============================================================================
// BOOKING HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<BookingState>>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<Json<Value>, AppError> {
    let booking = state
        .bookings
        .create(request)
        .await
        .map_err(map_booking_error)?;

    Ok(Json(json!({
        "success": true,
        "booking": booking,
        "message": "Booking confirmed"
    })))
}

#[axum::debug_handler]
pub async fn search_bookings(
    State(state): State<Arc<BookingState>>,
    Query(params): Query<BookingQueryParams>,
) -> Result<Json<Value>, AppError> {
    let query = BookingSearchQuery {
        date_from: params.date_from,
        date_to: params.date_to,
        status: params.status,
        professional: params.professional,
    };

    let bookings = state.bookings.search(query).await;

    Ok(Json(json!({
        "success": true,
        "count": bookings.len(),
        "bookings": bookings
    })))
}

#[axum::debug_handler]
pub async fn get_booking(
    State(state): State<Arc<BookingState>>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let booking = state
        .bookings
        .get(booking_id)
        .await
        .map_err(map_booking_error)?;

    Ok(Json(json!({
        "success": true,
        "booking": booking
    })))
}

#[axum::debug_handler]
pub async fn cancel_booking(
    State(state): State<Arc<BookingState>>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let booking = state
        .bookings
        .cancel(booking_id)
        .await
        .map_err(map_booking_error)?;

    Ok(Json(json!({
        "success": true,
        "booking": booking,
        "message": "Booking cancelled"
    })))
}

#[axum::debug_handler]
pub async fn complete_booking(
    State(state): State<Arc<BookingState>>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let booking = state
        .bookings
        .complete(booking_id)
        .await
        .map_err(map_booking_error)?;

    Ok(Json(json!({
        "success": true,
        "booking": booking,
        "message": "Booking completed"
    })))
}

// ==============================================================================
// AVAILABILITY AND READ-ONLY CONFIGURATION HANDLERS
// ==============================================================================

/// A blank or missing date is an undefined professional-day: the response is
/// an empty slot list, not an error.
#[axum::debug_handler]
pub async fn get_available_slots(
    State(state): State<Arc<BookingState>>,
    Query(params): Query<AvailabilityQueryParams>,
) -> Result<Json<Value>, AppError> {
    let date = match params.date.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            AppError::ValidationError(format!("Invalid date: {}", raw))
        })?),
    };

    let slots: Vec<String> = state
        .bookings
        .available_slots(date, &params.professional)
        .await
        .iter()
        .map(format_slot)
        .collect();

    Ok(Json(json!({
        "success": true,
        "professional": params.professional,
        "slots": slots
    })))
}

#[axum::debug_handler]
pub async fn get_booking_stats(
    State(state): State<Arc<BookingState>>,
) -> Result<Json<Value>, AppError> {
    let stats = state.bookings.stats().await;

    Ok(Json(json!({
        "success": true,
        "stats": stats
    })))
}

#[axum::debug_handler]
pub async fn get_service_catalog(
    State(state): State<Arc<BookingState>>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(json!({
        "success": true,
        "services": state.config.services
    })))
}

#[axum::debug_handler]
pub async fn get_professionals(
    State(state): State<Arc<BookingState>>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(json!({
        "success": true,
        "professionals": state.config.professionals
    })))
}

// ==============================================================================
// ERROR MAPPING
// ==============================================================================

fn map_booking_error(e: BookingError) -> AppError {
    match e {
        BookingError::NotFound => AppError::NotFound("Booking not found".to_string()),
        BookingError::SlotUnavailable => {
            AppError::Conflict("Requested slot is not available".to_string())
        }
        BookingError::InvalidTransition(status) => AppError::Conflict(format!(
            "Booking cannot be modified in current status: {}",
            status
        )),
        BookingError::Validation(msg) => AppError::ValidationError(msg),
        BookingError::StorageCorrupt(msg) | BookingError::StorageUnavailable(msg) => {
            AppError::Internal(msg)
        }
    }
}

fn format_slot(slot: &NaiveTime) -> String {
    slot.format("%H:%M").to_string()
}
