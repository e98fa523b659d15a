// libs/booking-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{self, BookingState};

pub fn booking_routes(state: Arc<BookingState>) -> Router {
    Router::new()
        // Core booking management
        .route("/", post(handlers::create_booking))
        .route("/search", get(handlers::search_bookings))
        .route("/{booking_id}", get(handlers::get_booking))
        .route("/{booking_id}/cancel", post(handlers::cancel_booking))
        .route("/{booking_id}/complete", post(handlers::complete_booking))
        // Slot availability
        .route("/availability", get(handlers::get_available_slots))
        // Read-side reporting and configuration
        .route("/stats", get(handlers::get_booking_stats))
        .route("/services", get(handlers::get_service_catalog))
        .route("/professionals", get(handlers::get_professionals))
        .with_state(state)
}
