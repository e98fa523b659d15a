use std::sync::Arc;

use axum::{routing::get, Router};

use booking_cell::handlers::BookingState;
use booking_cell::router::booking_routes;

pub fn create_router(state: Arc<BookingState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Booking API is running!" }))
        .nest("/bookings", booking_routes(state))
}
