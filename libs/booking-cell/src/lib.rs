pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod store;

// Re-export the core types for external use
pub use models::{
    Booking, BookingError, BookingSearchQuery, BookingStats, BookingStatus, CreateBookingRequest,
};
pub use services::booking::BookingService;
