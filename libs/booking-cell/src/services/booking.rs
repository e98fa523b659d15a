// libs/booking-cell/src/services/booking.rs
use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_config::AppConfig;

use crate::models::{
    Booking, BookingError, BookingSearchQuery, BookingStats, BookingStatus, CreateBookingRequest,
};
use crate::services::availability::AvailabilityService;
use crate::services::lifecycle::BookingLifecycle;
use crate::store::BookingStore;

/// The only mutator of the booking collection. Mutations hold the write lock
/// across check, in-memory change and persist, so the slot-availability
/// check-then-act sequence is atomic; reads take the read lock and only ever
/// see fully applied states.
pub struct BookingService {
    config: AppConfig,
    availability: AvailabilityService,
    lifecycle: BookingLifecycle,
    store: BookingStore,
    bookings: RwLock<Vec<Booking>>,
}

impl BookingService {
    /// Load the store and build the service. A store that exists but cannot
    /// be parsed surfaces `StorageCorrupt`; callers treat that as fatal.
    pub fn new(config: &AppConfig) -> Result<Self, BookingError> {
        let store = BookingStore::new(&config.storage_path);
        let bookings = store.load()?;

        Ok(Self {
            availability: AvailabilityService::new(config),
            lifecycle: BookingLifecycle::new(),
            config: config.clone(),
            store,
            bookings: RwLock::new(bookings),
        })
    }

    /// Book a slot. The requested time must be one of the currently bookable
    /// slots for the `(date, professional)` pair; a failed persist rolls the
    /// in-memory append back so memory and store never diverge.
    pub async fn create(&self, request: CreateBookingRequest) -> Result<Booking, BookingError> {
        self.validate_create_request(&request)?;

        let mut bookings = self.bookings.write().await;

        if !self.availability.is_available(
            request.date,
            request.time,
            &request.professional,
            &bookings,
        ) {
            warn!(
                "Slot {} {} not available for {}",
                request.date, request.time, request.professional
            );
            return Err(BookingError::SlotUnavailable);
        }

        let now = Utc::now();
        let booking = Booking {
            id: Uuid::new_v4(),
            client_name: request.client_name,
            client_email: request.client_email,
            client_phone: request.client_phone,
            date: request.date,
            time: request.time,
            service: request.service,
            professional: request.professional,
            notes: request.notes,
            status: BookingStatus::Confirmed,
            created_at: now,
            updated_at: now,
        };

        bookings.push(booking.clone());
        if let Err(e) = self.store.save(&bookings) {
            bookings.pop();
            return Err(e);
        }

        info!(
            "Booking {} created for {} with {} on {} {}",
            booking.id, booking.client_name, booking.professional, booking.date, booking.time
        );
        Ok(booking)
    }

    pub async fn cancel(&self, id: Uuid) -> Result<Booking, BookingError> {
        self.transition(id, BookingStatus::Cancelled).await
    }

    pub async fn complete(&self, id: Uuid) -> Result<Booking, BookingError> {
        self.transition(id, BookingStatus::Completed).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Booking, BookingError> {
        let bookings = self.bookings.read().await;
        bookings
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or(BookingError::NotFound)
    }

    /// Search with AND semantics over the supplied filters; unset filters
    /// impose no constraint. Results are ordered ascending by `(date, time)`.
    pub async fn search(&self, query: BookingSearchQuery) -> Vec<Booking> {
        debug!("Searching bookings with filters: {:?}", query);

        let bookings = self.bookings.read().await;
        let mut results: Vec<Booking> = bookings
            .iter()
            .filter(|b| query.date_from.is_none_or(|from| b.date >= from))
            .filter(|b| query.date_to.is_none_or(|to| b.date <= to))
            .filter(|b| query.status.is_none_or(|status| b.status == status))
            .filter(|b| {
                query
                    .professional
                    .as_deref()
                    .is_none_or(|p| b.professional == p)
            })
            .cloned()
            .collect();

        results.sort_by_key(|b| (b.date, b.time));
        results
    }

    pub async fn available_slots(
        &self,
        date: Option<NaiveDate>,
        professional: &str,
    ) -> Vec<NaiveTime> {
        let bookings = self.bookings.read().await;
        self.availability.available_slots(date, professional, &bookings)
    }

    /// Aggregate counts by status plus a per-service breakdown, most
    /// requested service first.
    pub async fn stats(&self) -> BookingStats {
        let bookings = self.bookings.read().await;

        let mut service_counts: BTreeMap<&str, i64> = BTreeMap::new();
        for booking in bookings.iter() {
            *service_counts.entry(booking.service.as_str()).or_insert(0) += 1;
        }
        let mut service_breakdown: Vec<(String, i64)> = service_counts
            .into_iter()
            .map(|(service, count)| (service.to_string(), count))
            .collect();
        service_breakdown.sort_by(|a, b| b.1.cmp(&a.1));

        let count_status = |status: BookingStatus| -> i64 {
            bookings.iter().filter(|b| b.status == status).count() as i64
        };

        BookingStats {
            total_bookings: bookings.len() as i64,
            confirmed_bookings: count_status(BookingStatus::Confirmed),
            completed_bookings: count_status(BookingStatus::Completed),
            cancelled_bookings: count_status(BookingStatus::Cancelled),
            service_breakdown,
        }
    }

    async fn transition(
        &self,
        id: Uuid,
        new_status: BookingStatus,
    ) -> Result<Booking, BookingError> {
        let mut bookings = self.bookings.write().await;

        let index = bookings
            .iter()
            .position(|b| b.id == id)
            .ok_or(BookingError::NotFound)?;

        self.lifecycle
            .validate_status_transition(&bookings[index].status, &new_status)?;

        let previous = bookings[index].clone();
        bookings[index].status = new_status;
        bookings[index].updated_at = Utc::now();

        if let Err(e) = self.store.save(&bookings) {
            bookings[index] = previous;
            return Err(e);
        }

        info!("Booking {} transitioned to {}", id, new_status);
        Ok(bookings[index].clone())
    }

    fn validate_create_request(&self, request: &CreateBookingRequest) -> Result<(), BookingError> {
        if request.client_name.trim().is_empty() {
            return Err(BookingError::Validation(
                "Client name is required".to_string(),
            ));
        }
        if request.client_phone.trim().is_empty() {
            return Err(BookingError::Validation(
                "Client phone is required".to_string(),
            ));
        }
        if self.config.service_duration(&request.service).is_none() {
            return Err(BookingError::Validation(format!(
                "Unknown service: {}",
                request.service
            )));
        }
        if !self.config.has_professional(&request.professional) {
            return Err(BookingError::Validation(format!(
                "Unknown professional: {}",
                request.professional
            )));
        }
        Ok(())
    }
}
