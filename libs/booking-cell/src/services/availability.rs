use chrono::{Duration, NaiveDate, NaiveTime};
use tracing::debug;

use shared_config::AppConfig;

use crate::models::Booking;

/// Pure slot math over the configured operating hours. Holds no state beyond
/// the schedule configuration and performs no I/O.
pub struct AvailabilityService {
    opening_time: NaiveTime,
    closing_time: NaiveTime,
    slot_interval_minutes: u32,
}

impl AvailabilityService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            opening_time: config.opening_time,
            closing_time: config.closing_time,
            slot_interval_minutes: config.slot_interval_minutes,
        }
    }

    /// Compute the bookable slots for a professional on a date, ascending.
    ///
    /// Slot boundaries run from opening to closing time inclusive; the
    /// closing boundary itself is a valid bookable start. A slot is bookable
    /// iff no confirmed booking holds the same `(date, time, professional)`
    /// triple. An undefined date yields no bookable times.
    pub fn available_slots(
        &self,
        date: Option<NaiveDate>,
        professional: &str,
        bookings: &[Booking],
    ) -> Vec<NaiveTime> {
        let Some(date) = date else {
            return Vec::new();
        };

        let step = Duration::minutes(i64::from(self.slot_interval_minutes));
        let mut slots = Vec::new();
        let mut current = self.opening_time;

        loop {
            if current > self.closing_time {
                break;
            }
            if !bookings.iter().any(|b| b.occupies(date, current, professional)) {
                slots.push(current);
            }
            let (next, wrapped_days) = current.overflowing_add_signed(step);
            if wrapped_days != 0 {
                // Stepping past midnight ends the scan.
                break;
            }
            current = next;
        }

        debug!(
            "{} slots available for {} on {}",
            slots.len(),
            professional,
            date
        );
        slots
    }

    /// Membership check used by the booking path: the requested time must be
    /// one of the currently bookable slots.
    pub fn is_available(
        &self,
        date: NaiveDate,
        time: NaiveTime,
        professional: &str,
        bookings: &[Booking],
    ) -> bool {
        self.available_slots(Some(date), professional, bookings)
            .contains(&time)
    }
}
