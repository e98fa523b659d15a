// libs/booking-cell/src/store.rs
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::models::{Booking, BookingError};

/// Durable record store: the whole booking collection lives in one JSON
/// document, loaded wholesale at startup and rewritten wholesale on every
/// mutation.
#[derive(Debug, Clone)]
pub struct BookingStore {
    path: PathBuf,
}

impl BookingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every booking record. A missing file means no prior data and
    /// yields an empty collection; a file that exists but cannot be parsed
    /// into valid bookings is corrupt.
    pub fn load(&self) -> Result<Vec<Booking>, BookingError> {
        if !self.path.exists() {
            info!("No booking store at {}, starting empty", self.path.display());
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&self.path)
            .map_err(|e| BookingError::StorageUnavailable(e.to_string()))?;

        let bookings: Vec<Booking> =
            serde_json::from_str(&raw).map_err(|e| BookingError::StorageCorrupt(e.to_string()))?;

        debug!(
            "Loaded {} bookings from {}",
            bookings.len(),
            self.path.display()
        );
        Ok(bookings)
    }

    /// Persist the full collection. The document is written to a sibling
    /// temp file and renamed over the target, so a reader never observes a
    /// partially written store.
    pub fn save(&self, bookings: &[Booking]) -> Result<(), BookingError> {
        let serialized = serde_json::to_vec_pretty(bookings)
            .map_err(|e| BookingError::StorageUnavailable(e.to_string()))?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, serialized)
            .map_err(|e| BookingError::StorageUnavailable(e.to_string()))?;
        fs::rename(&tmp_path, &self.path)
            .map_err(|e| BookingError::StorageUnavailable(e.to_string()))?;

        debug!(
            "Saved {} bookings to {}",
            bookings.len(),
            self.path.display()
        );
        Ok(())
    }
}
