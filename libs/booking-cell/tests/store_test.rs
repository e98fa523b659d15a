use std::fs;

use chrono::{NaiveDate, NaiveTime, Utc};
use tempfile::TempDir;
use uuid::Uuid;

use booking_cell::models::{Booking, BookingError, BookingStatus};
use booking_cell::store::BookingStore;

fn sample_booking(time: &str, status: BookingStatus) -> Booking {
    Booking {
        id: Uuid::new_v4(),
        client_name: "Ana Silva".to_string(),
        client_email: None,
        client_phone: "1111-1111".to_string(),
        date: NaiveDate::parse_from_str("2025-07-01", "%Y-%m-%d").unwrap(),
        time: NaiveTime::parse_from_str(time, "%H:%M").unwrap(),
        service: "Haircut".to_string(),
        professional: "João".to_string(),
        notes: Some("first visit".to_string()),
        status,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn missing_file_loads_as_empty_collection() {
    let dir = TempDir::new().unwrap();
    let store = BookingStore::new(dir.path().join("bookings.json"));

    assert_eq!(store.load().unwrap(), vec![]);
}

#[test]
fn save_then_load_round_trips_field_for_field() {
    let dir = TempDir::new().unwrap();
    let store = BookingStore::new(dir.path().join("bookings.json"));

    let bookings = vec![
        sample_booking("10:00", BookingStatus::Confirmed),
        sample_booking("11:00", BookingStatus::Cancelled),
        sample_booking("12:00", BookingStatus::Completed),
    ];

    store.save(&bookings).unwrap();
    let reloaded = store.load().unwrap();

    assert_eq!(reloaded, bookings);

    // save(load()) is a no-op on well-formed data
    store.save(&reloaded).unwrap();
    assert_eq!(store.load().unwrap(), bookings);
}

#[test]
fn unparseable_document_is_corrupt() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bookings.json");
    fs::write(&path, "{ not json at all").unwrap();

    let store = BookingStore::new(path);

    assert!(matches!(
        store.load(),
        Err(BookingError::StorageCorrupt(_))
    ));
}

#[test]
fn record_missing_required_field_is_corrupt() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bookings.json");
    // No client_name
    fs::write(
        &path,
        r#"[{
            "id": "6f2b9e0a-55ac-4b7e-9f51-0a7a1c6f7a10",
            "client_email": null,
            "client_phone": "1111-1111",
            "date": "2025-07-01",
            "time": "10:00",
            "service": "Haircut",
            "professional": "João",
            "notes": null,
            "status": "confirmed",
            "created_at": "2025-06-01T12:00:00Z",
            "updated_at": "2025-06-01T12:00:00Z"
        }]"#,
    )
    .unwrap();

    let store = BookingStore::new(path);

    assert!(matches!(
        store.load(),
        Err(BookingError::StorageCorrupt(_))
    ));
}

#[test]
fn invalid_status_value_is_corrupt() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bookings.json");
    fs::write(
        &path,
        r#"[{
            "id": "6f2b9e0a-55ac-4b7e-9f51-0a7a1c6f7a10",
            "client_name": "Ana Silva",
            "client_email": null,
            "client_phone": "1111-1111",
            "date": "2025-07-01",
            "time": "10:00",
            "service": "Haircut",
            "professional": "João",
            "notes": null,
            "status": "rescheduled",
            "created_at": "2025-06-01T12:00:00Z",
            "updated_at": "2025-06-01T12:00:00Z"
        }]"#,
    )
    .unwrap();

    let store = BookingStore::new(path);

    assert!(matches!(
        store.load(),
        Err(BookingError::StorageCorrupt(_))
    ));
}

#[test]
fn save_into_missing_directory_is_unavailable() {
    let dir = TempDir::new().unwrap();
    let store = BookingStore::new(dir.path().join("gone").join("bookings.json"));

    assert!(matches!(
        store.save(&[sample_booking("10:00", BookingStatus::Confirmed)]),
        Err(BookingError::StorageUnavailable(_))
    ));
}

#[test]
fn save_leaves_no_temp_file_behind() {
    let dir = TempDir::new().unwrap();
    let store = BookingStore::new(dir.path().join("bookings.json"));

    store
        .save(&[sample_booking("10:00", BookingStatus::Confirmed)])
        .unwrap();

    let entries: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, vec!["bookings.json".to_string()]);
}
