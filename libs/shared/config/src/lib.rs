use std::env;
use std::path::PathBuf;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A bookable service and how long one session takes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceEntry {
    pub name: String,
    pub duration_minutes: u32,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage_path: PathBuf,
    pub opening_time: NaiveTime,
    pub closing_time: NaiveTime,
    pub slot_interval_minutes: u32,
    pub professionals: Vec<String>,
    pub services: Vec<ServiceEntry>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            storage_path: env::var("BOOKING_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    warn!("BOOKING_STORAGE_PATH not set, using bookings.json");
                    PathBuf::from("bookings.json")
                }),
            opening_time: parse_time_var("BOOKING_OPENING_TIME", "08:00"),
            closing_time: parse_time_var("BOOKING_CLOSING_TIME", "18:00"),
            slot_interval_minutes: env::var("BOOKING_SLOT_INTERVAL_MINUTES")
                .ok()
                .and_then(|raw| match raw.parse::<u32>() {
                    Ok(minutes) if minutes > 0 => Some(minutes),
                    _ => {
                        warn!("BOOKING_SLOT_INTERVAL_MINUTES invalid, using 30");
                        None
                    }
                })
                .unwrap_or(30),
            professionals: env::var("BOOKING_PROFESSIONALS")
                .map(|raw| parse_professionals(&raw))
                .unwrap_or_else(|_| default_professionals()),
            services: env::var("BOOKING_SERVICES")
                .map(|raw| parse_services(&raw))
                .unwrap_or_else(|_| default_services()),
        };

        if config.opening_time >= config.closing_time {
            warn!("Opening time is not before closing time, falling back to 08:00-18:00");
            return Self {
                opening_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
                closing_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default(),
                ..config
            };
        }

        config
    }

    /// Duration of a catalog service, or None when the name is not in the catalog.
    pub fn service_duration(&self, name: &str) -> Option<u32> {
        self.services
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.duration_minutes)
    }

    pub fn has_professional(&self, name: &str) -> bool {
        self.professionals.iter().any(|p| p == name)
    }
}

fn parse_time_var(key: &str, default: &str) -> NaiveTime {
    match env::var(key) {
        Ok(raw) => NaiveTime::parse_from_str(&raw, "%H:%M").unwrap_or_else(|_| {
            warn!("{} is not a valid HH:MM time, using {}", key, default);
            parse_default_time(default)
        }),
        Err(_) => parse_default_time(default),
    }
}

fn parse_default_time(default: &str) -> NaiveTime {
    NaiveTime::parse_from_str(default, "%H:%M").unwrap_or_default()
}

fn parse_professionals(raw: &str) -> Vec<String> {
    let roster: Vec<String> = raw
        .split(',')
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();

    if roster.is_empty() {
        warn!("BOOKING_PROFESSIONALS is empty, using default roster");
        return default_professionals();
    }

    roster
}

fn parse_services(raw: &str) -> Vec<ServiceEntry> {
    let mut catalog = Vec::new();

    for entry in raw.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        match entry.rsplit_once(':') {
            Some((name, minutes)) => match minutes.trim().parse::<u32>() {
                Ok(duration_minutes) if duration_minutes > 0 => catalog.push(ServiceEntry {
                    name: name.trim().to_string(),
                    duration_minutes,
                }),
                _ => warn!("Ignoring service entry with invalid duration: {}", entry),
            },
            None => warn!("Ignoring malformed service entry: {}", entry),
        }
    }

    if catalog.is_empty() {
        warn!("BOOKING_SERVICES is empty, using default catalog");
        return default_services();
    }

    catalog
}

fn default_professionals() -> Vec<String> {
    ["João", "Maria", "Carlos", "Ana"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_services() -> Vec<ServiceEntry> {
    [
        ("Haircut", 30),
        ("Beard Trim", 20),
        ("Haircut + Beard", 45),
        ("Coloring", 60),
        ("Hydration", 40),
        ("Manicure", 30),
        ("Pedicure", 30),
    ]
    .into_iter()
    .map(|(name, duration_minutes)| ServiceEntry {
        name: name.to_string(),
        duration_minutes,
    })
    .collect()
}
