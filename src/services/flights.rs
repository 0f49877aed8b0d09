// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Flight store: the authoritative, ordered flight log.
//!
//! Every mutation is written through to the key/value store immediately. On
//! startup the persisted log is loaded, falling back to a small seed dataset
//! when nothing is stored or the document does not parse.

use chrono::{DateTime, TimeZone, Utc};
use ring::rand::{SecureRandom, SystemRandom};
use std::sync::Arc;

use crate::models::{Airport, DraftError, Flight, FlightDraft};
use crate::storage::{keys, KeyValueStore};

/// Random bytes per flight id (hex-encoded, so ids are twice this long).
const FLIGHT_ID_BYTES: usize = 6;

/// Ordered flight collection, oldest first.
pub struct FlightStore {
    flights: Vec<Flight>,
    storage: Arc<dyn KeyValueStore>,
}

impl FlightStore {
    /// Load the persisted log, or the seed flights if there is none.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let flights = match storage.get(keys::FLIGHTS) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<Flight>>(&json) {
                Ok(flights) => {
                    tracing::info!(count = flights.len(), "Loaded flight log");
                    flights
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Stored flight log is corrupt, using seed flights");
                    seed_flights()
                }
            },
            Ok(None) => {
                tracing::info!("No stored flight log, using seed flights");
                seed_flights()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read flight log, using seed flights");
                seed_flights()
            }
        };

        Self { flights, storage }
    }

    /// Current snapshot in insertion order.
    pub fn list(&self) -> &[Flight] {
        &self.flights
    }

    pub fn get(&self, id: &str) -> Option<&Flight> {
        self.flights.iter().find(|f| f.id == id)
    }

    /// Insert or replace a flight.
    ///
    /// A flight whose id is already present replaces that entry in place;
    /// otherwise it is appended.
    pub fn save(&mut self, flight: Flight) -> &[Flight] {
        match self.flights.iter_mut().find(|f| f.id == flight.id) {
            Some(existing) => {
                tracing::debug!(flight_id = %flight.id, "Updating flight");
                *existing = flight;
            }
            None => {
                tracing::debug!(flight_id = %flight.id, "Adding flight");
                self.flights.push(flight);
            }
        }
        self.persist();
        &self.flights
    }

    /// Convert a form draft and save it.
    ///
    /// A draft without an id (or with an empty one) gets a new random id.
    pub fn save_draft(
        &mut self,
        mut draft: FlightDraft,
        now: DateTime<Utc>,
    ) -> Result<Flight, DraftError> {
        let id = match draft.id.take().filter(|id| !id.trim().is_empty()) {
            Some(id) => id,
            None => generate_flight_id()?,
        };
        let flight = draft.into_flight(id, now)?;
        self.save(flight.clone());
        Ok(flight)
    }

    /// Delete a flight. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.flights.len();
        self.flights.retain(|f| f.id != id);
        let removed = self.flights.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    /// Write the whole log through to storage.
    ///
    /// Blocking I/O on purpose: it runs under the caller's write lock, so
    /// documents land in the same order as the mutations that produced them.
    /// The log is a few kilobytes.
    fn persist(&self) {
        let json = match serde_json::to_string(&self.flights) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize flight log");
                return;
            }
        };
        if let Err(e) = self.storage.set(keys::FLIGHTS, &json) {
            tracing::warn!(error = %e, "Failed to persist flight log");
        }
    }
}

/// New random flight id.
pub fn generate_flight_id() -> Result<String, DraftError> {
    let mut bytes = [0u8; FLIGHT_ID_BYTES];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| DraftError::IdGeneration)?;
    Ok(hex::encode(bytes))
}

/// Built-in flights shown on first run.
pub fn seed_flights() -> Vec<Flight> {
    vec![
        Flight {
            id: "1".to_string(),
            flight_number: "LH454".to_string(),
            airline: "Lufthansa".to_string(),
            airline_iata: Some("LH".to_string()),
            origin: Airport {
                code: "FRA".to_string(),
                name: "Frankfurt Airport".to_string(),
                city: "Frankfurt".to_string(),
                country: "Germany".to_string(),
                lat: 50.0333,
                lng: 8.5705,
            },
            destination: Airport {
                code: "SFO".to_string(),
                name: "San Francisco Intl".to_string(),
                city: "San Francisco".to_string(),
                country: "USA".to_string(),
                lat: 37.6213,
                lng: -122.3790,
            },
            date: seed_date(2024, 5, 12, 10, 0),
            duration_minutes: 660,
            distance_km: 9150.0,
        },
        Flight {
            id: "2".to_string(),
            flight_number: "NH2".to_string(),
            airline: "ANA".to_string(),
            airline_iata: Some("NH".to_string()),
            origin: Airport {
                code: "NRT".to_string(),
                name: "Narita Intl".to_string(),
                city: "Tokyo".to_string(),
                country: "Japan".to_string(),
                lat: 35.7720,
                lng: 140.3929,
            },
            destination: Airport {
                code: "IAD".to_string(),
                name: "Dulles Intl".to_string(),
                city: "Washington D.C.".to_string(),
                country: "USA".to_string(),
                lat: 38.9445,
                lng: -77.4558,
            },
            date: seed_date(2024, 8, 20, 14, 30),
            duration_minutes: 800,
            distance_km: 10860.0,
        },
    ]
}

fn seed_date(year: i32, month: u32, day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, 0)
        .single()
        .unwrap_or_default()
}
