//! Travel statistics derived from the flight log.
//!
//! Stats are never stored. They are recomputed from the current flights and
//! settings on every read, so there is nothing to go stale.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{Flight, UserSettings};
use crate::time_utils::start_of_day;

/// Approximate number of sovereign countries.
pub const TOTAL_COUNTRIES: u32 = 195;

/// Aggregate metrics over the whole flight log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AppStats {
    pub total_flights: u32,
    /// Air time in hours, unrounded
    pub total_hours: f64,
    /// Kilometers flown
    pub total_distance: f64,
    /// Distinct origin/destination country names
    pub countries_visited: u32,
    /// Distinct origin/destination airport codes
    pub airports_visited: u32,
    pub percent_world_visited: f64,
    /// Share of the user's life spent in the air
    pub percent_life_flown: f64,
}

impl AppStats {
    /// Compute stats for `flights` as of `now`.
    ///
    /// Total for any input: the empty log yields all zeros, and every
    /// division that could hit zero short-circuits to 0 instead.
    pub fn compute(flights: &[Flight], settings: &UserSettings, now: DateTime<Utc>) -> Self {
        let total_minutes: u64 = flights
            .iter()
            .map(|f| u64::from(f.duration_minutes))
            .sum();
        let total_distance: f64 = flights.iter().map(|f| f.distance_km).sum();

        let mut countries = HashSet::new();
        let mut airports = HashSet::new();
        for flight in flights {
            countries.insert(flight.origin.country.as_str());
            countries.insert(flight.destination.country.as_str());
            airports.insert(flight.origin.code.as_str());
            airports.insert(flight.destination.code.as_str());
        }

        let countries_visited = countries.len() as u32;

        Self {
            total_flights: flights.len() as u32,
            total_hours: total_minutes as f64 / 60.0,
            total_distance,
            countries_visited,
            airports_visited: airports.len() as u32,
            percent_world_visited: f64::from(countries_visited) / f64::from(TOTAL_COUNTRIES)
                * 100.0,
            percent_life_flown: percent_life_flown(total_minutes, settings.birthday, now),
        }
    }
}

/// Minutes flown as a percentage of minutes lived since `birthday`.
fn percent_life_flown(total_minutes: u64, birthday: Option<NaiveDate>, now: DateTime<Utc>) -> f64 {
    let Some(birthday) = birthday else {
        return 0.0;
    };

    let life_minutes = now
        .signed_duration_since(start_of_day(birthday))
        .num_milliseconds() as f64
        / 60_000.0;

    if life_minutes <= 0.0 || total_minutes == 0 {
        return 0.0;
    }

    total_minutes as f64 / life_minutes * 100.0
}
