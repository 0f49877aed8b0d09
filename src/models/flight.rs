// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Flight and airport models for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

use crate::time_utils::{flight_date, parse_flight_date};

const DEFAULT_FLIGHT_NUMBER: &str = "FL123";
const DEFAULT_AIRLINE: &str = "Unknown Airline";

/// An airport, embedded by copy into each flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Airport {
    /// IATA code (e.g., "FRA")
    pub code: String,
    /// Display name (e.g., "Frankfurt Airport")
    pub name: String,
    pub city: String,
    pub country: String,
    /// Latitude in degrees (-90..90)
    pub lat: f64,
    /// Longitude in degrees (-180..180)
    pub lng: f64,
}

/// A logged flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Flight {
    /// Random identifier, preserved across edits
    pub id: String,
    /// Free text (e.g., "LH454")
    pub flight_number: String,
    /// Airline display name
    pub airline: String,
    /// 2-letter airline code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airline_iata: Option<String>,
    pub origin: Airport,
    pub destination: Airport,
    #[serde(with = "flight_date")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: DateTime<Utc>,
    pub duration_minutes: u32,
    pub distance_km: f64,
}

impl Flight {
    /// Code used to look up the airline logo.
    ///
    /// Falls back to the letters of the flight number when no airline code
    /// was recorded ("UA240" -> "UA").
    pub fn logo_code(&self) -> String {
        match self.airline_iata.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => code.to_uppercase(),
            _ => self
                .flight_number
                .chars()
                .filter(|c| !c.is_ascii_digit())
                .take(2)
                .collect::<String>()
                .to_uppercase(),
        }
    }

    /// Route label, e.g. "FRA → SFO".
    pub fn route_label(&self) -> String {
        format!("{} → {}", self.origin.code, self.destination.code)
    }
}

/// Partially filled airport, as typed into a form or returned by the parser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AirportDraft {
    #[validate(required(message = "airport code is required"), length(min = 1))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

impl AirportDraft {
    fn normalized(mut self) -> Self {
        self.code = self.code.map(|c| c.trim().to_uppercase());
        self
    }

    fn into_airport(self) -> Airport {
        Airport {
            code: self.code.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            city: self.city.unwrap_or_default(),
            country: self.country.unwrap_or_default(),
            lat: self.lat.unwrap_or_default(),
            lng: self.lng.unwrap_or_default(),
        }
    }
}

impl From<Airport> for AirportDraft {
    fn from(airport: Airport) -> Self {
        Self {
            code: Some(airport.code),
            name: Some(airport.name),
            city: Some(airport.city),
            country: Some(airport.country),
            lat: Some(airport.lat),
            lng: Some(airport.lng),
        }
    }
}

/// Partially filled flight.
///
/// This is both the save-form payload and the text parser's output. `id` is
/// set when editing an existing flight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FlightDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airline_iata: Option<String>,
    #[validate(required(message = "origin airport code is required"), nested)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<AirportDraft>,
    #[validate(required(message = "destination airport code is required"), nested)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<AirportDraft>,
    /// RFC3339 timestamp or `YYYY-MM-DD`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl FlightDraft {
    /// Overlay `update` onto this draft: every field `update` carries wins.
    ///
    /// Nested airports are replaced whole, not merged field by field.
    pub fn merge(self, update: FlightDraft) -> FlightDraft {
        FlightDraft {
            id: update.id.or(self.id),
            flight_number: update.flight_number.or(self.flight_number),
            airline: update.airline.or(self.airline),
            airline_iata: update.airline_iata.or(self.airline_iata),
            origin: update.origin.or(self.origin),
            destination: update.destination.or(self.destination),
            date: update.date.or(self.date),
            duration_minutes: update.duration_minutes.or(self.duration_minutes),
            distance_km: update.distance_km.or(self.distance_km),
        }
    }

    /// Turn the draft into a storable flight.
    ///
    /// Refused when either airport code is missing or blank. Everything else
    /// falls back to a default; an unparseable date becomes `now`.
    pub fn into_flight(self, id: String, now: DateTime<Utc>) -> Result<Flight, DraftError> {
        let draft = FlightDraft {
            origin: self.origin.map(AirportDraft::normalized),
            destination: self.destination.map(AirportDraft::normalized),
            ..self
        };
        draft.validate()?;

        let origin = draft.origin.ok_or(DraftError::MissingAirport("origin"))?;
        let destination = draft
            .destination
            .ok_or(DraftError::MissingAirport("destination"))?;

        Ok(Flight {
            id,
            flight_number: non_blank(draft.flight_number)
                .unwrap_or_else(|| DEFAULT_FLIGHT_NUMBER.to_string()),
            airline: non_blank(draft.airline).unwrap_or_else(|| DEFAULT_AIRLINE.to_string()),
            airline_iata: non_blank(draft.airline_iata).map(|c| c.to_uppercase()),
            origin: origin.into_airport(),
            destination: destination.into_airport(),
            date: draft
                .date
                .as_deref()
                .and_then(parse_flight_date)
                .unwrap_or(now),
            duration_minutes: draft
                .duration_minutes
                .filter(|m| m.is_finite() && *m > 0.0)
                .map_or(0, |m| m.round().min(f64::from(u32::MAX)) as u32),
            distance_km: draft
                .distance_km
                .filter(|d| d.is_finite() && *d > 0.0)
                .unwrap_or(0.0),
        })
    }
}

impl From<Flight> for FlightDraft {
    fn from(flight: Flight) -> Self {
        Self {
            id: Some(flight.id),
            flight_number: Some(flight.flight_number),
            airline: Some(flight.airline),
            airline_iata: flight.airline_iata,
            origin: Some(flight.origin.into()),
            destination: Some(flight.destination.into()),
            date: Some(crate::time_utils::format_utc_rfc3339(flight.date)),
            duration_minutes: Some(f64::from(flight.duration_minutes)),
            distance_km: Some(flight.distance_km),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reasons a draft cannot become a flight.
#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("Incomplete flight: {0}")]
    Invalid(#[from] validator::ValidationErrors),

    #[error("Missing {0} airport")]
    MissingAirport(&'static str),

    #[error("Failed to generate flight id")]
    IdGeneration,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn airport(code: &str, country: &str) -> AirportDraft {
        AirportDraft {
            code: Some(code.to_string()),
            name: Some(format!("{} Intl", code)),
            city: Some(format!("{} City", code)),
            country: Some(country.to_string()),
            lat: Some(10.0),
            lng: Some(20.0),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_into_flight_applies_defaults() {
        let draft = FlightDraft {
            origin: Some(AirportDraft {
                code: Some(" sfo ".to_string()),
                ..Default::default()
            }),
            destination: Some(AirportDraft {
                code: Some("lax".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let flight = draft.into_flight("abc".to_string(), now()).unwrap();

        assert_eq!(flight.id, "abc");
        assert_eq!(flight.flight_number, "FL123");
        assert_eq!(flight.airline, "Unknown Airline");
        assert_eq!(flight.airline_iata, None);
        assert_eq!(flight.origin.code, "SFO");
        assert_eq!(flight.destination.code, "LAX");
        assert_eq!(flight.origin.country, "");
        assert_eq!(flight.date, now());
        assert_eq!(flight.duration_minutes, 0);
        assert_eq!(flight.distance_km, 0.0);
    }

    #[test]
    fn test_into_flight_keeps_given_fields() {
        let draft = FlightDraft {
            flight_number: Some("LH454".to_string()),
            airline: Some("Lufthansa".to_string()),
            airline_iata: Some("lh".to_string()),
            origin: Some(airport("FRA", "Germany")),
            destination: Some(airport("SFO", "USA")),
            date: Some("2024-05-12".to_string()),
            duration_minutes: Some(660.0),
            distance_km: Some(9150.0),
            ..Default::default()
        };

        let flight = draft.into_flight("1".to_string(), now()).unwrap();

        assert_eq!(flight.airline_iata.as_deref(), Some("LH"));
        assert_eq!(flight.origin.country, "Germany");
        assert_eq!(
            flight.date,
            Utc.with_ymd_and_hms(2024, 5, 12, 0, 0, 0).unwrap()
        );
        assert_eq!(flight.duration_minutes, 660);
        assert_eq!(flight.distance_km, 9150.0);
    }

    #[test]
    fn test_into_flight_requires_both_codes() {
        let missing_destination = FlightDraft {
            origin: Some(airport("FRA", "Germany")),
            ..Default::default()
        };
        assert!(matches!(
            missing_destination.into_flight("1".to_string(), now()),
            Err(DraftError::Invalid(_))
        ));

        let blank_origin = FlightDraft {
            origin: Some(AirportDraft {
                code: Some("   ".to_string()),
                ..Default::default()
            }),
            destination: Some(airport("SFO", "USA")),
            ..Default::default()
        };
        assert!(blank_origin.into_flight("1".to_string(), now()).is_err());

        let codeless_origin = FlightDraft {
            origin: Some(AirportDraft::default()),
            destination: Some(airport("SFO", "USA")),
            ..Default::default()
        };
        assert!(codeless_origin.into_flight("1".to_string(), now()).is_err());
    }

    #[test]
    fn test_merge_overlays_present_fields_only() {
        let form = FlightDraft {
            id: Some("keep".to_string()),
            flight_number: Some("UA240".to_string()),
            airline: Some("United".to_string()),
            ..Default::default()
        };
        let parsed = FlightDraft {
            airline: Some("United Airlines".to_string()),
            origin: Some(airport("SFO", "USA")),
            ..Default::default()
        };

        let merged = form.merge(parsed);

        assert_eq!(merged.id.as_deref(), Some("keep"));
        assert_eq!(merged.flight_number.as_deref(), Some("UA240"));
        assert_eq!(merged.airline.as_deref(), Some("United Airlines"));
        assert_eq!(merged.origin.unwrap().code.as_deref(), Some("SFO"));
        assert!(merged.destination.is_none());
    }

    #[test]
    fn test_logo_code() {
        let mut flight = FlightDraft {
            flight_number: Some("ua240".to_string()),
            origin: Some(airport("SFO", "USA")),
            destination: Some(airport("LAX", "USA")),
            ..Default::default()
        }
        .into_flight("1".to_string(), now())
        .unwrap();

        assert_eq!(flight.logo_code(), "UA");

        flight.airline_iata = Some("lh".to_string());
        assert_eq!(flight.logo_code(), "LH");

        flight.airline_iata = Some(String::new());
        assert_eq!(flight.logo_code(), "UA");
    }

    #[test]
    fn test_flight_json_uses_camel_case() {
        let flight = FlightDraft {
            flight_number: Some("NH2".to_string()),
            airline_iata: Some("NH".to_string()),
            origin: Some(airport("NRT", "Japan")),
            destination: Some(airport("IAD", "USA")),
            date: Some("2024-08-20T14:30:00Z".to_string()),
            duration_minutes: Some(800.0),
            distance_km: Some(10860.0),
            ..Default::default()
        }
        .into_flight("2".to_string(), now())
        .unwrap();

        let json = serde_json::to_value(&flight).unwrap();
        assert_eq!(json["flightNumber"], "NH2");
        assert_eq!(json["airlineIata"], "NH");
        assert_eq!(json["durationMinutes"], 800);
        assert_eq!(json["distanceKm"], 10860.0);
        assert_eq!(json["date"], "2024-08-20T14:30:00Z");
        assert_eq!(json["origin"]["lat"], 10.0);

        let back: Flight = serde_json::from_value(json).unwrap();
        assert_eq!(back, flight);
    }

    #[test]
    fn test_flight_round_trips_through_draft() {
        let flight = FlightDraft {
            origin: Some(airport("FRA", "Germany")),
            destination: Some(airport("SFO", "USA")),
            duration_minutes: Some(660.0),
            ..Default::default()
        }
        .into_flight("edit-me".to_string(), now())
        .unwrap();

        let draft = FlightDraft::from(flight.clone());
        let id = draft.id.clone().unwrap();
        let again = draft.into_flight(id, now()).unwrap();

        assert_eq!(again, flight);
    }
}
