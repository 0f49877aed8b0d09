//! Arc and point data for the globe view.

use serde::Serialize;
use std::collections::HashMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{Airport, Flight};

/// One great-circle arc per flight.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GlobeArc {
    pub start_lat: f64,
    pub start_lng: f64,
    pub end_lat: f64,
    pub end_lng: f64,
    /// "FRA → SFO"
    pub name: String,
}

/// One marker per distinct airport.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GlobePoint {
    pub code: String,
    pub lat: f64,
    pub lng: f64,
    /// City name
    pub label: String,
}

impl From<&Airport> for GlobePoint {
    fn from(airport: &Airport) -> Self {
        Self {
            code: airport.code.clone(),
            lat: airport.lat,
            lng: airport.lng,
            label: airport.city.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GlobeData {
    pub arcs: Vec<GlobeArc>,
    pub points: Vec<GlobePoint>,
}

impl GlobeData {
    /// Points keep the order in which each code first appears; when a code
    /// shows up again its coordinates and label are taken from the later
    /// occurrence.
    pub fn from_flights(flights: &[Flight]) -> Self {
        let arcs = flights
            .iter()
            .map(|f| GlobeArc {
                start_lat: f.origin.lat,
                start_lng: f.origin.lng,
                end_lat: f.destination.lat,
                end_lng: f.destination.lng,
                name: f.route_label(),
            })
            .collect();

        let mut points: Vec<GlobePoint> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for airport in flights.iter().flat_map(|f| [&f.origin, &f.destination]) {
            match index.get(airport.code.as_str()) {
                Some(&i) => points[i] = airport.into(),
                None => {
                    index.insert(airport.code.as_str(), points.len());
                    points.push(airport.into());
                }
            }
        }

        Self { arcs, points }
    }
}
