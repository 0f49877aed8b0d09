// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for the flight log, stats and globe.

use crate::error::{AppError, Result};
use crate::models::{AppStats, Flight, FlightDraft, GlobeData};
use crate::time_utils::format_duration;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/flights", get(list_flights).post(create_flight))
        .route(
            "/api/flights/{id}",
            get(get_flight).put(update_flight).delete(delete_flight),
        )
        .route("/api/stats", get(get_stats))
        .route("/api/globe", get(get_globe))
}

// ─── Flights ─────────────────────────────────────────────────

/// Listing order. The store itself always keeps insertion order.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ListOrder {
    #[default]
    Oldest,
    Newest,
}

#[derive(Deserialize)]
struct FlightsQuery {
    #[serde(default)]
    order: ListOrder,
}

/// A flight plus the labels the list view shows.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FlightListItem {
    #[serde(flatten)]
    pub flight: Flight,
    /// "11h 0m"
    pub duration_label: String,
    /// Airline code for the logo lookup
    pub logo_code: String,
}

impl From<&Flight> for FlightListItem {
    fn from(flight: &Flight) -> Self {
        Self {
            duration_label: format_duration(flight.duration_minutes),
            logo_code: flight.logo_code(),
            flight: flight.clone(),
        }
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FlightsResponse {
    pub flights: Vec<FlightListItem>,
    pub total: u32,
}

/// List all flights.
async fn list_flights(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FlightsQuery>,
) -> Json<FlightsResponse> {
    let store = state.flights.read().await;
    let mut flights: Vec<FlightListItem> = store.list().iter().map(Into::into).collect();
    if matches!(params.order, ListOrder::Newest) {
        flights.reverse();
    }

    tracing::debug!(count = flights.len(), order = ?params.order, "Listing flights");

    Json(FlightsResponse {
        total: flights.len() as u32,
        flights,
    })
}

/// Get a single flight, e.g. to pre-fill the edit form.
async fn get_flight(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Flight>> {
    let store = state.flights.read().await;
    store
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Flight {} not found", id)))
}

/// Save a flight from a form draft. A draft carrying an existing id edits it.
async fn create_flight(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<FlightDraft>,
) -> Result<Json<Flight>> {
    save(&state, draft).await
}

/// Save a flight under the id in the path.
async fn update_flight(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(mut draft): Json<FlightDraft>,
) -> Result<Json<Flight>> {
    draft.id = Some(id);
    save(&state, draft).await
}

async fn save(state: &AppState, draft: FlightDraft) -> Result<Json<Flight>> {
    let now = state.clock.now();
    let mut store = state.flights.write().await;
    let flight = store.save_draft(draft, now).map_err(|e| {
        tracing::debug!(error = %e, "Refusing to save flight");
        AppError::from(e)
    })?;

    tracing::info!(
        flight_id = %flight.id,
        route = %flight.route_label(),
        total = store.list().len(),
        "Flight saved"
    );

    Ok(Json(flight))
}

/// Delete a flight. Deleting an unknown id is not an error.
async fn delete_flight(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> StatusCode {
    let removed = state.flights.write().await.remove(&id);
    if removed {
        tracing::info!(flight_id = %id, "Flight deleted");
    } else {
        tracing::debug!(flight_id = %id, "Delete for unknown flight ignored");
    }
    StatusCode::NO_CONTENT
}

// ─── Stats ───────────────────────────────────────────────────

/// Get travel stats, recomputed from the current log.
async fn get_stats(State(state): State<Arc<AppState>>) -> Json<AppStats> {
    Json(state.stats().await)
}

// ─── Globe ───────────────────────────────────────────────────

/// Get arcs and airport points for the globe view.
async fn get_globe(State(state): State<Arc<AppState>>) -> Json<GlobeData> {
    let store = state.flights.read().await;
    Json(GlobeData::from_flights(store.list()))
}
