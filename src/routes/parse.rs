// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Free-text flight parsing ("magic entry").
//!
//! The parser only ever pre-fills a form. Nothing here touches the flight
//! store; the user still has to save the returned form.

use crate::models::FlightDraft;
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/flights/parse", post(parse_flight))
}

#[derive(Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ParseRequest {
    /// Free-text flight description
    pub text: String,
    /// Current contents of the form, if any
    #[serde(default)]
    pub form: FlightDraft,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ParseResponse {
    /// What the parser extracted, or null when it found nothing
    pub parsed: Option<FlightDraft>,
    /// The form with parsed fields applied (unchanged when `parsed` is null)
    pub form: FlightDraft,
}

/// Parse free text and merge the result into the submitted form.
///
/// Blank text never reaches the parser. Parser failures are not errors: the
/// form simply comes back unchanged.
async fn parse_flight(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ParseRequest>,
) -> Json<ParseResponse> {
    let text = request.text.trim();
    if text.is_empty() {
        return Json(ParseResponse {
            parsed: None,
            form: request.form,
        });
    }

    let now = state.clock.now();
    let parsed = state.parser.parse_text(text, now).await;

    tracing::info!(found = parsed.is_some(), "Text parse finished");

    let form = match &parsed {
        Some(draft) => request.form.merge(draft.clone()),
        None => request.form,
    };

    Json(ParseResponse { parsed, form })
}
