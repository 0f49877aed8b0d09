// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gemini API client for turning free text into flight drafts.
//!
//! Handles:
//! - Building the `generateContent` request with a strict JSON response schema
//! - Extracting the candidate text and decoding it as a flight draft
//! - Collapsing every failure into "no result"

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::models::FlightDraft;
use crate::services::FlightParser;
use crate::time_utils::format_utc_rfc3339;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini API client.
#[derive(Clone)]
pub struct GeminiParser {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiParser {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            model,
        }
    }

    /// Point the client at a different endpoint root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Make the `generateContent` call and decode the answer.
    async fn request_draft(
        &self,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<FlightDraft>, ParserError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&build_request(text, now))
            .send()
            .await
            .map_err(|e| ParserError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ParserError::Status(status.as_u16(), body));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ParserError::Http(format!("JSON parse error: {}", e)))?;

        extract_draft(body)
    }
}

#[async_trait]
impl FlightParser for GeminiParser {
    async fn parse_text(&self, text: &str, now: DateTime<Utc>) -> Option<FlightDraft> {
        match self.request_draft(text, now).await {
            Ok(Some(draft)) => {
                tracing::info!(
                    flight_number = ?draft.flight_number,
                    "Parsed flight from text"
                );
                Some(draft)
            }
            Ok(None) => {
                tracing::info!("Gemini returned no flight data");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Error parsing flight with Gemini");
                None
            }
        }
    }
}

/// Prompt sent alongside the user's text.
fn build_prompt(text: &str, now: DateTime<Utc>) -> String {
    format!(
        "Extract flight details from this input: \"{}\". \
         If details are missing, estimate coordinates and distances realistically \
         for the airports involved. Strictly identify the correct 2-letter IATA code \
         for the airline. Today's date is {}.",
        text,
        format_utc_rfc3339(now)
    )
}

fn airport_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "code": { "type": "STRING" },
            "name": { "type": "STRING" },
            "city": { "type": "STRING" },
            "country": { "type": "STRING" },
            "lat": { "type": "NUMBER" },
            "lng": { "type": "NUMBER" }
        },
        "required": ["code", "name", "city", "country", "lat", "lng"]
    })
}

/// Response schema: every field required, even though callers treat the
/// result as partial.
fn flight_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "flightNumber": { "type": "STRING" },
            "airline": { "type": "STRING" },
            "airlineIata": {
                "type": "STRING",
                "description": "2-letter IATA code for the airline (e.g., 'LH' for Lufthansa, 'AA' for American Airlines)"
            },
            "origin": airport_schema(),
            "destination": airport_schema(),
            "date": { "type": "STRING", "description": "ISO date format" },
            "durationMinutes": { "type": "NUMBER" },
            "distanceKm": { "type": "NUMBER" }
        },
        "required": [
            "flightNumber",
            "airline",
            "airlineIata",
            "origin",
            "destination",
            "date",
            "durationMinutes",
            "distanceKm"
        ]
    })
}

fn build_request(text: &str, now: DateTime<Utc>) -> Value {
    json!({
        "contents": [{
            "parts": [{ "text": build_prompt(text, now) }]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": flight_schema()
        }
    })
}

/// Pull the draft out of a `generateContent` response.
///
/// An empty answer is `Ok(None)`; text that is not a flight-shaped JSON
/// object is an error.
fn extract_draft(response: GenerateContentResponse) -> Result<Option<FlightDraft>, ParserError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Ok(None);
    }

    serde_json::from_str(&text)
        .map(Some)
        .map_err(|e| ParserError::Malformed(e.to_string()))
}

/// `generateContent` response (only the fields we read).
#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Errors from the Gemini call; `parse_text` logs them and reports `None`.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error("Gemini request failed: {0}")]
    Http(String),

    #[error("Gemini returned HTTP {0}: {1}")]
    Status(u16, String),

    #[error("Gemini returned malformed flight JSON: {0}")]
    Malformed(String),
}
