//! Text-to-flight parsing capability.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::FlightDraft;

/// Turns a free-text flight description into a partial flight.
///
/// Implementations never fail past this boundary: any internal error is
/// logged and reported as `None`, so callers can simply leave the form
/// untouched.
#[async_trait]
pub trait FlightParser: Send + Sync {
    async fn parse_text(&self, text: &str, now: DateTime<Utc>) -> Option<FlightDraft>;
}

/// Parser used when no AI service is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledParser;

#[async_trait]
impl FlightParser for DisabledParser {
    async fn parse_text(&self, _text: &str, _now: DateTime<Utc>) -> Option<FlightDraft> {
        tracing::debug!("Text parsing requested but no parser is configured");
        None
    }
}
