// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time handling and the injectable clock.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, SecondsFormat, Utc};
use std::ops::RangeInclusive;

/// Years that format as four-digit RFC 3339 and therefore parse back.
const STORABLE_YEARS: RangeInclusive<i32> = 1..=9999;

/// Source of "now" for anything that depends on the wall clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The real wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parse a flight date: full RFC3339, or a bare `YYYY-MM-DD` taken as UTC midnight.
///
/// Years outside 1..=9999 are refused, since RFC 3339 cannot write them.
pub fn parse_flight_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    let parsed = match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.with_timezone(&Utc),
        Err(_) => start_of_day(NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?),
    };
    STORABLE_YEARS.contains(&parsed.year()).then_some(parsed)
}

/// UTC midnight at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Human-readable flight duration: "11h 0m", or "45m" under an hour.
pub fn format_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}

/// Serde adapter for flight timestamps.
pub mod flight_date {
    use super::{format_utc_rfc3339, parse_flight_date};
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format_utc_rfc3339(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        parse_flight_date(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid flight date: {raw}")))
    }
}

/// Serde adapter for an optional `YYYY-MM-DD` date where `""` means absent.
pub mod optional_date {
    use chrono::{Datelike, NaiveDate};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => s.serialize_str(&date.format("%Y-%m-%d").to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => {
                let date =
                    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(serde::de::Error::custom)?;
                if !super::STORABLE_YEARS.contains(&date.year()) {
                    return Err(serde::de::Error::custom(format!("year out of range: {s}")));
                }
                Ok(Some(date))
            }
        }
    }
}
