// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod flight;
pub mod globe;
pub mod settings;
pub mod stats;

pub use flight::{Airport, AirportDraft, DraftError, Flight, FlightDraft};
pub use globe::GlobeData;
pub use settings::{Theme, UserSettings};
pub use stats::{AppStats, TOTAL_COUNTRIES};
