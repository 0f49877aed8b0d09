// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod flights;
pub mod gemini;
pub mod parser;
pub mod settings;

pub use flights::FlightStore;
pub use gemini::GeminiParser;
pub use parser::{DisabledParser, FlightParser};
pub use settings::{SettingsError, SettingsStore};
