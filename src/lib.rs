// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! SkyLog: a personal flight log with travel statistics
//!
//! This crate provides the backend API for recording flights, deriving
//! aggregate travel metrics, and pre-filling flight forms from free text.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod storage;
pub mod time_utils;

use config::Config;
use models::AppStats;
use services::{FlightParser, FlightStore, SettingsStore};
use std::sync::Arc;
use storage::KeyValueStore;
use time_utils::Clock;
use tokio::sync::RwLock;

/// Shared application state.
///
/// Each store is a single-writer: mutations go through its write lock, and
/// readers always see a complete snapshot.
pub struct AppState {
    pub config: Config,
    pub flights: RwLock<FlightStore>,
    pub settings: RwLock<SettingsStore>,
    pub parser: Arc<dyn FlightParser>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Load both stores from `storage` and assemble the state.
    pub fn new(
        config: Config,
        storage: Arc<dyn KeyValueStore>,
        parser: Arc<dyn FlightParser>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            flights: RwLock::new(FlightStore::load(storage.clone())),
            settings: RwLock::new(SettingsStore::load(storage)),
            parser,
            clock,
        }
    }

    /// Compute a fresh stats snapshot from the current flights and settings.
    pub async fn stats(&self) -> AppStats {
        let flights = self.flights.read().await;
        let settings = self.settings.read().await;
        AppStats::compute(flights.list(), settings.get(), self.clock.now())
    }
}
