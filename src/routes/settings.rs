//! User settings routes.

use crate::error::Result;
use crate::models::UserSettings;
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/settings", get(get_settings).put(update_settings))
}

async fn get_settings(State(state): State<Arc<AppState>>) -> Json<UserSettings> {
    Json(state.settings.read().await.get().clone())
}

/// Replace the settings. A future birthday is rejected with 400.
async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(settings): Json<UserSettings>,
) -> Result<Json<UserSettings>> {
    let now = state.clock.now();
    let mut store = state.settings.write().await;
    let updated = store.update(settings, now)?;
    Ok(Json(updated.clone()))
}
