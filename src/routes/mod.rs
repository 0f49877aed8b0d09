// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod api;
pub mod parse;
pub mod settings;

use crate::config::Config;
use crate::AppState;
use axum::http::{header, request::Parts, HeaderValue, Method, Uri};
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Hosts always accepted over plain http, on any port, for local frontend
/// development.
const DEV_HOSTS: &[&str] = &["localhost", "127.0.0.1"];

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id: option_env!("BUILD_ID").unwrap_or("unknown").to_string(),
    })
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(api::routes())
        .merge(settings::routes())
        .merge(parse::routes())
        .layer(middleware::from_fn(crate::middleware::add_response_headers))
        .layer(cors_layer(&state.config))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// CORS for the configured frontend plus local dev servers. No credentials:
/// the API has no session state.
fn cors_layer(config: &Config) -> CorsLayer {
    let frontend_url = config.frontend_url.clone();
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| is_allowed_origin(&frontend_url, origin),
        ))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

fn is_allowed_origin(frontend_url: &str, origin: &HeaderValue) -> bool {
    let Ok(origin) = origin.to_str() else {
        return false;
    };
    if origin == frontend_url.trim_end_matches('/') {
        return true;
    }

    // An origin is scheme://host[:port], nothing more
    let Ok(uri) = origin.parse::<Uri>() else {
        return false;
    };
    let bare = uri
        .path_and_query()
        .map_or(true, |pq| matches!(pq.as_str(), "" | "/"));
    bare && uri.scheme_str() == Some("http")
        && uri.host().is_some_and(|host| DEV_HOSTS.contains(&host))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_origins() {
        let frontend = "https://skylog.example.com/";
        let allowed = |o: &'static str| is_allowed_origin(frontend, &HeaderValue::from_static(o));

        assert!(allowed("https://skylog.example.com"));
        assert!(allowed("http://localhost:5173"));
        assert!(allowed("http://127.0.0.1:3000"));
        assert!(allowed("http://localhost"));
        assert!(!allowed("https://evil.example.com"));
        assert!(!allowed("https://skylog.example.com.evil.net"));
        assert!(!allowed("http://localhost.evil.net"));
        assert!(!allowed("http://localhost.evil.net:5173"));
        assert!(!allowed("http://127.0.0.1.evil.net"));
        assert!(!allowed("http://localhost@evil.net"));
        assert!(!allowed("https://localhost:5173"));
    }
}
