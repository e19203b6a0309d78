use super::login::login;
use super::request_logging::request_logging_middleware;
use super::resources::{resource_router, DAILY_ROUTE, NOTE_ROUTE, OVERTIME_ROUTE};
use axum::middleware;
use axum::routing::{get, post};
use axum::{Json, Router};
use mydaily_core::{AuthService, SqliteStore};
use serde_json::{json, Value};
use std::sync::Arc;

/// State shared by the non-resource routes.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService<SqliteStore>>,
}

/// Builds the full application router over one shared store handle.
///
/// CORS is left to the caller so tests can exercise routing alone.
pub fn build_router(store: Arc<SqliteStore>) -> Router {
    let state = AppState {
        auth: Arc::new(AuthService::new(Arc::clone(&store))),
    };

    Router::new()
        .route("/login", post(login))
        .route("/health", get(health))
        .with_state(state)
        .merge(resource_router(Arc::clone(&store), &DAILY_ROUTE))
        .merge(resource_router(Arc::clone(&store), &OVERTIME_ROUTE))
        .merge(resource_router(store, &NOTE_ROUTE))
        .layer(middleware::from_fn(request_logging_middleware))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
