//! Routes for the three resource collections.
//!
//! One generic set of handlers serves every resource; a `ResourceRoute`
//! binds a path and its wire messages to a core schema descriptor.

use super::blocking::{run_blocking, BlockingFailure, CodedError};
use super::response::{internal_failure, message_response, parse_json_body};
use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use log::{error, info};
use mydaily_core::{
    ResourceSchema, ResourceService, SqliteStore, DAILY_ENTRY, NOTE, OVERTIME_ENTRY,
};
use std::sync::Arc;
use std::time::Instant;

/// Wire messages of one resource route.
#[derive(Debug)]
pub struct ResourceMessages {
    pub create_failed: &'static str,
    pub list_failed: &'static str,
    pub update_failed: &'static str,
    pub delete_failed: &'static str,
    pub deleted: &'static str,
}

/// Binds a URL prefix to a resource schema.
#[derive(Debug)]
pub struct ResourceRoute {
    pub path: &'static str,
    pub schema: &'static ResourceSchema,
    pub messages: ResourceMessages,
}

pub static DAILY_ROUTE: ResourceRoute = ResourceRoute {
    path: "/daily",
    schema: &DAILY_ENTRY,
    messages: ResourceMessages {
        create_failed: "Error al crear daily",
        list_failed: "Error al obtener dailies",
        update_failed: "Error al actualizar daily",
        delete_failed: "Error al eliminar daily",
        deleted: "Daily eliminada",
    },
};

pub static OVERTIME_ROUTE: ResourceRoute = ResourceRoute {
    path: "/horasextras",
    schema: &OVERTIME_ENTRY,
    messages: ResourceMessages {
        create_failed: "Error al crear horas extras",
        list_failed: "Error al obtener horas extras",
        update_failed: "Error al actualizar horas extras",
        delete_failed: "Error al eliminar horas extras",
        deleted: "Horas extras eliminadas",
    },
};

pub static NOTE_ROUTE: ResourceRoute = ResourceRoute {
    path: "/notas",
    schema: &NOTE,
    messages: ResourceMessages {
        create_failed: "Error al crear nota",
        list_failed: "Error al obtener notas",
        update_failed: "Error al actualizar nota",
        delete_failed: "Error al eliminar nota",
        deleted: "Nota eliminada",
    },
};

#[derive(Clone)]
struct ResourceState {
    service: Arc<ResourceService<SqliteStore>>,
    route: &'static ResourceRoute,
}

/// Builds the four CRUD routes of one resource over the shared store.
pub(crate) fn resource_router(store: Arc<SqliteStore>, route: &'static ResourceRoute) -> Router {
    let state = ResourceState {
        service: Arc::new(ResourceService::new(store, route.schema)),
        route,
    };

    Router::new()
        .route(route.path, get(list_entries).post(create_entry))
        .route(
            &format!("{}/:id", route.path),
            put(update_entry).delete(delete_entry),
        )
        .with_state(state)
}

async fn create_entry(State(state): State<ResourceState>, body: Bytes) -> Response {
    let started_at = Instant::now();
    let messages = &state.route.messages;
    let payload = match parse_json_body(&body) {
        Ok(payload) => payload,
        Err(err) => {
            log_malformed_body(state.route, "create", &err);
            return internal_failure(messages.create_failed);
        }
    };

    let service = Arc::clone(&state.service);
    match run_blocking(move || service.create(&payload)).await {
        Ok(document) => {
            log_ok(state.route, "create", started_at);
            (StatusCode::CREATED, Json(document)).into_response()
        }
        Err(failure) => {
            log_failure(state.route, "create", started_at, &failure);
            internal_failure(messages.create_failed)
        }
    }
}

async fn list_entries(State(state): State<ResourceState>) -> Response {
    let started_at = Instant::now();
    let service = Arc::clone(&state.service);
    match run_blocking(move || service.list()).await {
        Ok(documents) => {
            log_ok(state.route, "list", started_at);
            (StatusCode::OK, Json(documents)).into_response()
        }
        Err(failure) => {
            log_failure(state.route, "list", started_at, &failure);
            internal_failure(state.route.messages.list_failed)
        }
    }
}

async fn update_entry(
    State(state): State<ResourceState>,
    id: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Response {
    let started_at = Instant::now();
    let messages = &state.route.messages;
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => {
            log_malformed_id(state.route, "update", &rejection);
            return internal_failure(messages.update_failed);
        }
    };
    let payload = match parse_json_body(&body) {
        Ok(payload) => payload,
        Err(err) => {
            log_malformed_body(state.route, "update", &err);
            return internal_failure(messages.update_failed);
        }
    };

    let service = Arc::clone(&state.service);
    match run_blocking(move || service.update(&id, &payload)).await {
        Ok(outcome) => {
            log_ok(state.route, "update", started_at);
            // A missing id is answered with `null`, exactly like a success.
            (StatusCode::OK, Json(outcome.into_document())).into_response()
        }
        Err(failure) => {
            log_failure(state.route, "update", started_at, &failure);
            internal_failure(messages.update_failed)
        }
    }
}

async fn delete_entry(
    State(state): State<ResourceState>,
    id: Result<Path<String>, PathRejection>,
) -> Response {
    let started_at = Instant::now();
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => {
            log_malformed_id(state.route, "delete", &rejection);
            return internal_failure(state.route.messages.delete_failed);
        }
    };
    let service = Arc::clone(&state.service);
    match run_blocking(move || service.delete(&id)).await {
        Ok(outcome) => {
            info!(
                "event={}_delete module=http status=ok outcome={:?} duration_ms={}",
                state.route.schema.name,
                outcome,
                started_at.elapsed().as_millis()
            );
            message_response(StatusCode::OK, state.route.messages.deleted)
        }
        Err(failure) => {
            log_failure(state.route, "delete", started_at, &failure);
            internal_failure(state.route.messages.delete_failed)
        }
    }
}

fn log_ok(route: &ResourceRoute, op: &str, started_at: Instant) {
    info!(
        "event={}_{op} module=http status=ok duration_ms={}",
        route.schema.name,
        started_at.elapsed().as_millis()
    );
}

fn log_failure<E: CodedError>(
    route: &ResourceRoute,
    op: &str,
    started_at: Instant,
    failure: &BlockingFailure<E>,
) {
    error!(
        "event={}_{op} module=http status=error duration_ms={} error_code={} error={}",
        route.schema.name,
        started_at.elapsed().as_millis(),
        failure.error_code(),
        failure
    );
}

fn log_malformed_body(route: &ResourceRoute, op: &str, err: &serde_json::Error) {
    error!(
        "event={}_{op} module=http status=error error_code=malformed_body error={}",
        route.schema.name, err
    );
}

fn log_malformed_id(route: &ResourceRoute, op: &str, rejection: &PathRejection) {
    error!(
        "event={}_{op} module=http status=error error_code=malformed_id error={}",
        route.schema.name,
        rejection.body_text()
    );
}
