//! `POST /login`.

use super::blocking::{run_blocking, BlockingFailure};
use super::response::{internal_failure, message_response, parse_json_body};
use super::router::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, info, warn};
use mydaily_core::{AuthError, LoginUser};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

pub(crate) const LOGIN_OK: &str = "Login exitoso";
pub(crate) const USER_NOT_FOUND: &str = "Usuario no encontrado";
pub(crate) const WRONG_PASSWORD: &str = "Contraseña incorrecta";
pub(crate) const SERVER_ERROR: &str = "Error interno del servidor";

/// Login body. Fields are taken as untyped JSON and read through
/// [`credential_text`], so no value shape is rejected before the lookup.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LoginRequest {
    email: Value,
    password: Value,
}

/// Reads a credential field: null or absent is empty, scalars are stringified.
fn credential_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[derive(Serialize)]
struct LoginResponse {
    message: &'static str,
    user: LoginUser,
}

pub(crate) async fn login(State(state): State<AppState>, body: Bytes) -> Response {
    let started_at = Instant::now();
    let request: LoginRequest = match parse_json_body(&body).and_then(serde_json::from_value) {
        Ok(request) => request,
        Err(err) => {
            error!("event=login module=http status=error error_code=malformed_body error={err}");
            return internal_failure(SERVER_ERROR);
        }
    };

    let email = credential_text(&request.email);
    let password = credential_text(&request.password);
    let auth = Arc::clone(&state.auth);
    let result = run_blocking(move || auth.login(&email, &password)).await;
    let duration_ms = started_at.elapsed().as_millis();

    match result {
        Ok(user) => {
            info!("event=login module=http status=ok duration_ms={duration_ms}");
            (
                StatusCode::OK,
                Json(LoginResponse {
                    message: LOGIN_OK,
                    user,
                }),
            )
                .into_response()
        }
        Err(failure) => {
            let code = failure.error_code();
            match failure {
                BlockingFailure::Service(AuthError::UserNotFound) => {
                    warn!("event=login module=http status=rejected error_code={code} duration_ms={duration_ms}");
                    message_response(StatusCode::BAD_REQUEST, USER_NOT_FOUND)
                }
                BlockingFailure::Service(AuthError::InvalidCredential) => {
                    warn!("event=login module=http status=rejected error_code={code} duration_ms={duration_ms}");
                    message_response(StatusCode::BAD_REQUEST, WRONG_PASSWORD)
                }
                other => {
                    error!(
                        "event=login module=http status=error error_code={code} duration_ms={duration_ms} error={other}"
                    );
                    internal_failure(SERVER_ERROR)
                }
            }
        }
    }
}
