use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use mydaily_core::{AuthService, PasswordScheme, SqliteStore};
use mydaily_server::build_router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const BODY_LIMIT: usize = 1024 * 1024;

fn app() -> Router {
    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    let auth = AuthService::new(Arc::clone(&store));
    auth.register_user("ana@example.com", "secret", PasswordScheme::Plain)
        .unwrap();
    auth.register_user("hashed@example.com", "s3cret", PasswordScheme::Argon2)
        .unwrap();
    build_router(store)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), BODY_LIMIT).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn send_raw(app: &Router, method: Method, uri: &str, body: &'static str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), BODY_LIMIT).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn login_success_returns_email_only() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/login",
        Some(json!({"email": "ana@example.com", "password": "secret"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"message": "Login exitoso", "user": {"email": "ana@example.com"}})
    );
}

#[tokio::test]
async fn login_accepts_hashed_passwords() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/login",
        Some(json!({"email": "hashed@example.com", "password": "s3cret"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["user"].get("password").is_none());
}

#[tokio::test]
async fn login_unknown_email_is_400() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/login",
        Some(json!({"email": "nobody@example.com", "password": "secret"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "Usuario no encontrado"}));
}

#[tokio::test]
async fn login_wrong_password_is_400() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/login",
        Some(json!({"email": "ana@example.com", "password": "nope"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "Contraseña incorrecta"}));
}

#[tokio::test]
async fn login_malformed_body_is_500() {
    let app = app();
    let (status, body) = send_raw(&app, Method::POST, "/login", "{\"email\":").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"message": "Error interno del servidor"}));
}

#[tokio::test]
async fn daily_round_trip() {
    let app = app();
    let (status, created) = send(
        &app,
        Method::POST,
        "/daily",
        Some(json!({"title": "T", "description": "D"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created["_id"].is_string());
    assert!(created["date"].is_string());

    let (status, listed) = send(&app, Method::GET, "/daily", None).await;
    assert_eq!(status, StatusCode::OK);
    let entries = listed.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["title"], "T");
    assert_eq!(entries[0]["description"], "D");
    assert_eq!(entries[0]["_id"], created["_id"]);
    assert!(!entries[0]["date"].is_null());
}

#[tokio::test]
async fn daily_missing_required_field_is_500() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/daily", Some(json!({"title": "T"}))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"message": "Error al crear daily"}));

    let (_, listed) = send(&app, Method::GET, "/daily", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn delete_is_idempotent() {
    let app = app();
    let (_, created) = send(
        &app,
        Method::POST,
        "/daily",
        Some(json!({"title": "T", "description": "D"})),
    )
    .await;
    let uri = format!("/daily/{}", created["_id"].as_str().unwrap());

    let (first, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(first, StatusCode::OK);
    assert_eq!(body, json!({"message": "Daily eliminada"}));

    let (second, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(second, StatusCode::OK);
    assert_eq!(body, json!({"message": "Daily eliminada"}));

    let (_, listed) = send(&app, Method::GET, "/daily", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn note_partial_update_changes_only_given_fields() {
    let app = app();
    let (status, created) = send(
        &app,
        Method::POST,
        "/notas",
        Some(json!({"title": "Old", "description": "Keep", "date": "2024-03-05"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/notas/{}", created["_id"].as_str().unwrap());

    let (status, updated) = send(&app, Method::PUT, &uri, Some(json!({"title": "New"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "New");
    assert_eq!(updated["description"], created["description"]);
    assert_eq!(updated["date"], created["date"]);
    assert_eq!(updated["_id"], created["_id"]);
}

#[tokio::test]
async fn overtime_scenario() {
    let app = app();
    let (status, created) = send(
        &app,
        Method::POST,
        "/horasextras",
        Some(json!({"title": "OT1", "date": "2024-01-01", "hours": 3})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["hours"], 3);
    assert_eq!(created["date"], "2024-01-01T00:00:00.000Z");

    let uri = format!("/horasextras/{}", created["_id"].as_str().unwrap());
    let (status, updated) = send(&app, Method::PUT, &uri, Some(json!({"hours": 5}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["hours"], 5);
    assert_eq!(updated["title"], "OT1");
    assert_eq!(updated["date"], created["date"]);
}

#[tokio::test]
async fn update_of_unknown_id_is_200_null() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::PUT,
        "/notas/7f1c2f4e-0000-4000-8000-000000000000",
        Some(json!({"title": "New"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn malformed_id_is_500() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::PUT,
        "/horasextras/not-an-id",
        Some(json!({"hours": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"message": "Error al actualizar horas extras"}));

    let (status, body) = send(&app, Method::DELETE, "/notas/not-an-id", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"message": "Error al eliminar nota"}));
}

#[tokio::test]
async fn malformed_create_body_is_500() {
    let app = app();
    let (status, body) = send_raw(&app, Method::POST, "/notas", "{not json").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"message": "Error al crear nota"}));
}

#[tokio::test]
async fn collections_are_independent() {
    let app = app();
    send(
        &app,
        Method::POST,
        "/daily",
        Some(json!({"title": "T", "description": "D"})),
    )
    .await;

    let (_, notes) = send(&app, Method::GET, "/notas", None).await;
    let (_, overtime) = send(&app, Method::GET, "/horasextras", None).await;
    assert_eq!(notes, json!([]));
    assert_eq!(overtime, json!([]));
}

#[tokio::test]
async fn health_reports_version() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn login_non_string_credentials_are_400() {
    let app = app();
    let cases = [
        (json!({"email": null, "password": "secret"}), "Usuario no encontrado"),
        (json!({"email": 123, "password": "secret"}), "Usuario no encontrado"),
        (json!({"password": "secret"}), "Usuario no encontrado"),
        (
            json!({"email": "ana@example.com", "password": 123}),
            "Contraseña incorrecta",
        ),
        (
            json!({"email": "ana@example.com", "password": null}),
            "Contraseña incorrecta",
        ),
    ];

    for (payload, message) in cases {
        let (status, body) = send(&app, Method::POST, "/login", Some(payload.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {payload}");
        assert_eq!(body, json!({ "message": message }), "payload {payload}");
    }
}

#[tokio::test]
async fn undecodable_path_id_is_500() {
    let app = app();
    let (status, body) = send(&app, Method::PUT, "/daily/%FF", Some(json!({"title": "x"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"message": "Error al actualizar daily"}));

    let (status, body) = send(&app, Method::DELETE, "/notas/%FF", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"message": "Error al eliminar nota"}));
}
