use axum::body::Bytes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Map, Value};

/// Builds the `{"message": ...}` body used by every non-entity response.
pub(crate) fn message_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

/// Opaque 500 response.
pub(crate) fn internal_failure(message: &str) -> Response {
    message_response(StatusCode::INTERNAL_SERVER_ERROR, message)
}

/// Decodes a request body as JSON; an empty body reads as `{}`.
pub(crate) fn parse_json_body(body: &Bytes) -> Result<Value, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body)
}

#[cfg(test)]
mod tests {
    use super::parse_json_body;
    use axum::body::Bytes;
    use serde_json::json;

    #[test]
    fn empty_and_blank_bodies_are_empty_objects() {
        assert_eq!(parse_json_body(&Bytes::new()).unwrap(), json!({}));
        assert_eq!(parse_json_body(&Bytes::from_static(b" \n")).unwrap(), json!({}));
    }

    #[test]
    fn malformed_bodies_are_errors() {
        assert!(parse_json_body(&Bytes::from_static(b"{title:")).is_err());
    }
}
