//! Cross-origin policy.

use crate::settings::{DeployEnvironment, Settings};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use log::{info, warn};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

const ALLOWED_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::OPTIONS,
];

/// Builds the CORS layer for the configured deployment.
///
/// Production admits only the configured front-end origin; every other
/// environment admits any origin.
pub fn cors_layer(settings: &Settings) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    match settings.server.environment {
        DeployEnvironment::Production => {
            let origin = settings.cors.production_origin.as_str();
            match HeaderValue::from_str(origin) {
                Ok(value) => {
                    info!("event=cors_init module=http status=ok mode=production origin={origin}");
                    base.allow_origin(AllowOrigin::exact(value))
                }
                Err(err) => {
                    // An unusable origin closes cross-origin access instead of opening it.
                    warn!(
                        "event=cors_init module=http status=error error_code=invalid_origin origin={origin} error={err}"
                    );
                    base.allow_origin(AllowOrigin::list(Vec::<HeaderValue>::new()))
                }
            }
        }
        DeployEnvironment::Development => {
            info!("event=cors_init module=http status=ok mode=development origin=*");
            base.allow_origin(Any)
        }
    }
}
