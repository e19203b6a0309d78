//! HTTP boundary: routing, request decoding and status mapping.
//!
//! # Responsibility
//! - Dispatch method + path to the credential verifier or a resource handler.
//! - Run every store-touching call on the blocking pool.
//! - Collapse service errors into the opaque wire messages.
//!
//! # Invariants
//! - Only 200, 201, 400 and 500 are produced by the routes declared here.
//! - Error bodies are always `{"message": ...}` with no structured detail.

mod blocking;
mod cors;
mod login;
mod request_logging;
mod resources;
mod response;
mod router;

pub use cors::cors_layer;
pub use resources::{ResourceMessages, ResourceRoute, DAILY_ROUTE, NOTE_ROUTE, OVERTIME_ROUTE};
pub use router::{build_router, AppState};
