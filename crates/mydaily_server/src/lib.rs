//! HTTP service for MyDaily.
//!
//! Wires the core credential verifier and resource handlers onto an axum
//! router and exposes the layered runtime settings.

pub mod http;
pub mod settings;

pub use http::{build_router, cors_layer, AppState};
pub use settings::{DeployEnvironment, Settings};
