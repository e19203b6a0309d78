//! Core domain logic for MyDaily.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::document::{parse_document_id, Document, DocumentId, Fields, ID_FIELD};
pub use model::schema::{
    FieldDefault, FieldKind, FieldSpec, ResourceSchema, ValidationError, DAILY_ENTRY, NOTE,
    OVERTIME_ENTRY,
};
pub use model::user::{LoginUser, PasswordScheme, User};
pub use repo::document_repo::DocumentRepository;
pub use repo::store::SqliteStore;
pub use repo::user_repo::UserRepository;
pub use repo::{RepoError, RepoResult};
pub use service::auth_service::{AuthError, AuthService};
pub use service::password::{hash_password, verify_password};
pub use service::resource_service::{
    DeleteOutcome, ResourceError, ResourceService, UpdateOutcome,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
