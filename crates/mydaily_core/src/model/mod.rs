//! Domain model for the tracker collections and the user account.
//!
//! # Responsibility
//! - Define the stored document shape shared by every resource kind.
//! - Describe each resource kind with a static schema instead of a type per kind.
//!
//! # Invariants
//! - Every stored document is identified by a store-generated `DocumentId`.
//! - Resource kinds never share documents across collections.

pub mod document;
pub mod schema;
pub mod user;
