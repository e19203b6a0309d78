//! Generic CRUD use-cases for one resource collection.
//!
//! # Responsibility
//! - Implement create/list/update/delete uniformly for every resource kind.
//! - Apply the schema descriptor (casting, requirements, defaults).
//!
//! # Invariants
//! - Update only touches fields present in the payload.
//! - Updating or deleting an unknown id is an outcome, not an error.
//! - A malformed id is an error.

use crate::model::document::{parse_document_id, Document, DocumentId};
use crate::model::schema::{ResourceSchema, ValidationError};
use crate::repo::document_repo::DocumentRepository;
use crate::repo::RepoError;
use chrono::Utc;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Service error for resource use-cases.
#[derive(Debug)]
pub enum ResourceError {
    Validation(ValidationError),
    /// The caller-supplied id is not a valid identifier.
    MalformedId(String),
    Repo(RepoError),
}

impl ResourceError {
    /// Stable code used in log events.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::MalformedId(_) => "malformed_id",
            Self::Repo(_) => "store_failed",
        }
    }
}

impl Display for ResourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::MalformedId(raw) => write!(f, "malformed id: `{raw}`"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ResourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::MalformedId(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ValidationError> for ResourceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ResourceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Result of an update call.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// The document after the patch was applied.
    Updated(Document),
    /// No document with that id exists.
    Missing,
}

impl UpdateOutcome {
    pub fn into_document(self) -> Option<Document> {
        match self {
            Self::Updated(document) => Some(document),
            Self::Missing => None,
        }
    }
}

/// Result of a delete call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// Nothing matched; the collection is unchanged.
    Absent,
}

/// CRUD handler for one resource kind, parameterized by its schema.
pub struct ResourceService<R: DocumentRepository> {
    repo: Arc<R>,
    schema: &'static ResourceSchema,
}

impl<R: DocumentRepository> ResourceService<R> {
    pub fn new(repo: Arc<R>, schema: &'static ResourceSchema) -> Self {
        Self { repo, schema }
    }

    pub fn schema(&self) -> &'static ResourceSchema {
        self.schema
    }

    /// Creates one document from an untyped payload.
    pub fn create(&self, payload: &Value) -> Result<Document, ResourceError> {
        let fields = self.schema.build_new(payload, Utc::now())?;
        Ok(self.repo.insert_document(self.schema.collection, &fields)?)
    }

    /// Lists every document of the collection in store order.
    pub fn list(&self) -> Result<Vec<Document>, ResourceError> {
        Ok(self.repo.find_documents(self.schema.collection)?)
    }

    /// Applies the declared fields of `payload` onto the document `raw_id`.
    pub fn update(&self, raw_id: &str, payload: &Value) -> Result<UpdateOutcome, ResourceError> {
        let id = parse_id(raw_id)?;
        let patch = self.schema.build_patch(payload)?;
        let updated = self
            .repo
            .update_document(self.schema.collection, id, &patch)?;
        Ok(updated.map_or(UpdateOutcome::Missing, UpdateOutcome::Updated))
    }

    /// Removes the document `raw_id` if present.
    pub fn delete(&self, raw_id: &str) -> Result<DeleteOutcome, ResourceError> {
        let id = parse_id(raw_id)?;
        if self.repo.delete_document(self.schema.collection, id)? {
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::Absent)
        }
    }
}

fn parse_id(raw_id: &str) -> Result<DocumentId, ResourceError> {
    parse_document_id(raw_id).ok_or_else(|| ResourceError::MalformedId(raw_id.to_string()))
}
