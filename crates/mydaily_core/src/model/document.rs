//! Stored document model.
//!
//! # Invariants
//! - `id` is assigned by the store on insert and never changes.
//! - `fields` never contains the `_id` key; the id is only rendered on output.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Store-generated identifier for one document.
pub type DocumentId = Uuid;

/// Field values of one document, kept in schema order.
pub type Fields = Map<String, Value>;

/// Wire name of the identifier field.
pub const ID_FIELD: &str = "_id";

/// One persisted entity of a resource collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: DocumentId, fields: Fields) -> Self {
        Self { id, fields }
    }

    /// Returns one field value, or `None` when the field was never set.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Overwrites the given fields, leaving every other field untouched.
    pub fn apply_patch(&mut self, patch: &Fields) {
        for (name, value) in patch {
            self.fields.insert(name.clone(), value.clone());
        }
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry(ID_FIELD, &self.id.to_string())?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Parses a caller-supplied identifier.
///
/// Returns `None` for anything that is not a hyphenated or simple UUID.
pub fn parse_document_id(raw: &str) -> Option<DocumentId> {
    Uuid::parse_str(raw.trim()).ok()
}
