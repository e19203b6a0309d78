//! Document repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/find/update/delete primitives keyed by generated ids.
//! - Keep every collection in the shared `documents` table, partitioned by
//!   the `collection` column.
//!
//! # Invariants
//! - Ids are UUID v4 values generated here on insert.
//! - Listing follows insertion order (`seq`).
//! - Updates are read-modify-write inside one immediate transaction, so two
//!   concurrent updates of the same id resolve as last write wins.

use crate::model::document::{Document, DocumentId, Fields};
use crate::repo::store::SqliteStore;
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use serde_json::Value;
use uuid::Uuid;

/// Repository interface for collection documents.
pub trait DocumentRepository {
    /// Persists a new document and returns it with its generated id.
    fn insert_document(&self, collection: &str, fields: &Fields) -> RepoResult<Document>;
    /// Returns every document of a collection in natural order.
    fn find_documents(&self, collection: &str) -> RepoResult<Vec<Document>>;
    fn find_document(&self, collection: &str, id: DocumentId) -> RepoResult<Option<Document>>;
    /// Overwrites the given fields; `None` when no such document exists.
    fn update_document(
        &self,
        collection: &str,
        id: DocumentId,
        patch: &Fields,
    ) -> RepoResult<Option<Document>>;
    /// Removes a document; returns whether a row was deleted.
    fn delete_document(&self, collection: &str, id: DocumentId) -> RepoResult<bool>;
}

impl DocumentRepository for SqliteStore {
    fn insert_document(&self, collection: &str, fields: &Fields) -> RepoResult<Document> {
        let document = Document::new(Uuid::new_v4(), fields.clone());
        let body = encode_body(&document.fields)?;

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO documents (id, collection, body) VALUES (?1, ?2, ?3);",
                params![document.id.to_string(), collection, body],
            )?;
            Ok(())
        })?;

        Ok(document)
    }

    fn find_documents(&self, collection: &str) -> RepoResult<Vec<Document>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, body
                 FROM documents
                 WHERE collection = ?1
                 ORDER BY seq ASC;",
            )?;
            let mut rows = stmt.query([collection])?;
            let mut documents = Vec::new();
            while let Some(row) = rows.next()? {
                documents.push(parse_document_row(row)?);
            }
            Ok(documents)
        })
    }

    fn find_document(&self, collection: &str, id: DocumentId) -> RepoResult<Option<Document>> {
        self.with_conn(|conn| load_document(conn, collection, id))
    }

    fn update_document(
        &self,
        collection: &str,
        id: DocumentId,
        patch: &Fields,
    ) -> RepoResult<Option<Document>> {
        self.with_conn(|conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let Some(mut document) = load_document(&tx, collection, id)? else {
                return Ok(None);
            };

            document.apply_patch(patch);
            tx.execute(
                "UPDATE documents
                 SET body = ?3
                 WHERE id = ?1
                   AND collection = ?2;",
                params![
                    id.to_string(),
                    collection,
                    encode_body(&document.fields)?
                ],
            )?;
            tx.commit()?;

            Ok(Some(document))
        })
    }

    fn delete_document(&self, collection: &str, id: DocumentId) -> RepoResult<bool> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "DELETE FROM documents WHERE id = ?1 AND collection = ?2;",
                params![id.to_string(), collection],
            )?;
            Ok(changed > 0)
        })
    }
}

fn load_document(
    conn: &Connection,
    collection: &str,
    id: DocumentId,
) -> RepoResult<Option<Document>> {
    let body: Option<String> = conn
        .query_row(
            "SELECT body
             FROM documents
             WHERE id = ?1
               AND collection = ?2;",
            params![id.to_string(), collection],
            |row| row.get(0),
        )
        .optional()?;

    match body {
        Some(text) => Ok(Some(Document::new(id, decode_body(&text)?))),
        None => Ok(None),
    }
}

fn parse_document_row(row: &Row<'_>) -> RepoResult<Document> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in documents.id"))
    })?;
    let body: String = row.get("body")?;
    Ok(Document::new(id, decode_body(&body)?))
}

fn encode_body(fields: &Fields) -> RepoResult<String> {
    serde_json::to_string(fields)
        .map_err(|err| RepoError::InvalidData(format!("cannot encode document body: {err}")))
}

fn decode_body(text: &str) -> RepoResult<Fields> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Err(RepoError::InvalidData(
            "document body is not a JSON object".to_string(),
        )),
        Err(err) => Err(RepoError::InvalidData(format!(
            "cannot decode document body: {err}"
        ))),
    }
}
