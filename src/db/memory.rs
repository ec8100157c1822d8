use super::DocumentStore;
use crate::errors::custom::DbError;
use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{Bson, Document};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Collections {
    documents: HashMap<String, Vec<Document>>,
    unique_fields: HashMap<String, Vec<String>>,
}

/// In-process document store.
///
/// Collections keep insertion order, `_id` is always unique, and every field
/// registered with [`DocumentStore::ensure_unique_index`] is enforced on
/// insert, the same way the server does it (a missing field counts as `null`).
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<Collections>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While offline every operation fails with [`DbError::ConnectionError`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn lock(&self) -> Result<MutexGuard<'_, Collections>, DbError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(DbError::ConnectionError(
                "memory store is offline".to_string(),
            ));
        }
        self.collections
            .lock()
            .map_err(|_| DbError::Other("memory store lock poisoned".to_string()))
    }
}

fn field_value<'a>(document: &'a Document, field: &str) -> &'a Bson {
    document.get(field).unwrap_or(&Bson::Null)
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(field, expected)| field_value(document, field) == expected)
}

fn with_id(document: Document) -> Document {
    if document.contains_key("_id") {
        return document;
    }
    let mut stored = Document::new();
    stored.insert("_id", ObjectId::new());
    for (key, value) in document {
        stored.insert(key, value);
    }
    stored
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_one(&self, collection: &str, document: Document) -> Result<(), DbError> {
        let document = with_id(document);
        let mut guard = self.lock()?;
        let Collections {
            documents,
            unique_fields,
        } = &mut *guard;
        let existing = documents.entry(collection.to_string()).or_default();

        let unique = std::iter::once("_id").chain(
            unique_fields
                .get(collection)
                .into_iter()
                .flatten()
                .map(String::as_str),
        );
        for field in unique {
            let value = field_value(&document, field);
            if existing.iter().any(|other| field_value(other, field) == value) {
                return Err(DbError::DuplicateKey {
                    collection: collection.to_string(),
                    field: field.to_string(),
                });
            }
        }

        existing.push(document);
        Ok(())
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, DbError> {
        let guard = self.lock()?;
        Ok(guard
            .documents
            .get(collection)
            .and_then(|documents| documents.iter().find(|document| matches(document, &filter)))
            .cloned())
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<Document>, DbError> {
        let guard = self.lock()?;
        Ok(guard
            .documents
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn ensure_unique_index(&self, collection: &str, field: &str) -> Result<(), DbError> {
        let mut guard = self.lock()?;
        let Collections {
            documents,
            unique_fields,
        } = &mut *guard;

        let fields = unique_fields.entry(collection.to_string()).or_default();
        if fields.iter().any(|existing| existing == field) {
            return Ok(());
        }

        let stored = documents.get(collection).map(Vec::as_slice).unwrap_or(&[]);
        for (position, document) in stored.iter().enumerate() {
            let value = field_value(document, field);
            if stored[..position]
                .iter()
                .any(|other| field_value(other, field) == value)
            {
                return Err(DbError::DuplicateKey {
                    collection: collection.to_string(),
                    field: field.to_string(),
                });
            }
        }

        fields.push(field.to_string());
        Ok(())
    }

    async fn close(&self) {
        self.set_offline(true);
    }
}
