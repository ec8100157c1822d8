//! Persistence layer.
//!
//! Handlers never talk to a database driver directly: they go through a
//! repository, which goes through a [`DocumentStore`]. The production store is
//! [`MongoStore`]; [`MemoryStore`] keeps the same observable semantics in
//! process and backs the test suite.

use crate::errors::custom::DbError;
use async_trait::async_trait;
use bson::Document;
use std::sync::Arc;

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::{establish_connection, MongoStore};

pub const USERS: &str = "users";
pub const PRODUCTS: &str = "products";
pub const ORDERS: &str = "orders";

/// `(collection, field)` pairs that must hold unique values.
pub const UNIQUE_INDEXES: &[(&str, &str)] = &[(USERS, "email")];

pub type SharedStore = Arc<dyn DocumentStore>;

/// A database of schema-flexible documents grouped into named collections.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Persists `document`. A unique index violation is reported as
    /// [`DbError::DuplicateKey`].
    async fn insert_one(&self, collection: &str, document: Document) -> Result<(), DbError>;

    /// First document, in insertion order, whose fields equal every value of
    /// `filter`. A `null` filter value matches a missing field.
    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, DbError>;

    /// Every document of `collection`, in insertion order.
    async fn find_all(&self, collection: &str) -> Result<Vec<Document>, DbError>;

    async fn ensure_unique_index(&self, collection: &str, field: &str) -> Result<(), DbError>;

    /// Releases the underlying connection. Operations issued afterwards fail.
    async fn close(&self);
}
