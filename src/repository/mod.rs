//! Typed accessors over each collection.
//!
//! A repository turns request fields into an entity, applies its defaults,
//! and hands the resulting document to the [`DocumentStore`]. Reads convert
//! stored documents back into entities.

use crate::db::DocumentStore;
use crate::db_models::Entity;
use crate::errors::custom::DbError;
use bson::Document;

pub mod order;
pub mod product;
pub mod user;

pub use order::{OrderDefaults, OrderRepository};
pub use product::ProductRepository;
pub use user::{Registration, UserRepository};

async fn insert<E: Entity>(store: &dyn DocumentStore, entity: &E) -> Result<(), DbError> {
    store.insert_one(E::COLLECTION, entity.to_document()).await
}

async fn find_one<E: Entity>(
    store: &dyn DocumentStore,
    filter: Document,
) -> Result<Option<E>, DbError> {
    store
        .find_one(E::COLLECTION, filter)
        .await?
        .map(E::try_from)
        .transpose()
}

async fn find_all<E: Entity>(store: &dyn DocumentStore) -> Result<Vec<E>, DbError> {
    store
        .find_all(E::COLLECTION)
        .await?
        .into_iter()
        .map(E::try_from)
        .collect()
}
