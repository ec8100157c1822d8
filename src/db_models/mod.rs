use crate::errors::custom::DbError;
use bson::Document;

pub mod cast;
pub mod order;
pub mod product;
pub mod user;

pub use order::Order;
pub use product::Product;
pub use user::{Credentials, User};

/// A record kind stored in its own collection.
pub trait Entity: TryFrom<Document, Error = DbError> {
    const COLLECTION: &'static str;

    fn to_document(&self) -> Document;
}
