use super::cast::{self, Fields};
use super::Entity;
use crate::db::PRODUCTS;
use crate::errors::custom::DbError;
use bson::oid::ObjectId;
use bson::{doc, Document};
use serde::Serialize;

/// A listed product. Every field except the identifier is optional;
/// `quantity` is free-form text such as `"5kg"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    #[serde(rename = "_id", serialize_with = "cast::serialize_object_id")]
    pub id: ObjectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "cast::serialize_js_number"
    )]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freshness: Option<String>,
    #[serde(rename = "__v")]
    pub version: i32,
}

impl Product {
    /// Casts the posted body onto the product schema; unknown keys are dropped.
    pub fn from_fields(fields: &Fields) -> Result<Self, DbError> {
        Ok(Self {
            id: ObjectId::new(),
            name: cast::text(fields, "name")?,
            price: cast::number(fields, "price")?,
            quantity: cast::text(fields, "quantity")?,
            freshness: cast::text(fields, "freshness")?,
            version: 0,
        })
    }
}

impl Entity for Product {
    const COLLECTION: &'static str = PRODUCTS;

    fn to_document(&self) -> Document {
        let mut document = doc! { "_id": self.id };
        cast::set_optional(&mut document, "name", self.name.as_deref());
        cast::set_optional(&mut document, "price", self.price);
        cast::set_optional(&mut document, "quantity", self.quantity.as_deref());
        cast::set_optional(&mut document, "freshness", self.freshness.as_deref());
        document.insert("__v", self.version);
        document
    }
}

impl TryFrom<Document> for Product {
    type Error = DbError;

    fn try_from(document: Document) -> Result<Self, Self::Error> {
        Ok(Self {
            id: document.get_object_id("_id")?,
            name: cast::read_text(&document, "name")?,
            price: cast::read_number(&document, "price")?,
            quantity: cast::read_text(&document, "quantity")?,
            freshness: cast::read_text(&document, "freshness")?,
            version: cast::read_version(&document)?,
        })
    }
}
