use super::cast::{self, Fields};
use super::Entity;
use crate::db::ORDERS;
use crate::errors::custom::DbError;
use bson::oid::ObjectId;
use bson::{doc, Document};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id", serialize_with = "cast::serialize_object_id")]
    pub id: ObjectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub status: String,
    #[serde(serialize_with = "cast::serialize_js_date")]
    pub order_date: DateTime<Utc>,
    #[serde(rename = "__v")]
    pub version: i32,
}

/// An order as posted, before defaults are applied.
#[derive(Debug, Default)]
pub struct NewOrder {
    pub customer_name: Option<String>,
    pub product_name: Option<String>,
    pub quantity: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub status: Option<String>,
    pub order_date: Option<DateTime<Utc>>,
}

impl NewOrder {
    pub fn from_fields(fields: &Fields) -> Result<Self, DbError> {
        Ok(Self {
            customer_name: cast::text(fields, "customerName")?,
            product_name: cast::text(fields, "productName")?,
            quantity: cast::text(fields, "quantity")?,
            address: cast::text(fields, "address")?,
            phone: cast::text(fields, "phone")?,
            status: cast::text(fields, "status")?,
            order_date: cast::date(fields, "orderDate")?,
        })
    }

    /// Fills `status` and `order_date` when the caller left them out.
    pub fn into_order(self, default_status: &str, now: DateTime<Utc>) -> Order {
        Order {
            id: ObjectId::new(),
            customer_name: self.customer_name,
            product_name: self.product_name,
            quantity: self.quantity,
            address: self.address,
            phone: self.phone,
            status: self.status.unwrap_or_else(|| default_status.to_string()),
            order_date: self
                .order_date
                .unwrap_or_else(|| cast::truncate_to_millis(now)),
            version: 0,
        }
    }
}

impl Entity for Order {
    const COLLECTION: &'static str = ORDERS;

    fn to_document(&self) -> Document {
        let mut document = doc! { "_id": self.id };
        cast::set_optional(&mut document, "customerName", self.customer_name.as_deref());
        cast::set_optional(&mut document, "productName", self.product_name.as_deref());
        cast::set_optional(&mut document, "quantity", self.quantity.as_deref());
        cast::set_optional(&mut document, "address", self.address.as_deref());
        cast::set_optional(&mut document, "phone", self.phone.as_deref());
        document.insert("status", self.status.as_str());
        document.insert("orderDate", bson::DateTime::from_chrono(self.order_date));
        document.insert("__v", self.version);
        document
    }
}

impl TryFrom<Document> for Order {
    type Error = DbError;

    fn try_from(document: Document) -> Result<Self, Self::Error> {
        Ok(Self {
            id: document.get_object_id("_id")?,
            customer_name: cast::read_text(&document, "customerName")?,
            product_name: cast::read_text(&document, "productName")?,
            quantity: cast::read_text(&document, "quantity")?,
            address: cast::read_text(&document, "address")?,
            phone: cast::read_text(&document, "phone")?,
            status: cast::required(cast::read_text(&document, "status")?, "status")?,
            order_date: cast::required(cast::read_date(&document, "orderDate")?, "orderDate")?,
            version: cast::read_version(&document)?,
        })
    }
}
