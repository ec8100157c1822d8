use crate::config::configuration::{DefaultsSettings, DEFAULT_ORDER_STATUS};
use crate::db::SharedStore;
use crate::db_models::order::NewOrder;
use crate::db_models::{cast::Fields, Order};
use crate::errors::custom::DbError;
use bson::Document;
use chrono::Utc;
use tracing::instrument;

/// Values filled into an order when the posted body leaves them out. The
/// order date always defaults to the clock at creation time.
#[derive(Debug, Clone)]
pub struct OrderDefaults {
    pub status: String,
}

impl Default for OrderDefaults {
    fn default() -> Self {
        Self {
            status: DEFAULT_ORDER_STATUS.to_string(),
        }
    }
}

impl From<&DefaultsSettings> for OrderDefaults {
    fn from(settings: &DefaultsSettings) -> Self {
        Self {
            status: settings.order_status.clone(),
        }
    }
}

#[derive(Clone)]
pub struct OrderRepository {
    store: SharedStore,
    defaults: OrderDefaults,
}

impl OrderRepository {
    pub fn new(store: SharedStore, defaults: OrderDefaults) -> Self {
        Self { store, defaults }
    }

    #[instrument(name = "Create order", skip(self, fields))]
    pub async fn create(&self, fields: &Fields) -> Result<Order, DbError> {
        let order = NewOrder::from_fields(fields)?.into_order(&self.defaults.status, Utc::now());
        super::insert(self.store.as_ref(), &order).await?;
        Ok(order)
    }

    pub async fn find_one(&self, filter: Document) -> Result<Option<Order>, DbError> {
        super::find_one(self.store.as_ref(), filter).await
    }

    #[instrument(name = "List orders", skip(self))]
    pub async fn find_all(&self) -> Result<Vec<Order>, DbError> {
        super::find_all(self.store.as_ref()).await
    }
}
