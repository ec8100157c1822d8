use crate::db::SharedStore;
use crate::db_models::{cast::Fields, Product};
use crate::errors::custom::DbError;
use bson::Document;
use tracing::instrument;

#[derive(Clone)]
pub struct ProductRepository {
    store: SharedStore,
}

impl ProductRepository {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    #[instrument(name = "Create product", skip(self, fields))]
    pub async fn create(&self, fields: &Fields) -> Result<Product, DbError> {
        let product = Product::from_fields(fields)?;
        super::insert(self.store.as_ref(), &product).await?;
        Ok(product)
    }

    pub async fn find_one(&self, filter: Document) -> Result<Option<Product>, DbError> {
        super::find_one(self.store.as_ref(), filter).await
    }

    #[instrument(name = "List products", skip(self))]
    pub async fn find_all(&self) -> Result<Vec<Product>, DbError> {
        super::find_all(self.store.as_ref()).await
    }
}
