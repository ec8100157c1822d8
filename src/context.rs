use crate::config::configuration::{DatabaseBackend, Settings};
use crate::db::{establish_connection, MemoryStore, SharedStore, UNIQUE_INDEXES};
use crate::errors::custom::DbError;
use crate::repository::{OrderDefaults, OrderRepository, ProductRepository, UserRepository};
use std::sync::Arc;
use tracing::info;

/// Everything a handler needs, built once before the listener starts and
/// closed once after it stops.
pub struct AppContext {
    store: SharedStore,
    pub users: UserRepository,
    pub products: ProductRepository,
    pub orders: OrderRepository,
}

impl AppContext {
    /// Opens the configured store. A MongoDB server that cannot be reached is
    /// logged by the background bootstrap and never fails this call.
    pub async fn connect(settings: &Settings) -> Result<Self, std::io::Error> {
        let backend = settings
            .database
            .backend()
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;
        let defaults = OrderDefaults::from(&settings.defaults);

        match backend {
            DatabaseBackend::Mongo => {
                let store = Arc::new(establish_connection(&settings.database).await);
                store.spawn_bootstrap();
                Ok(Self::assemble(store, defaults))
            }
            DatabaseBackend::Memory => {
                info!("Using the in-memory store");
                Self::with_store(Arc::new(MemoryStore::new()), defaults)
                    .await
                    .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))
            }
        }
    }

    /// Wraps an already open store, building its unique indexes first.
    pub async fn with_store(store: SharedStore, defaults: OrderDefaults) -> Result<Self, DbError> {
        for (collection, field) in UNIQUE_INDEXES {
            store.ensure_unique_index(collection, field).await?;
        }
        Ok(Self::assemble(store, defaults))
    }

    fn assemble(store: SharedStore, defaults: OrderDefaults) -> Self {
        Self {
            users: UserRepository::new(store.clone()),
            products: ProductRepository::new(store.clone()),
            orders: OrderRepository::new(store.clone(), defaults),
            store,
        }
    }

    pub async fn close(&self) {
        self.store.close().await;
    }
}
