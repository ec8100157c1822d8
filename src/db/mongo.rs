use super::{DocumentStore, UNIQUE_INDEXES};
use crate::config::configuration::DatabaseSettings;
use crate::errors::custom::DbError;
use async_trait::async_trait;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

const DUPLICATE_KEY_CODE: i32 = 11000;

enum Connection {
    Ready { client: Client, database: Database },
    Unavailable(String),
}

pub struct MongoStore {
    connection: Connection,
    /// Set once every entry of [`UNIQUE_INDEXES`] exists on the server.
    indexes: OnceCell<()>,
}

/******************************************/
// Establishing Db Connection
/******************************************/
/// Builds the client without touching the network. A bad connection string
/// leaves the store unavailable instead of aborting startup.
pub async fn establish_connection(settings: &DatabaseSettings) -> MongoStore {
    match connect(settings).await {
        Ok((client, database)) => MongoStore {
            connection: Connection::Ready { client, database },
            indexes: OnceCell::new(),
        },
        Err(err) => {
            error!(error = %err, uri = %settings.uri, "MongoDB connection error");
            MongoStore {
                connection: Connection::Unavailable(err.to_string()),
                indexes: OnceCell::new(),
            }
        }
    }
}

async fn connect(settings: &DatabaseSettings) -> Result<(Client, Database), mongodb::error::Error> {
    let mut options = ClientOptions::parse(&settings.uri).await?;
    options.app_name = Some("farm2customer".to_string());
    options.server_selection_timeout = Some(settings.server_selection_timeout());
    let client = Client::with_options(options)?;
    let database = client.database(&settings.name);
    Ok((client, database))
}

impl MongoStore {
    fn database(&self) -> Result<&Database, DbError> {
        match &self.connection {
            Connection::Ready { database, .. } => Ok(database),
            Connection::Unavailable(reason) => Err(DbError::ConnectionError(reason.clone())),
        }
    }

    fn collection(&self, name: &str) -> Result<Collection<Document>, DbError> {
        Ok(self.database()?.collection::<Document>(name))
    }

    pub async fn ping(&self) -> Result<(), DbError> {
        self.database()?.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }

    /// Builds every unique index once. A failed attempt leaves nothing
    /// recorded, so the next call tries again.
    pub async fn ensure_indexes(&self) -> Result<(), DbError> {
        self.indexes
            .get_or_try_init(|| async {
                for (collection, field) in UNIQUE_INDEXES {
                    self.ensure_unique_index(collection, field).await?;
                }
                info!("Unique indexes ready");
                Ok::<(), DbError>(())
            })
            .await?;
        Ok(())
    }

    pub fn indexes_ready(&self) -> bool {
        self.indexes.initialized()
    }

    /// Pings the server and builds the unique indexes in the background, so
    /// that an unreachable server never holds up the listener. Inserts into
    /// an indexed collection retry the build until it succeeds.
    pub fn spawn_bootstrap(self: &Arc<Self>) -> JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(err) = store.ping().await {
                error!(error = %err, "MongoDB connection error");
                return;
            }
            info!("MongoDB connected");
            if let Err(err) = store.ensure_indexes().await {
                error!(error = %err, "Failed to build unique indexes, retrying on next write");
            }
        })
    }
}

fn has_unique_index(collection: &str) -> bool {
    UNIQUE_INDEXES.iter().any(|(indexed, _)| *indexed == collection)
}

fn map_insert_error(collection: &str, err: mongodb::error::Error) -> DbError {
    if let ErrorKind::Write(WriteFailure::WriteError(ref write_error)) = *err.kind {
        if write_error.code == DUPLICATE_KEY_CODE {
            return DbError::DuplicateKey {
                collection: collection.to_string(),
                field: duplicated_field(&write_error.message).to_string(),
            };
        }
    }
    DbError::from(err)
}

/// Pulls the field name out of
/// `E11000 duplicate key error collection: db.users index: email_1 dup key: ...`.
fn duplicated_field(message: &str) -> &str {
    message
        .split("index: ")
        .nth(1)
        .and_then(|rest| rest.split_whitespace().next())
        .map(|index| index.strip_suffix("_1").unwrap_or(index))
        .unwrap_or("unknown")
}

#[async_trait]
impl DocumentStore for MongoStore {
    #[instrument(name = "Mongo insert", skip(self, document))]
    async fn insert_one(&self, collection: &str, document: Document) -> Result<(), DbError> {
        if has_unique_index(collection) {
            self.ensure_indexes().await?;
        }
        self.collection(collection)?
            .insert_one(document, None)
            .await
            .map_err(|err| map_insert_error(collection, err))?;
        Ok(())
    }

    #[instrument(name = "Mongo find one", skip(self, filter))]
    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, DbError> {
        Ok(self.collection(collection)?.find_one(filter, None).await?)
    }

    #[instrument(name = "Mongo find all", skip(self))]
    async fn find_all(&self, collection: &str) -> Result<Vec<Document>, DbError> {
        let cursor = self.collection(collection)?.find(None, None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn ensure_unique_index(&self, collection: &str, field: &str) -> Result<(), DbError> {
        let index = IndexModel::builder()
            .keys(doc! { field: 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection(collection)?.create_index(index, None).await?;
        Ok(())
    }

    async fn close(&self) {
        if let Connection::Ready { client, .. } = &self.connection {
            client.clone().shutdown().await;
            info!("MongoDB connection closed");
        }
    }
}
