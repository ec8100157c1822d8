use crate::db::SharedStore;
use crate::db_models::user::NewUser;
use crate::db_models::{cast::Fields, Credentials, User};
use crate::errors::custom::DbError;
use bson::{doc, Document};
use tracing::{info, instrument};

/// Outcome of a registration. An existing email is a business outcome, not
/// an error.
#[derive(Debug)]
pub enum Registration {
    Created(User),
    AlreadyExists,
}

#[derive(Clone)]
pub struct UserRepository {
    store: SharedStore,
}

impl UserRepository {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Looks the email up first and only inserts when nobody holds it. The
    /// unique index on `email` settles concurrent registrations: the insert
    /// that loses the race comes back as a duplicate key and is reported as
    /// [`Registration::AlreadyExists`] as well.
    #[instrument(name = "Create user", skip(self, fields))]
    pub async fn create(&self, fields: &Fields) -> Result<Registration, DbError> {
        let new_user = NewUser::from_fields(fields)?;

        if let Some(email) = new_user.email.as_deref() {
            if self.find_one(doc! { "email": email }).await?.is_some() {
                info!("Email already registered");
                return Ok(Registration::AlreadyExists);
            }
        }

        let user = new_user.into_user()?;
        match super::insert(self.store.as_ref(), &user).await {
            Ok(()) => Ok(Registration::Created(user)),
            Err(DbError::DuplicateKey { ref field, .. }) if field == "email" => {
                info!("Email registered concurrently");
                Ok(Registration::AlreadyExists)
            }
            Err(err) => Err(err),
        }
    }

    pub async fn find_one(&self, filter: Document) -> Result<Option<User>, DbError> {
        super::find_one(self.store.as_ref(), filter).await
    }

    /// Authentication succeeds when one record holds both values.
    #[instrument(name = "Find user by credentials", skip(self, credentials))]
    pub async fn find_by_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<User>, DbError> {
        self.find_one(credentials.filter()).await
    }

    pub async fn find_all(&self) -> Result<Vec<User>, DbError> {
        super::find_all(self.store.as_ref()).await
    }
}
