use super::cast::{self, Fields};
use super::Entity;
use crate::db::USERS;
use crate::errors::custom::DbError;
use bson::oid::ObjectId;
use bson::{doc, Bson, Document};
use serde::Serialize;

#[derive(Clone, PartialEq, Serialize)]
pub struct User {
    #[serde(rename = "_id", serialize_with = "cast::serialize_object_id")]
    pub id: ObjectId,
    pub fullname: String,
    pub email: String,
    /// Stored and returned verbatim.
    pub password: String,
    #[serde(rename = "__v")]
    pub version: i32,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("fullname", &self.fullname)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl Entity for User {
    const COLLECTION: &'static str = USERS;

    fn to_document(&self) -> Document {
        doc! {
            "_id": self.id,
            "fullname": self.fullname.as_str(),
            "email": self.email.as_str(),
            "password": self.password.as_str(),
            "__v": self.version,
        }
    }
}

impl TryFrom<Document> for User {
    type Error = DbError;

    fn try_from(document: Document) -> Result<Self, Self::Error> {
        Ok(Self {
            id: document.get_object_id("_id")?,
            fullname: cast::required(cast::read_text(&document, "fullname")?, "fullname")?,
            email: cast::required(cast::read_text(&document, "email")?, "email")?,
            password: cast::required(cast::read_text(&document, "password")?, "password")?,
            version: cast::read_version(&document)?,
        })
    }
}

/// Registration fields as posted; every one of them is required.
pub struct NewUser {
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl NewUser {
    pub fn from_fields(fields: &Fields) -> Result<Self, DbError> {
        Ok(Self {
            fullname: cast::text(fields, "fullname")?,
            email: cast::text(fields, "email")?,
            password: cast::text(fields, "password")?,
        })
    }

    pub fn into_user(self) -> Result<User, DbError> {
        Ok(User {
            id: ObjectId::new(),
            fullname: cast::required_text(self.fullname, "fullname")?,
            email: cast::required_text(self.email, "email")?,
            password: cast::required_text(self.password, "password")?,
            version: 0,
        })
    }
}

/// Login fields. A user authenticates when a record matches both values.
pub struct Credentials {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    pub fn from_fields(fields: &Fields) -> Result<Self, DbError> {
        Ok(Self {
            email: cast::text(fields, "email")?,
            password: cast::text(fields, "password")?,
        })
    }

    /// An absent value filters on `null`, which never matches a stored user.
    pub fn filter(&self) -> Document {
        let as_bson = |value: &Option<String>| match value {
            Some(value) => Bson::String(value.clone()),
            None => Bson::Null,
        };
        doc! {
            "email": as_bson(&self.email),
            "password": as_bson(&self.password),
        }
    }
}
