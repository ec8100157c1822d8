use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Failures raised by the persistence layer.
///
/// Every variant is an infrastructure failure from the point of view of a
/// handler: it ends up as a 500 with the route's fixed message.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Connection Error: {0}")]
    ConnectionError(String),

    #[error("Duplicate Key Error: {collection}.{field} already holds this value")]
    DuplicateKey { collection: String, field: String },

    #[error("Validation Error: {0}")]
    ValidationError(String),

    #[error("Cast Error: {0}")]
    CastError(String),

    #[error("Query Error: {0}")]
    QueryError(String),

    #[error("Other Database Error: {0}")]
    Other(String),
}

impl From<mongodb::error::Error> for DbError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;

        match *err.kind {
            ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::ConnectionPoolCleared { .. }
            | ErrorKind::DnsResolve { .. } => DbError::ConnectionError(err.to_string()),
            ErrorKind::BsonSerialization(_) | ErrorKind::BsonDeserialization(_) => {
                DbError::CastError(err.to_string())
            }
            ErrorKind::Write(_) | ErrorKind::Command(_) | ErrorKind::InvalidArgument { .. } => {
                DbError::QueryError(err.to_string())
            }
            _ => DbError::Other(err.to_string()),
        }
    }
}

impl From<bson::de::Error> for DbError {
    fn from(err: bson::de::Error) -> Self {
        DbError::CastError(err.to_string())
    }
}

impl From<bson::document::ValueAccessError> for DbError {
    fn from(err: bson::document::ValueAccessError) -> Self {
        DbError::CastError(err.to_string())
    }
}

/// Rejection for request bodies that cannot be read as a field mapping.
#[derive(Debug, Error)]
pub enum BodyError {
    #[error("Malformed JSON body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed form body: {0}")]
    Form(#[from] serde::de::value::Error),

    #[error("JSON body must be an object")]
    NotAnObject,
}

impl ResponseError for BodyError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::BadRequest().json(json!({ "message": "Malformed request body" }))
    }
}

/// Body of every failure response: a fixed message and nothing else.
pub fn message_body(message: &str) -> serde_json::Value {
    json!({ "message": message })
}
