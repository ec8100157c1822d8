use crate::errors::custom::{message_body, DbError};
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

pub const SAVE_FAILED: &str = "Error saving product";
pub const FETCH_FAILED: &str = "Error fetching products";

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Error saving product: {0}")]
    SaveFailed(#[source] DbError),

    #[error("Error fetching products: {0}")]
    FetchFailed(#[source] DbError),
}

impl ResponseError for ProductError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ProductError::SaveFailed(_) => SAVE_FAILED,
            ProductError::FetchFailed(_) => FETCH_FAILED,
        };
        HttpResponse::InternalServerError().json(message_body(message))
    }
}
