use crate::errors::custom::{message_body, DbError};
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

pub const PLACE_FAILED: &str = "Error placing order";
pub const FETCH_FAILED: &str = "Error fetching orders";

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Error placing order: {0}")]
    PlaceFailed(#[source] DbError),

    #[error("Error fetching orders: {0}")]
    FetchFailed(#[source] DbError),
}

impl ResponseError for OrderError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            OrderError::PlaceFailed(_) => PLACE_FAILED,
            OrderError::FetchFailed(_) => FETCH_FAILED,
        };
        HttpResponse::InternalServerError().json(message_body(message))
    }
}
