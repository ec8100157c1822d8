use crate::errors::custom::{message_body, DbError};
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

pub const REGISTRATION_FAILED: &str = "Registration failed";
pub const LOGIN_FAILED: &str = "Login failed";

/// Infrastructure failures of the user routes. Business outcomes such as a
/// taken email or wrong credentials are successful responses, not errors.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("Registration failed: {0}")]
    RegistrationFailed(#[source] DbError),

    #[error("Login failed: {0}")]
    LoginFailed(#[source] DbError),
}

impl ResponseError for UserError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            UserError::RegistrationFailed(_) => REGISTRATION_FAILED,
            UserError::LoginFailed(_) => LOGIN_FAILED,
        };
        HttpResponse::InternalServerError().json(message_body(message))
    }
}
