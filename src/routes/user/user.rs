use super::user_error::UserError;
use crate::context::AppContext;
use crate::db_models::Credentials;
use crate::errors::custom::{message_body, DbError};
use crate::repository::Registration;
use crate::routes::fields::RequestFields;
use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{error, info, instrument};

pub const USER_ALREADY_EXISTS: &str = "User already exists";
pub const REGISTRATION_SUCCESSFUL: &str = "Registration successful";
pub const LOGIN_SUCCESSFUL: &str = "Login successful";
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

fn email_of(body: &RequestFields) -> &str {
    body.0
        .get("email")
        .and_then(|email| email.as_str())
        .unwrap_or_default()
}

/******************************************/
// Registering User Route
/******************************************/
/**
 * @route   POST /register
 * @access  Public
 */
#[instrument(name = "Register a new user", skip(context, body), fields(email = %email_of(&body)))]
pub async fn register_user(
    context: web::Data<AppContext>,
    body: RequestFields,
) -> Result<HttpResponse, UserError> {
    let registration = context.users.create(&body.into_inner()).await.map_err(|err| {
        error!(error = %err, "Registration failed");
        UserError::RegistrationFailed(err)
    })?;

    match registration {
        Registration::AlreadyExists => {
            Ok(HttpResponse::Ok().json(message_body(USER_ALREADY_EXISTS)))
        }
        Registration::Created(user) => {
            info!(user_id = %user.id, "User registered");
            Ok(HttpResponse::Ok().json(message_body(REGISTRATION_SUCCESSFUL)))
        }
    }
}

/******************************************/
// Login Route
/******************************************/
/**
 * @route   POST /login
 * @access  Public
 */
#[instrument(name = "Login a user", skip(context, body), fields(email = %email_of(&body)))]
pub async fn login_user(
    context: web::Data<AppContext>,
    body: RequestFields,
) -> Result<HttpResponse, UserError> {
    let fail = |err: DbError| {
        error!(error = %err, "Login failed");
        UserError::LoginFailed(err)
    };
    let credentials = Credentials::from_fields(&body.into_inner()).map_err(fail)?;
    let user = context
        .users
        .find_by_credentials(&credentials)
        .await
        .map_err(fail)?;

    match user {
        Some(user) => {
            info!(user_id = %user.id, "Login successful");
            Ok(HttpResponse::Ok().json(json!({ "message": LOGIN_SUCCESSFUL, "user": user })))
        }
        None => Ok(HttpResponse::Ok().json(message_body(INVALID_CREDENTIALS))),
    }
}
