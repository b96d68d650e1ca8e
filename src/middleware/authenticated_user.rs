/// Session token authentication for route handlers
///
/// Handlers that take an [`AuthenticatedUser`] argument only run when the
/// request carries a valid `Authorization: Bearer <session token>` header.

use actix_web::{dev::Payload, http::header::AUTHORIZATION, web, FromRequest, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::auth::{extract_bearer_token, verify_session_token};
use crate::configuration::JwtSettings;
use crate::error::{AppError, ConfigError};

/// The user a verified session token was issued for
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, AppError> {
    let jwt_config = req
        .app_data::<web::Data<JwtSettings>>()
        .ok_or_else(|| ConfigError::MissingRequired("jwt settings".to_string()))?;

    let token = extract_bearer_token(authorization_header(req))?;
    let user_id = verify_session_token(token, jwt_config.secret.as_bytes())?;

    tracing::debug!(user_id = %user_id, "Session token validated");

    Ok(AuthenticatedUser { user_id })
}

/// Raw `Authorization` header value; a non-UTF-8 value counts as absent
pub fn authorization_header(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
}
