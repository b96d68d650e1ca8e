/// Authentication Routes
///
/// Login issues a session token plus a refresh token; the refresh token can
/// later be exchanged for new session tokens until it expires or is revoked.

use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::auth::{
    extract_bearer_token, generate_refresh_token, issue_session_token, verify_password,
};
use crate::configuration::JwtSettings;
use crate::domain::RefreshToken;
use crate::error::{AppError, AuthError, DatabaseError, ErrorContext};
use crate::middleware::authorization_header;
use crate::routes::users::UserResponse;
use crate::store::ChirpStore;

/// User login request
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The logged-in user together with fresh credentials
#[derive(Serialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub token: String,
    pub refresh_token: String,
}

/// A newly minted session token
#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /api/login
///
/// # Errors
/// - 401: unknown email or wrong password (same message for both)
/// - 500: hashing or token generation failed
pub async fn login(
    form: web::Json<LoginRequest>,
    store: web::Data<dyn ChirpStore>,
    jwt_config: web::Data<JwtSettings>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("user_login");
    let LoginRequest { email, password } = form.into_inner();

    let user = store
        .get_user_by_email(email.trim())
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let hashed_password = user.hashed_password.clone();
    let password_valid =
        web::block(move || verify_password(&password, &hashed_password)).await??;
    if !password_valid {
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = issue_session_token(
        user.id,
        jwt_config.secret.as_bytes(),
        jwt_config.access_token_ttl(),
    )?;
    let refresh_token = generate_refresh_token()?;
    store
        .create_refresh_token(&RefreshToken::new(
            refresh_token.clone(),
            user.id,
            jwt_config.refresh_token_ttl(),
        ))
        .await?;

    tracing::info!(
        request_id = %context.request_id,
        user_id = %user.id,
        "User logged in successfully"
    );

    Ok(HttpResponse::Ok().json(LoginResponse {
        user: user.into(),
        token,
        refresh_token,
    }))
}

/// POST /api/refresh
///
/// Exchanges the refresh token in the `Authorization: Bearer` header for a
/// new session token. The refresh token itself stays valid.
///
/// # Errors
/// - 401: missing, unknown, expired or revoked refresh token
pub async fn refresh(
    req: HttpRequest,
    store: web::Data<dyn ChirpStore>,
    jwt_config: web::Data<JwtSettings>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("token_refresh");
    let refresh_token = extract_bearer_token(authorization_header(&req))?;

    let user_id = store
        .get_user_from_refresh_token(refresh_token, Utc::now())
        .await?
        .ok_or(AuthError::InvalidRefreshToken)?;

    let token = issue_session_token(
        user_id,
        jwt_config.secret.as_bytes(),
        jwt_config.access_token_ttl(),
    )?;

    tracing::info!(
        request_id = %context.request_id,
        user_id = %user_id,
        "Session token refreshed"
    );

    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

/// POST /api/revoke
///
/// Revokes the refresh token in the `Authorization: Bearer` header.
///
/// # Errors
/// - 401: missing or unknown refresh token
pub async fn revoke(
    req: HttpRequest,
    store: web::Data<dyn ChirpStore>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("token_revoke");
    let refresh_token = extract_bearer_token(authorization_header(&req))?;

    store
        .revoke_refresh_token(refresh_token, Utc::now())
        .await
        .map_err(|e| match e {
            DatabaseError::NotFound(_) => AppError::Auth(AuthError::InvalidRefreshToken),
            other => other.into(),
        })?;

    tracing::info!(request_id = %context.request_id, "Refresh token revoked");

    Ok(HttpResponse::NoContent().finish())
}
