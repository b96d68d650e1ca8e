/// User Routes
///
/// Account creation and credential updates.

use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::hash_password;
use crate::domain::User;
use crate::error::{AppError, ErrorContext, ValidationError};
use crate::middleware::AuthenticatedUser;
use crate::store::ChirpStore;

/// Body of user creation and update requests
#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Public view of a user; never includes the password hash
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    pub is_chirpy_red: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            created_at: user.created_at,
            updated_at: user.updated_at,
            email: user.email,
            is_chirpy_red: user.is_chirpy_red,
        }
    }
}

/// Trimmed email, rejected when blank
fn required_email(email: &str) -> Result<&str, ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::EmptyField("email".to_string()));
    }
    Ok(email)
}

/// bcrypt is deliberately slow, so it runs on the blocking pool
async fn hash_off_thread(password: String) -> Result<String, AppError> {
    let hashed = web::block(move || hash_password(&password)).await??;
    Ok(hashed)
}

/// POST /api/users
///
/// # Errors
/// - 400: blank email or malformed body
/// - 409: email already registered
pub async fn create_user(
    form: web::Json<CredentialsRequest>,
    store: web::Data<dyn ChirpStore>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("user_registration");
    let CredentialsRequest { email, password } = form.into_inner();

    let email = required_email(&email)?;
    let hashed_password = hash_off_thread(password).await?;
    let user = store.create_user(email, &hashed_password).await?;

    tracing::info!(
        request_id = %context.request_id,
        user_id = %user.id,
        "User registered successfully"
    );

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// PUT /api/users
///
/// Replaces the email and password of the authenticated user.
///
/// # Errors
/// - 401: missing or invalid session token
/// - 404: the token's user no longer exists
/// - 409: the new email belongs to someone else
pub async fn update_user(
    user: AuthenticatedUser,
    form: web::Json<CredentialsRequest>,
    store: web::Data<dyn ChirpStore>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("user_update").with_user_id(user.user_id);
    let CredentialsRequest { email, password } = form.into_inner();

    let email = required_email(&email)?;
    let hashed_password = hash_off_thread(password).await?;
    let updated = store
        .update_user(user.user_id, email, &hashed_password)
        .await?;

    tracing::info!(
        request_id = %context.request_id,
        user_id = ?context.user_id,
        "User credentials updated"
    );

    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}
