/// Chirp Routes

use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chirp::sanitize_chirp;
use crate::domain::Chirp;
use crate::error::{AppError, AuthError, DatabaseError, ErrorContext};
use crate::middleware::AuthenticatedUser;
use crate::store::ChirpStore;

#[derive(Deserialize)]
pub struct ChirpRequest {
    pub body: String,
}

#[derive(Debug, Serialize)]
pub struct ChirpResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body: String,
    pub user_id: Uuid,
}

impl From<Chirp> for ChirpResponse {
    fn from(chirp: Chirp) -> Self {
        Self {
            id: chirp.id,
            created_at: chirp.created_at,
            updated_at: chirp.updated_at,
            body: chirp.body,
            user_id: chirp.user_id,
        }
    }
}

#[derive(Serialize)]
pub struct ValidateChirpResponse {
    pub cleaned_body: String,
}

#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Deserialize)]
pub struct ListChirpsQuery {
    pub author_id: Option<Uuid>,
    #[serde(default)]
    pub sort: SortOrder,
}

/// POST /api/validate_chirp
///
/// Dry run of chirp sanitization; nothing is stored.
pub async fn validate_chirp(form: web::Json<ChirpRequest>) -> Result<HttpResponse, AppError> {
    let cleaned_body = sanitize_chirp(&form.body)?;
    Ok(HttpResponse::Ok().json(ValidateChirpResponse { cleaned_body }))
}

/// POST /api/chirps
///
/// # Errors
/// - 400: body longer than 140 characters
/// - 401: missing or invalid session token
pub async fn create_chirp(
    user: AuthenticatedUser,
    form: web::Json<ChirpRequest>,
    store: web::Data<dyn ChirpStore>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("create_chirp").with_user_id(user.user_id);

    let body = sanitize_chirp(&form.body)?;
    let chirp = store.create_chirp(&body, user.user_id).await?;

    tracing::info!(
        request_id = %context.request_id,
        user_id = %user.user_id,
        chirp_id = %chirp.id,
        "Chirp created"
    );

    Ok(HttpResponse::Created().json(ChirpResponse::from(chirp)))
}

/// GET /api/chirps?author_id=<uuid>&sort=asc|desc
pub async fn list_chirps(
    query: web::Query<ListChirpsQuery>,
    store: web::Data<dyn ChirpStore>,
) -> Result<HttpResponse, AppError> {
    let mut chirps = store.list_chirps(query.author_id).await?;
    if query.sort == SortOrder::Desc {
        chirps.reverse();
    }

    let response: Vec<ChirpResponse> = chirps.into_iter().map(ChirpResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/chirps/{chirp_id}
pub async fn get_chirp(
    path: web::Path<Uuid>,
    store: web::Data<dyn ChirpStore>,
) -> Result<HttpResponse, AppError> {
    let chirp = store
        .get_chirp(path.into_inner())
        .await?
        .ok_or_else(|| DatabaseError::NotFound("Chirp not found".to_string()))?;

    Ok(HttpResponse::Ok().json(ChirpResponse::from(chirp)))
}

/// DELETE /api/chirps/{chirp_id}
///
/// # Errors
/// - 401: missing or invalid session token
/// - 403: the chirp belongs to someone else
/// - 404: no such chirp
pub async fn delete_chirp(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    store: web::Data<dyn ChirpStore>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("delete_chirp").with_user_id(user.user_id);
    let chirp_id = path.into_inner();

    let chirp = store
        .get_chirp(chirp_id)
        .await?
        .ok_or_else(|| DatabaseError::NotFound("Chirp not found".to_string()))?;

    if chirp.user_id != user.user_id {
        let error = AppError::Auth(AuthError::Forbidden(
            "chirp belongs to another user".to_string(),
        ));
        context.log_error(&error);
        return Err(error);
    }

    store.delete_chirp(chirp_id).await?;

    tracing::info!(
        request_id = %context.request_id,
        chirp_id = %chirp_id,
        "Chirp deleted"
    );

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_order_defaults_to_ascending() {
        let query: ListChirpsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.sort, SortOrder::Asc);
        assert!(query.author_id.is_none());

        let query: ListChirpsQuery = serde_json::from_str(r#"{"sort":"desc"}"#).unwrap();
        assert_eq!(query.sort, SortOrder::Desc);
    }
}
