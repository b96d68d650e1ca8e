/// Polka payment webhook
///
/// Polka authenticates with a static shared key in `Authorization: ApiKey <key>`.

use actix_web::{dev::Payload, web, FromRequest, HttpRequest, HttpResponse};
use serde::Deserialize;
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::auth::extract_api_key;
use crate::configuration::PolkaSettings;
use crate::error::{AppError, AuthError, ConfigError, ErrorContext};
use crate::middleware::authorization_header;
use crate::store::ChirpStore;

const USER_UPGRADED: &str = "user.upgraded";

#[derive(Deserialize)]
pub struct PolkaWebhookData {
    pub user_id: Uuid,
}

#[derive(Deserialize)]
pub struct PolkaWebhook {
    pub event: String,
    pub data: PolkaWebhookData,
}

/// A request that carries Polka's api key
///
/// Listed before the body in the handler signature, so an unauthenticated
/// caller is turned away before the payload is parsed.
pub struct PolkaCaller;

impl FromRequest for PolkaCaller {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(check_api_key(req))
    }
}

fn check_api_key(req: &HttpRequest) -> Result<PolkaCaller, AppError> {
    let polka = req
        .app_data::<web::Data<PolkaSettings>>()
        .ok_or_else(|| ConfigError::MissingRequired("polka settings".to_string()))?;

    let api_key = extract_api_key(authorization_header(req))?;
    if api_key != polka.api_key {
        return Err(AuthError::InvalidApiKey.into());
    }
    Ok(PolkaCaller)
}

/// POST /api/polka/webhooks
///
/// `user.upgraded` marks the user as Chirpy Red; other events are
/// acknowledged and ignored.
///
/// # Errors
/// - 401: missing or wrong api key, checked before the body is read
/// - 400: malformed body
/// - 404: unknown user
pub async fn polka_webhook(
    _caller: PolkaCaller,
    payload: web::Json<PolkaWebhook>,
    store: web::Data<dyn ChirpStore>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("polka_webhook");

    if payload.event != USER_UPGRADED {
        tracing::debug!(event = %payload.event, "Ignoring webhook event");
        return Ok(HttpResponse::NoContent().finish());
    }

    store
        .upgrade_user_to_chirpy_red(payload.data.user_id)
        .await?;

    tracing::info!(
        request_id = %context.request_id,
        user_id = %payload.data.user_id,
        "User upgraded to Chirpy Red"
    );

    Ok(HttpResponse::NoContent().finish())
}
