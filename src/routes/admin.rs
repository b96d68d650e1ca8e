use actix_web::{web, HttpResponse};

use crate::configuration::{ApplicationSettings, Platform};
use crate::error::{AppError, AuthError};
use crate::metrics::HitCounter;
use crate::store::ChirpStore;

/// GET /admin/metrics
pub async fn metrics(counter: web::Data<HitCounter>) -> HttpResponse {
    let html = format!(
        r#"<html>
  <body>
    <h1>Welcome, Chirpy Admin</h1>
    <p>Chirpy has been visited {} times!</p>
  </body>
</html>"#,
        counter.load()
    );

    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

/// POST /admin/reset
///
/// Zeroes the hit counter and deletes every user. Only available when the
/// platform is `dev`; anywhere else it is 403.
pub async fn reset(
    application: web::Data<ApplicationSettings>,
    counter: web::Data<HitCounter>,
    store: web::Data<dyn ChirpStore>,
) -> Result<HttpResponse, AppError> {
    if application.platform != Platform::Dev {
        return Err(AuthError::Forbidden("reset is only allowed in dev".to_string()).into());
    }

    counter.reset();
    store.delete_all_users().await?;

    tracing::warn!("Hit counter reset and all users deleted");

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(format!("Hits: {}", counter.load())))
}
