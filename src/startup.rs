use actix_files as fs;
use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;

use crate::configuration::Settings;
use crate::error::{AppError, ValidationError};
use crate::metrics::HitCounter;
use crate::middleware::{AccessLog, HitCounterMiddleware};
use crate::routes::{
    create_chirp, create_user, delete_chirp, get_chirp, health_check, list_chirps, login,
    metrics, polka_webhook, refresh, reset, revoke, update_user, validate_chirp,
};
use crate::store::ChirpStore;

/// Directory served under `/app`
const STATIC_DIR: &str = "./public";

pub fn run(
    listener: TcpListener,
    store: Arc<dyn ChirpStore>,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let store: web::Data<dyn ChirpStore> = web::Data::from(store);
    let jwt_config = web::Data::new(settings.jwt);
    let polka_config = web::Data::new(settings.polka);
    let application = web::Data::new(settings.application);
    // One counter for the whole process, shared by every worker
    let hits = web::Data::new(HitCounter::new());

    let server = HttpServer::new(move || {
        App::new()
            // Global middleware
            .wrap(AccessLog)

            // Shared state
            .app_data(store.clone())
            .app_data(jwt_config.clone())
            .app_data(polka_config.clone())
            .app_data(application.clone())
            .app_data(hits.clone())
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::Validation(ValidationError::InvalidFormat(format!("request body ({})", err)))
                    .into()
            }))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                AppError::Validation(ValidationError::InvalidFormat(format!("query ({})", err)))
                    .into()
            }))
            .app_data(web::PathConfig::default().error_handler(|err, _req| {
                AppError::Validation(ValidationError::InvalidFormat(format!("path ({})", err)))
                    .into()
            }))

            .service(
                web::scope("/api")
                    .route("/healthz", web::get().to(health_check))
                    .route("/validate_chirp", web::post().to(validate_chirp))
                    .route("/users", web::post().to(create_user))
                    .route("/users", web::put().to(update_user))
                    .route("/login", web::post().to(login))
                    .route("/refresh", web::post().to(refresh))
                    .route("/revoke", web::post().to(revoke))
                    .route("/chirps", web::post().to(create_chirp))
                    .route("/chirps", web::get().to(list_chirps))
                    .route("/chirps/{chirp_id}", web::get().to(get_chirp))
                    .route("/chirps/{chirp_id}", web::delete().to(delete_chirp))
                    .route("/polka/webhooks", web::post().to(polka_webhook)),
            )
            .service(
                web::scope("/admin")
                    .route("/metrics", web::get().to(metrics))
                    .route("/reset", web::post().to(reset)),
            )

            // Static files; every hit is counted
            .service(
                web::scope("/app")
                    .wrap(HitCounterMiddleware::new(hits.clone()))
                    .service(fs::Files::new("/", STATIC_DIR).index_file("index.html")),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
