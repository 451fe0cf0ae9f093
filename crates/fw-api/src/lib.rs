//! # fw-api
//!
//! The web routing and orchestration layer for FemWell.

pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod screening;
pub mod upload;

use actix_web::web;

/// Routes of the screening-only server: a landing page plus the JSON endpoint.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index))
        .route("/predict", web::post().to(handlers::predict));
}

/// Routes of the account-enabled server.
///
/// # Developer Note
/// Requires both `AppState` and `AccountState` in app data. `/` is the login
/// page here instead of the landing page; `/predict` stays available.
pub fn configure_account_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::get().to(handlers::login_page))
            .route(web::post().to(handlers::login)),
    )
    .service(
        web::resource("/register")
            .route(web::get().to(handlers::register_page))
            .route(web::post().to(handlers::register)),
    )
    .service(
        web::resource("/ultrasound")
            .route(web::get().to(handlers::ultrasound_page))
            .route(web::post().to(handlers::ultrasound)),
    )
    .route("/analysis", web::get().to(handlers::analysis))
    .route("/survey", web::get().to(handlers::survey))
    .route("/lab_results", web::get().to(handlers::lab_results))
    .route("/predict", web::post().to(handlers::predict));
}
