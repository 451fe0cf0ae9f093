//! # FemWell Binary
//!
//! The entry point that assembles the application based on compile-time features.

mod settings;

use actix_files::Files;
use actix_web::{web, App, HttpServer};
use fw_api::handlers::AppState;
use fw_api::middleware;
use fw_classifier_tract::TractClassifier;
use fw_storage_local::{Annotator, LocalImageStore};
use settings::Settings;
use std::sync::Arc;

// Feature-gated imports
#[cfg(feature = "accounts")]
use fw_api::handlers::AccountState;

#[cfg(feature = "db-sqlite")]
use fw_db_sqlite::SqliteAccountRepo;

#[cfg(feature = "auth-simple")]
use fw_auth_simple::SimpleAuthProvider;

fn build_annotator(settings: &Settings) -> Annotator {
    match &settings.font_path {
        Some(path) => match Annotator::with_font_file(path) {
            Ok(annotator) => {
                log::info!("annotating with font {}", path.display());
                annotator
            }
            Err(e) => {
                log::warn!("could not load font {}: {e}; drawing colour badges instead", path.display());
                Annotator::default()
            }
        },
        None => {
            log::warn!("no font_path configured; drawing colour badges instead of text labels");
            Annotator::default()
        }
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let settings = Settings::load()?;

    // 1. Load the classifier; the server does not start without it.
    let classifier = TractClassifier::load(&settings.model_path)?;

    // 2. Initialize Storage Implementation
    let store = LocalImageStore::new(
        settings.upload_dir.clone(),
        settings.results_dir.clone(),
        settings.results_url.clone(),
        build_annotator(&settings),
    );
    store.ensure_dirs().await?;

    let state = web::Data::new(AppState {
        classifier: Arc::new(classifier),
        store: Box::new(store),
        max_upload_bytes: settings.max_upload_bytes,
    });

    // 3. Initialize Account Implementations
    #[cfg(feature = "accounts")]
    let accounts = web::Data::new(AccountState {
        repo: Box::new(SqliteAccountRepo::new(&settings.database_url).await?),
        auth: Box::new(SimpleAuthProvider::new()),
    });

    #[cfg(feature = "accounts")]
    log::info!("account pages enabled (store: {})", settings.database_url);

    let static_dir = settings.static_dir.clone();
    log::info!("FemWell starting on http://{}", settings.bind_address);

    HttpServer::new(move || {
        let app = App::new()
            .wrap(middleware::cors_policy())
            .wrap(middleware::security_headers())
            .wrap(middleware::standard_middleware())
            .app_data(state.clone())
            .service(Files::new("/static", &static_dir));

        #[cfg(feature = "accounts")]
        let app = app
            .app_data(accounts.clone())
            .configure(fw_api::configure_account_routes);

        #[cfg(not(feature = "accounts"))]
        let app = app.configure(fw_api::configure_routes);

        app
    })
    .bind(&settings.bind_address)?
    .run()
    .await?;

    Ok(())
}
