//! femwell/crates/fw-api/src/middleware.rs Middleware
//!
//! Request logging, CORS and default security headers.

use actix_cors::Cors;
use actix_web::middleware::{DefaultHeaders, Logger};

// Returns the access logger used by the server.
pub fn standard_middleware() -> Logger {
    // remote-ip "request-line" status-code response-size "referrer" "user-agent" time
    Logger::default()
}

// `/predict` is a plain JSON API and may be called from other origins.
pub fn cors_policy() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST"])
        .max_age(3600)
}

pub fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("Referrer-Policy", "strict-origin-when-cross-origin"))
}
