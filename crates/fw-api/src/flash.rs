//! Flash messages carried across one redirect in a short-lived cookie.

use actix_web::cookie::{time::Duration, Cookie};
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use fw_ui::Flash;

pub const FLASH_COOKIE: &str = "_flash";

/// Serializes messages into a cookie value.
pub fn encode(messages: &[Flash]) -> String {
    let json = serde_json::to_vec(messages).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

/// Parses a cookie value. Tampered or stale values decode to nothing.
pub fn decode(value: &str) -> Vec<Flash> {
    URL_SAFE_NO_PAD
        .decode(value)
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_default()
}

/// Messages left by the previous response, if any.
pub fn incoming(req: &HttpRequest) -> Vec<Flash> {
    req.cookie(FLASH_COOKIE)
        .map(|c| decode(c.value()))
        .unwrap_or_default()
}

/// 303 to `location` with `message` queued for the next page.
pub fn redirect(location: &str, message: Flash) -> HttpResponse {
    let cookie = Cookie::build(FLASH_COOKIE, encode(&[message]))
        .path("/")
        .http_only(true)
        .max_age(Duration::minutes(5))
        .finish();

    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .cookie(cookie)
        .finish()
}

/// 200 HTML response that also consumes any pending flash cookie.
pub fn page(req: &HttpRequest, html: String) -> HttpResponse {
    let mut builder = HttpResponse::Ok();
    builder.content_type("text/html; charset=utf-8");

    if req.cookie(FLASH_COOKIE).is_some() {
        let mut removal = Cookie::build(FLASH_COOKIE, "").path("/").finish();
        removal.make_removal();
        builder.cookie(removal);
    }

    builder.body(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_survives_the_cookie_trip() {
        let messages = vec![Flash::error("Passwords do not match!"), Flash::success("ok; done")];
        let value = encode(&messages);
        assert!(!value.contains(';'));
        assert_eq!(decode(&value), messages);
    }

    #[test]
    fn garbage_decodes_to_nothing() {
        assert!(decode("%%%").is_empty());
        assert!(decode(&URL_SAFE_NO_PAD.encode(b"{not json")).is_empty());
    }
}
