//! Flash Notices
//!
//! One-shot messages shown on the next rendered page, carried in a
//! short-lived cookie and cleared as soon as they are read. Values are
//! percent-encoded so accented French text survives the cookie header.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

/// Name of the flash cookie
pub const FLASH_COOKIE: &str = "abonflow_flash";

/// Cookie carrying a notice.
pub fn cookie(message: &str) -> Cookie<'static> {
    Cookie::build((FLASH_COOKIE, urlencoding::encode(message).into_owned()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Queue a notice for the next page.
pub fn set(jar: CookieJar, message: &str) -> CookieJar {
    jar.add(cookie(message))
}

/// Read and clear the pending notice, if any.
pub fn take(jar: CookieJar) -> (CookieJar, Option<String>) {
    let notice = jar
        .get(FLASH_COOKIE)
        .map(|cookie| match urlencoding::decode(cookie.value()) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => cookie.value().to_string(),
        });

    if notice.is_some() {
        let jar = jar.remove(Cookie::build((FLASH_COOKIE, "")).path("/"));
        (jar, notice)
    } else {
        (jar, None)
    }
}
