//! Active-period session cookie.
//!
//! The board the user last looked at is remembered in the `activePeriod`
//! cookie. Forms may still name a period explicitly in a hidden `period`
//! field, which wins over the cookie for that request.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use todo_core::active_period_name;

pub const ACTIVE_PERIOD_COOKIE: &str = "activePeriod";

/// Resolves the active period for one request.
///
/// A form value overrides the cookie; with neither, the default period applies.
pub fn active_period(jar: &CookieJar, form_override: Option<&str>) -> String {
    active_period_name(form_override.or_else(|| jar.get(ACTIVE_PERIOD_COOKIE).map(Cookie::value)))
}

/// Stores `period` as the active period for later requests.
pub fn remember_period(jar: CookieJar, period: &str) -> CookieJar {
    jar.add(
        Cookie::build((ACTIVE_PERIOD_COOKIE, period.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}
