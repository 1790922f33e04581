//! CSRF tokens carried in a signed cookie and echoed by every form.

use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};

use crate::forms::FieldError;

pub const CSRF_COOKIE: &str = "csrf_token";
pub const CSRF_FIELD: &str = "csrf_token";

/// Returns the jar's token, minting one if the client has none yet.
pub fn issue(jar: SignedCookieJar) -> (SignedCookieJar, String) {
    if let Some(token) = token(&jar) {
        return (jar, token);
    }

    let token = uuid::Uuid::new_v4().simple().to_string();
    let cookie = Cookie::build((CSRF_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    (jar.add(cookie), token)
}

pub fn token(jar: &SignedCookieJar) -> Option<String> {
    jar.get(CSRF_COOKIE).map(|c| c.value().to_string()).filter(|t| !t.is_empty())
}

pub fn verify(expected: Option<&str>, submitted: &str) -> Result<(), FieldError> {
    if submitted.is_empty() {
        return Err(FieldError::CsrfMissing);
    }
    match expected {
        Some(expected) if expected == submitted => Ok(()),
        _ => Err(FieldError::CsrfInvalid),
    }
}
