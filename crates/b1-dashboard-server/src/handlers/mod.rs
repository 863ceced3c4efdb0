pub mod auth;
pub mod dashboard;
pub mod health;
pub mod meta;
pub mod resources;

use axum_extra::extract::CookieJar;

use crate::models::Session;
use crate::session::{SessionStore, SESSION_COOKIE};
use crate::utils::error::ApiError;

/// Resolves the caller's session from the credential cookie.
///
/// Fails fast with `NoSession` when the cookie is absent, and with
/// `SessionExpired` when the store no longer holds a live entry for it;
/// in neither case is an upstream call attempted.
pub(crate) fn require_session(jar: &CookieJar, store: &SessionStore) -> Result<Session, ApiError> {
    let token = jar.get(SESSION_COOKIE).ok_or(ApiError::NoSession)?.value();
    store.get(token).ok_or(ApiError::SessionExpired)
}
