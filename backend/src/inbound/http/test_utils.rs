//! Shared helpers for handler tests.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;

use crate::server::session_middleware;

/// Session middleware for handler tests.
///
/// Built from the production cookie policy so tests see the real cookie
/// name, lifetime, and `SameSite` attribute. The key is a throwaway per
/// invocation and `Secure` is dropped so plain-HTTP test requests keep
/// their cookies.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    session_middleware(Key::generate(), false)
}
