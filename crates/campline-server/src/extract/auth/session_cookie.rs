//! Session cookie construction.
//!
//! The bearer credential travels in a single cookie: `auth-token`, HttpOnly,
//! `SameSite=Strict`, `Secure` when the deployment says so, with a max-age of
//! session-timeout-hours × 3600 seconds.

use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::service::SessionKeys;

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "auth-token";

/// Builds the session cookie carrying a signed token.
pub fn session_cookie(token: String, session_keys: &SessionKeys) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE_NAME, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Strict);
    cookie.set_secure(session_keys.secure_cookies());
    cookie.set_max_age(time::Duration::seconds(session_keys.cookie_max_age_secs()));
    cookie
}

/// Builds a cookie that removes the session cookie from the client.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE_NAME, "");
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Strict);
    cookie.set_max_age(time::Duration::ZERO);
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_keys(ttl_hours: i64, secure: bool) -> SessionKeys {
        SessionKeys::new(b"test-secret-0123456789abcdef-0123456789abcdef", ttl_hours, secure)
    }

    #[test]
    fn eight_hour_session_yields_28800_second_max_age() {
        let cookie = session_cookie("token".to_owned(), &test_keys(8, false));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(28800)));
    }

    #[test]
    fn cookie_attributes_follow_contract() {
        let cookie = session_cookie("token".to_owned(), &test_keys(1, true));
        assert_eq!(cookie.name(), "auth-token");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn secure_flag_tracks_deployment_setting() {
        let cookie = session_cookie("token".to_owned(), &test_keys(1, false));
        assert_ne!(cookie.secure(), Some(true));
    }

    #[test]
    fn removal_cookie_expires_immediately() {
        let cookie = removal_cookie();
        assert_eq!(cookie.name(), "auth-token");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
        assert_eq!(cookie.value(), "");
    }
}
