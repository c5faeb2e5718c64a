//! Session signing key material and cookie policy.

use std::fmt;
use std::sync::Arc;

use jsonwebtoken::{DecodingKey, EncodingKey};

/// Session key material plus the cookie policy derived from configuration.
///
/// Wraps the HMAC secret as prepared encoding/decoding keys. Cloning is
/// cheap; all clones share the same material.
#[derive(Clone)]
pub struct SessionKeys {
    inner: Arc<SessionKeysInner>,
}

struct SessionKeysInner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    session_ttl_hours: i64,
    secure_cookies: bool,
}

impl SessionKeys {
    /// Creates key material from a shared secret.
    pub fn new(secret: &[u8], session_ttl_hours: i64, secure_cookies: bool) -> Self {
        Self {
            inner: Arc::new(SessionKeysInner {
                encoding: EncodingKey::from_secret(secret),
                decoding: DecodingKey::from_secret(secret),
                session_ttl_hours,
                secure_cookies,
            }),
        }
    }

    /// Returns the token encoding key.
    #[must_use]
    pub fn encoding(&self) -> &EncodingKey {
        &self.inner.encoding
    }

    /// Returns the token decoding key.
    #[must_use]
    pub fn decoding(&self) -> &DecodingKey {
        &self.inner.decoding
    }

    /// Returns the configured session lifetime in hours.
    #[must_use]
    pub fn session_ttl_hours(&self) -> i64 {
        self.inner.session_ttl_hours
    }

    /// Returns the cookie max-age in seconds (ttl hours × 3600).
    #[must_use]
    pub fn cookie_max_age_secs(&self) -> i64 {
        self.inner.session_ttl_hours * 3600
    }

    /// Returns whether cookies carry the `Secure` attribute.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.inner.secure_cookies
    }
}

impl fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKeys")
            .field("session_ttl_hours", &self.inner.session_ttl_hours)
            .field("secure_cookies", &self.inner.secure_cookies)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_age_is_hours_times_3600() {
        let keys = SessionKeys::new(b"0123456789abcdef0123456789abcdef", 8, false);
        assert_eq!(keys.cookie_max_age_secs(), 28_800);
        assert_eq!(keys.session_ttl_hours(), 8);
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let keys = SessionKeys::new(b"super-secret-material-0123456789", 1, true);
        let debug = format!("{keys:?}");
        assert!(!debug.contains("super-secret"));
    }
}
