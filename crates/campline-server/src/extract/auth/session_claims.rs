//! Stateless session token codec.
//!
//! Tokens are compact JWS strings signed with HMAC-SHA256 over a shared
//! secret. The wire shape of the claims is fixed:
//! `{"adminId", "email", "type", "iat", "exp"}` with unix-second timestamps.
//! Verification fails closed: expiry, malformed structure and signature
//! mismatch all come back as error values, never panics.

use campline_postgres::model::Account;
use campline_postgres::types::AccountKind;
use jiff::Timestamp;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::extract::auth::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{ErrorKind, Result};

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject account id.
    #[serde(rename = "adminId")]
    pub subject_id: Uuid,
    /// Subject email address.
    #[serde(rename = "email")]
    pub email: String,
    /// Credential namespace the subject belongs to.
    #[serde(rename = "type")]
    pub account_kind: AccountKind,
    /// Issued at, unix seconds.
    #[serde(rename = "iat")]
    pub issued_at: i64,
    /// Expiration time, unix seconds. Derived from the configured session
    /// timeout at issuance.
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl SessionClaims {
    /// Creates claims for an account, expiring `ttl_hours` from now.
    pub fn new(account: &Account, ttl_hours: i64) -> Self {
        Self::issued_at_time(account, Timestamp::now(), ttl_hours)
    }

    /// Creates claims with an explicit issuance instant.
    ///
    /// Exists so expiry behavior is testable against a shifted clock.
    pub fn issued_at_time(account: &Account, now: Timestamp, ttl_hours: i64) -> Self {
        let issued_at = now.as_second();
        Self {
            subject_id: account.id,
            email: account.email_address.clone(),
            account_kind: account.kind,
            issued_at,
            expires_at: issued_at + ttl_hours * 3600,
        }
    }

    /// Checks if the token has expired based on current UTC time.
    #[inline]
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Timestamp::now().as_second()
    }

    /// Returns the issuance instant.
    #[must_use]
    pub fn issued_at_timestamp(&self) -> Timestamp {
        Timestamp::from_second(self.issued_at).unwrap_or(Timestamp::UNIX_EPOCH)
    }

    /// Returns the expiration instant.
    #[must_use]
    pub fn expires_at_timestamp(&self) -> Timestamp {
        Timestamp::from_second(self.expires_at).unwrap_or(Timestamp::UNIX_EPOCH)
    }

    /// Encodes the claims into a signed token.
    ///
    /// # Errors
    ///
    /// Returns an internal error if JWT encoding fails.
    pub fn encode(&self, encoding_key: &EncodingKey) -> Result<String> {
        encode(&Header::new(Algorithm::HS256), self, encoding_key).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET_AUTHENTICATION,
                error = %e,
                account_id = %self.subject_id,
                "Failed to encode session token"
            );

            ErrorKind::InternalServerError
                .with_message("Authentication token generation failed")
                .with_resource("authentication")
        })
    }

    /// Parses and verifies a session token.
    ///
    /// Validation is strict: HS256 only, expiration checked with zero leeway,
    /// and every claim field required. All failures collapse into a 401-class
    /// error; the caller never sees a panic or a partially-decoded token.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for expired tokens and `MalformedAuthToken` for
    /// everything else (bad structure, wrong signature, missing claims).
    pub fn decode(token: &str, decoding_key: &DecodingKey) -> Result<Self> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_aud = false; // No audience claim in this token shape
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat"]);

        let token_data = decode::<Self>(token, decoding_key, &validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind as JwtErrorKind;

            match e.kind() {
                JwtErrorKind::ExpiredSignature => {
                    tracing::debug!(
                        target: TRACING_TARGET_AUTHENTICATION,
                        "session token rejected: expired"
                    );
                    ErrorKind::Unauthorized
                        .with_message("Invalid token")
                        .with_context("Session has expired")
                        .with_resource("authentication")
                }
                _ => {
                    tracing::debug!(
                        target: TRACING_TARGET_AUTHENTICATION,
                        error = %e,
                        "session token rejected: verification failed"
                    );
                    ErrorKind::MalformedAuthToken
                        .with_message("Invalid token")
                        .with_resource("authentication")
                }
            }
        })?;

        let claims = token_data.claims;

        // Double-check expiration; decode already validated it, but the gate
        // must hold even if validation settings drift.
        if claims.is_expired() {
            tracing::warn!(
                target: TRACING_TARGET_AUTHENTICATION,
                account_id = %claims.subject_id,
                expired_at = %claims.expires_at_timestamp(),
                "session token rejected: expired after decode"
            );

            return Err(ErrorKind::Unauthorized
                .with_message("Invalid token")
                .with_context("Session has expired")
                .with_resource("authentication"));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use campline_postgres::types::AccountKind;
    use jsonwebtoken::{DecodingKey, EncodingKey};

    use super::*;

    const SECRET: &[u8] = b"test-secret-0123456789abcdef-0123456789abcdef";
    const OTHER_SECRET: &[u8] = b"other-secret-0123456789abcdef-0123456789abcd";

    fn claims_issued_minutes_ago(minutes: i64, ttl_hours: i64) -> SessionClaims {
        let now = Timestamp::now().as_second();
        let issued_at = now - minutes * 60;
        SessionClaims {
            subject_id: Uuid::new_v4(),
            email: "admin@example.com".to_owned(),
            account_kind: AccountKind::Admin,
            issued_at,
            expires_at: issued_at + ttl_hours * 3600,
        }
    }

    #[test]
    fn round_trips_unexpired_claims() -> anyhow::Result<()> {
        let claims = claims_issued_minutes_ago(0, 8);
        let token = claims.encode(&EncodingKey::from_secret(SECRET))?;
        let decoded = SessionClaims::decode(&token, &DecodingKey::from_secret(SECRET))
            .map_err(|e| anyhow::anyhow!("{e}"))?;

        assert_eq!(decoded, claims);
        Ok(())
    }

    #[test]
    fn wire_shape_uses_spec_claim_names() -> anyhow::Result<()> {
        let claims = claims_issued_minutes_ago(0, 1);
        let json = serde_json::to_value(&claims)?;

        assert!(json.get("adminId").is_some());
        assert!(json.get("email").is_some());
        assert_eq!(json.get("type"), Some(&serde_json::json!("admin")));
        assert!(json.get("iat").is_some());
        assert!(json.get("exp").is_some());
        Ok(())
    }

    #[test]
    fn rejects_token_signed_with_different_secret() -> anyhow::Result<()> {
        let claims = claims_issued_minutes_ago(0, 8);
        let token = claims.encode(&EncodingKey::from_secret(OTHER_SECRET))?;

        let result = SessionClaims::decode(&token, &DecodingKey::from_secret(SECRET));
        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn rejects_tampered_payload() -> anyhow::Result<()> {
        use base64::Engine as _;
        let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;

        let claims = claims_issued_minutes_ago(0, 8);
        let token = claims.encode(&EncodingKey::from_secret(SECRET))?;

        let mut parts: Vec<String> = token.split('.').map(str::to_owned).collect();
        let mut payload: serde_json::Value =
            serde_json::from_slice(&engine.decode(&parts[1])?)?;
        payload["email"] = serde_json::json!("attacker@example.com");
        parts[1] = engine.encode(serde_json::to_vec(&payload)?);

        let result = SessionClaims::decode(&parts.join("."), &DecodingKey::from_secret(SECRET));
        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn rejects_garbage_token() {
        let result =
            SessionClaims::decode("not-a-token", &DecodingKey::from_secret(SECRET));
        assert!(result.is_err());
    }

    #[test]
    fn one_hour_ttl_invalid_after_61_minutes() -> anyhow::Result<()> {
        let claims = claims_issued_minutes_ago(61, 1);
        let token = claims.encode(&EncodingKey::from_secret(SECRET))?;

        let result = SessionClaims::decode(&token, &DecodingKey::from_secret(SECRET));
        assert!(result.is_err());
        assert!(claims.is_expired());
        Ok(())
    }

    #[test]
    fn one_hour_ttl_still_valid_after_59_minutes() -> anyhow::Result<()> {
        let claims = claims_issued_minutes_ago(59, 1);
        let token = claims.encode(&EncodingKey::from_secret(SECRET))?;

        let decoded = SessionClaims::decode(&token, &DecodingKey::from_secret(SECRET))
            .map_err(|e| anyhow::anyhow!("{e}"))?;
        assert_eq!(decoded, claims);
        assert!(!claims.is_expired());
        Ok(())
    }

    #[test]
    fn expiry_derives_from_ttl_at_issuance() {
        let claims = claims_issued_minutes_ago(0, 8);
        assert_eq!(claims.expires_at - claims.issued_at, 8 * 3600);
    }
}
