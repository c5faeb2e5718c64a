//! Authenticated session extractor with database verification.
//!
//! [`AuthSession`] is the request authenticator. Unlike bare token
//! verification it checks the claims against current database state, so a
//! deactivated account is locked out immediately regardless of how long its
//! token remains cryptographically valid.
//!
//! # Verification steps
//!
//! 1. Read the `auth-token` cookie; absence is a 401.
//! 2. Verify the token through the codec; any failure is a 401.
//! 3. Load the account of the claims' kind by id, together with its role and
//!    the role's permission names, in one repository call.
//! 4. Reject missing or inactive accounts with a 401.
//!
//! The verified session is cached in request extensions, so multiple
//! extractions within one request hit the database once.

use axum::extract::{FromRef, FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use campline_postgres::PgClient;
use campline_postgres::model::{Account, Role};
use campline_postgres::query::{AccountAccess, AccountRepository};
use uuid::Uuid;

use super::{Capability, PermissionSet, SESSION_COOKIE_NAME, SessionClaims};
use crate::extract::auth::{TRACING_TARGET_AUTHENTICATION, TRACING_TARGET_AUTHORIZATION};
use crate::handler::{Error, ErrorKind, Result};
use crate::service::SessionKeys;

/// A fully verified session: valid token, live account, loaded permissions.
///
/// When extraction succeeds the handler can rely on the account being active
/// and the permission set reflecting the database at request time. All
/// authorization goes through [`AuthSession::require`].
#[derive(Debug, Clone)]
pub struct AuthSession {
    claims: SessionClaims,
    account: Account,
    role: Option<Role>,
    permissions: PermissionSet,
}

impl AuthSession {
    /// Assembles a session from a verified claims/access pair.
    fn from_verified(claims: SessionClaims, access: AccountAccess) -> Self {
        let AccountAccess {
            account,
            role,
            permissions,
        } = access;

        Self {
            claims,
            account,
            role,
            permissions: PermissionSet::new(permissions),
        }
    }

    /// Returns the authenticated account id.
    #[must_use]
    pub fn account_id(&self) -> Uuid {
        self.account.id
    }

    /// Returns the authenticated account.
    #[must_use]
    pub fn account(&self) -> &Account {
        &self.account
    }

    /// Returns the account's role, if one is attached.
    #[must_use]
    pub fn role(&self) -> Option<&Role> {
        self.role.as_ref()
    }

    /// Returns the verified token claims.
    #[must_use]
    pub fn claims(&self) -> &SessionClaims {
        &self.claims
    }

    /// Returns the account's permission set.
    #[must_use]
    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }

    /// Returns whether the account's role carries the capability.
    #[must_use]
    pub fn can(&self, capability: Capability) -> bool {
        self.permissions.allows(capability)
    }

    /// Enforces a capability, returning `Forbidden` on deny.
    ///
    /// # Errors
    ///
    /// Returns a 403 error when the account's role does not carry the
    /// capability (including accounts without any role).
    pub fn require(&self, capability: Capability) -> Result<()> {
        if self.can(capability) {
            tracing::debug!(
                target: TRACING_TARGET_AUTHORIZATION,
                account_id = %self.account_id(),
                capability = capability.name(),
                "access granted"
            );
            return Ok(());
        }

        tracing::warn!(
            target: TRACING_TARGET_AUTHORIZATION,
            account_id = %self.account_id(),
            capability = capability.name(),
            role = self.role.as_ref().map(|role| role.name.as_str()),
            "access denied: capability not granted"
        );

        Err(ErrorKind::Forbidden
            .with_context(format!("Requires the {} permission", capability.name())))
    }

    /// Authenticates a request from its cookie jar.
    ///
    /// This is the full spec flow; the extractor below only adds
    /// per-request caching on top.
    pub async fn from_cookie_jar(
        jar: &CookieJar,
        session_keys: &SessionKeys,
        pg_client: &PgClient,
    ) -> Result<Self> {
        // Step 1: the bearer credential travels in a cookie.
        let Some(cookie) = jar.get(SESSION_COOKIE_NAME) else {
            tracing::debug!(
                target: TRACING_TARGET_AUTHENTICATION,
                "authentication failed: session cookie missing"
            );
            return Err(ErrorKind::MissingAuthToken
                .with_message("Unauthorized")
                .with_resource("authentication"));
        };

        // Step 2: verify the token; the codec fails closed.
        let claims = SessionClaims::decode(cookie.value(), session_keys.decoding())?;

        // Step 3: load the account with role and permissions attached.
        let mut conn = pg_client.get_connection().await.map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET_AUTHENTICATION,
                error = %e,
                account_id = %claims.subject_id,
                "database connection failed during authentication"
            );
            ErrorKind::InternalServerError
                .with_message("Authentication verification is temporarily unavailable")
        })?;

        let access = conn
            .find_account_access(claims.account_kind, claims.subject_id)
            .await
            .map_err(Error::from)?;

        // Step 4: the account must exist and be active.
        let Some(access) = access else {
            tracing::warn!(
                target: TRACING_TARGET_AUTHENTICATION,
                account_id = %claims.subject_id,
                kind = %claims.account_kind,
                "authentication failed: account referenced by token not found"
            );
            return Err(ErrorKind::Unauthorized.with_resource("authentication"));
        };

        if !access.account.can_login() {
            tracing::warn!(
                target: TRACING_TARGET_AUTHENTICATION,
                account_id = %access.account.id,
                "authentication failed: account is inactive"
            );
            return Err(ErrorKind::Unauthorized.with_resource("authentication"));
        }

        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            account_id = %access.account.id,
            role = access.role.as_ref().map(|role| role.name.as_str()),
            permission_count = access.permissions.len(),
            "authentication verified"
        );

        Ok(Self::from_verified(claims, access))
    }
}

impl<S> FromRequestParts<S> for AuthSession
where
    S: Sync + Send + 'static,
    PgClient: FromRef<S>,
    SessionKeys: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Check for cached auth session to avoid repeated database queries
        if let Some(auth_session) = parts.extensions.get::<Self>() {
            return Ok(auth_session.clone());
        }

        let jar = CookieJar::from_headers(&parts.headers);
        let session_keys = SessionKeys::from_ref(state);
        let pg_client = PgClient::from_ref(state);

        let auth_session = Self::from_cookie_jar(&jar, &session_keys, &pg_client).await?;

        // Cache the verified session for subsequent extractors in this request
        parts.extensions.insert(auth_session.clone());
        Ok(auth_session)
    }
}

impl<S> OptionalFromRequestParts<S> for AuthSession
where
    S: Sync + Send + 'static,
    PgClient: FromRef<S>,
    SessionKeys: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        match <Self as FromRequestParts<S>>::from_request_parts(parts, state).await {
            Ok(auth_session) => Ok(Some(auth_session)),
            Err(_) => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_extra::extract::cookie::Cookie;
    use campline_postgres::types::AccountKind;
    use campline_postgres::{PgClient, PgConfig};
    use jiff::Timestamp;

    use super::*;

    const SECRET: &[u8] = b"test-secret-0123456789abcdef-0123456789abcdef";

    /// Pool creation is lazy, so an unreachable endpoint is fine for paths
    /// that fail before touching the database.
    fn offline_pg_client() -> PgClient {
        PgClient::new(PgConfig::new("postgresql://campline@localhost:1/unreachable"))
            .expect("pool creation is lazy")
    }

    fn test_keys() -> SessionKeys {
        SessionKeys::new(SECRET, 8, false)
    }

    fn expired_claims() -> SessionClaims {
        let now = Timestamp::now().as_second();
        SessionClaims {
            subject_id: Uuid::new_v4(),
            email: "admin@example.com".to_owned(),
            account_kind: AccountKind::Admin,
            issued_at: now - 2 * 3600,
            expires_at: now - 3600,
        }
    }

    #[tokio::test]
    async fn missing_cookie_is_rejected_with_401() {
        let jar = CookieJar::new();

        let error = AuthSession::from_cookie_jar(&jar, &test_keys(), &offline_pg_client())
            .await
            .expect_err("no cookie must fail");

        assert_eq!(error.kind(), ErrorKind::MissingAuthToken);
        assert_eq!(error.kind().status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn garbage_token_is_rejected_with_401() {
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE_NAME, "not-a-token"));

        let error = AuthSession::from_cookie_jar(&jar, &test_keys(), &offline_pg_client())
            .await
            .expect_err("garbage token must fail");

        assert_eq!(error.kind(), ErrorKind::MalformedAuthToken);
        assert_eq!(error.kind().status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn expired_token_is_rejected_with_401() {
        let keys = test_keys();
        let token = expired_claims()
            .encode(keys.encoding())
            .expect("encoding must succeed");
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE_NAME, token));

        let error = AuthSession::from_cookie_jar(&jar, &keys, &offline_pg_client())
            .await
            .expect_err("expired token must fail");

        assert_eq!(error.kind(), ErrorKind::Unauthorized);
        assert_eq!(error.kind().status_code(), StatusCode::UNAUTHORIZED);
    }
}
