//! Authentication handlers: login, logout and session introspection.
//!
//! Login verifies credentials against the Argon2 hash, refuses inactive
//! accounts, stamps the last-login time and issues the session cookie.
//! Failures never distinguish an unknown account from a wrong password.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum_extra::extract::CookieJar;
use campline_postgres::query::AccountRepository;
use campline_postgres::types::AccountKind;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::extract::{
    AuthSession, Db, Json, SessionClaims, ValidateJson, removal_cookie, session_cookie,
};
use crate::handler::{ErrorKind, Result};
use crate::service::{PasswordHasher, ServiceState, SessionKeys};

/// Tracing target for authentication operations.
const TRACING_TARGET: &str = "campline_server::handler::authentication";

/// Returns the router for authentication endpoints.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/session", get(session))
}

/// Request payload for login.
#[must_use]
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct LoginRequest {
    /// Email address of the account.
    #[validate(email)]
    email_address: String,
    /// Password of the account.
    #[validate(length(min = 1))]
    password: String,
}

/// Response returned after successful login.
#[must_use]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    /// ID of the account.
    account_id: Uuid,
    /// Display name of the account.
    display_name: String,
    /// Credential namespace.
    kind: AccountKind,
    /// Timestamp when the token was issued.
    issued_at: Timestamp,
    /// Timestamp when the token expires.
    expires_at: Timestamp,
}

async fn login(
    State(password_hasher): State<PasswordHasher>,
    State(session_keys): State<SessionKeys>,
    jar: CookieJar,
    Db(mut conn): Db,
    ValidateJson(request): ValidateJson<LoginRequest>,
) -> Result<(StatusCode, CookieJar, Json<LoginResponse>)> {
    let normalized_email = request.email_address.trim().to_lowercase();

    tracing::trace!(
        target: TRACING_TARGET,
        email = %normalized_email,
        "login attempt"
    );

    let account = conn.find_account_by_email(&normalized_email).await?;

    // Always perform password hashing to prevent timing attacks
    let password_valid = match &account {
        Some(acc) => password_hasher
            .verify_password(&request.password, &acc.password_hash)
            .is_ok(),
        None => {
            // Perform dummy hash verification to maintain consistent timing
            // and prevent account enumeration via timing attacks
            password_hasher.verify_dummy_password(&request.password)
        }
    };

    let account = match account {
        Some(acc) if password_valid && acc.can_login() => acc,
        acc => {
            tracing::warn!(
                target: TRACING_TARGET,
                email = %normalized_email,
                account_exists = acc.is_some(),
                password_valid = password_valid,
                "login failed"
            );

            return Err(ErrorKind::Unauthorized
                .with_message("Authentication failed")
                .with_resource("authentication"));
        }
    };

    let account = conn.record_login(account.id).await?;

    let claims = SessionClaims::new(&account, session_keys.session_ttl_hours());
    let token = claims.encode(session_keys.encoding())?;

    tracing::info!(
        target: TRACING_TARGET,
        account_id = %account.id,
        kind = %account.kind,
        expires_at = %claims.expires_at_timestamp(),
        "login successful: session issued"
    );

    let response = LoginResponse {
        account_id: account.id,
        display_name: account.display_name,
        kind: account.kind,
        issued_at: claims.issued_at_timestamp(),
        expires_at: claims.expires_at_timestamp(),
    };
    let jar = jar.add(session_cookie(token, &session_keys));

    Ok((StatusCode::CREATED, jar, Json(response)))
}

async fn logout(jar: CookieJar) -> (StatusCode, CookieJar) {
    tracing::debug!(target: TRACING_TARGET, "logout: session cookie cleared");
    (StatusCode::NO_CONTENT, jar.add(removal_cookie()))
}

/// Current session information.
#[must_use]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionResponse {
    /// ID of the account.
    account_id: Uuid,
    /// Email address of the account.
    email_address: String,
    /// Display name of the account.
    display_name: String,
    /// Credential namespace.
    kind: AccountKind,
    /// Name of the account's role, if any.
    role: Option<String>,
    /// Permission names attached to the role, sorted.
    permissions: Vec<String>,
    /// Timestamp when the session expires.
    expires_at: Timestamp,
}

async fn session(auth: AuthSession) -> Json<SessionResponse> {
    let account = auth.account();

    Json(SessionResponse {
        account_id: account.id,
        email_address: account.email_address.clone(),
        display_name: account.display_name.clone(),
        kind: account.kind,
        role: auth.role().map(|role| role.name.clone()),
        permissions: auth.permissions().sorted_names(),
        expires_at: auth.claims().expires_at_timestamp(),
    })
}
