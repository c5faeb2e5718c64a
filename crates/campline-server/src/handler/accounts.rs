//! Account administration handlers: listing and active-flag toggling.

use axum::Router;
use axum::extract::{Path, Query};
use axum::routing::{get, post};
use campline_postgres::model::Account;
use campline_postgres::query::AccountRepository;
use campline_postgres::types::AccountKind;
use jiff::Timestamp;
use serde::Serialize;
use uuid::Uuid;

use crate::extract::{AuthSession, Capability, Db, Json};
use crate::handler::request::PaginationQuery;
use crate::handler::{ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for account administration.
const TRACING_TARGET: &str = "campline_server::handler::accounts";

/// Returns the router for account administration endpoints.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/accounts", get(list))
        .route("/accounts/{account_id}/activate", post(activate))
        .route("/accounts/{account_id}/deactivate", post(deactivate))
}

/// Account details exposed to administrators.
#[must_use]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AccountProfile {
    /// ID of the account.
    id: Uuid,
    /// Credential namespace.
    kind: AccountKind,
    /// Email address of the account.
    email_address: String,
    /// Display name of the account.
    display_name: String,
    /// Whether the account may authenticate.
    is_active: bool,
    /// Role granting permissions, if any.
    role_id: Option<Uuid>,
    /// Most recent successful login.
    last_login_at: Option<Timestamp>,
    /// When the account was created.
    created_at: Timestamp,
}

impl From<Account> for AccountProfile {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            kind: account.kind,
            email_address: account.email_address,
            display_name: account.display_name,
            is_active: account.is_active,
            role_id: account.role_id,
            last_login_at: account.last_login_at.map(Into::into),
            created_at: account.created_at.into(),
        }
    }
}

async fn list(
    auth: AuthSession,
    Db(mut conn): Db,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<Vec<AccountProfile>>> {
    auth.require(Capability::ReadAccounts)?;

    let accounts = conn.list_accounts(pagination.into_pagination()).await?;
    Ok(Json(accounts.into_iter().map(Into::into).collect()))
}

async fn activate(
    auth: AuthSession,
    Db(mut conn): Db,
    Path(account_id): Path<Uuid>,
) -> Result<Json<AccountProfile>> {
    auth.require(Capability::ManageAccounts)?;

    set_active(&mut conn, &auth, account_id, true).await
}

async fn deactivate(
    auth: AuthSession,
    Db(mut conn): Db,
    Path(account_id): Path<Uuid>,
) -> Result<Json<AccountProfile>> {
    auth.require(Capability::ManageAccounts)?;

    // Refuse self-deactivation so the last administrator cannot lock
    // everyone out mid-session.
    if account_id == auth.account_id() {
        return Err(ErrorKind::Conflict
            .with_message("Cannot deactivate your own account")
            .with_resource("account"));
    }

    set_active(&mut conn, &auth, account_id, false).await
}

async fn set_active(
    conn: &mut campline_postgres::PgConn,
    auth: &AuthSession,
    account_id: Uuid,
    is_active: bool,
) -> Result<Json<AccountProfile>> {
    let account = conn
        .set_account_active(account_id, is_active)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("account"))?;

    tracing::info!(
        target: TRACING_TARGET,
        account_id = %account.id,
        is_active = account.is_active,
        changed_by = %auth.account_id(),
        "account active flag updated"
    );

    Ok(Json(account.into()))
}
