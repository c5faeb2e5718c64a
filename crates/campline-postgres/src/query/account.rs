//! Account repository for authentication and account lifecycle operations.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use jiff::Timestamp;
use uuid::Uuid;

use super::Pagination;
use crate::model::{Account, Role, UpdateAccount};
use crate::types::AccountKind;
use crate::{PgConnection, PgResult, schema};

/// An account loaded together with its role and resolved permission set.
///
/// The role-to-permission mapping is resolved here, at the data layer, so the
/// HTTP layer performs nothing but membership checks. An account without a
/// role carries an empty permission set; that is a valid state, not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountAccess {
    /// The account itself.
    pub account: Account,
    /// The account's role, if one is attached.
    pub role: Option<Role>,
    /// Names of every permission attached to the role.
    pub permissions: Vec<String>,
}

/// Repository for account database operations.
///
/// Handles account lookup for authentication, login stamping and the
/// active-flag toggle. Account provisioning happens out of band.
pub trait AccountRepository {
    /// Finds an account by its unique identifier.
    fn find_account_by_id(
        &mut self,
        account_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Account>>> + Send;

    /// Finds an account by email address.
    ///
    /// Email comparison is case-insensitive; addresses are stored lowercased.
    fn find_account_by_email(
        &mut self,
        email: &str,
    ) -> impl Future<Output = PgResult<Option<Account>>> + Send;

    /// Loads an account of the given kind with its role and permission names.
    ///
    /// This is the authentication path: one call returns everything the
    /// permission gate needs for the rest of the request.
    fn find_account_access(
        &mut self,
        kind: AccountKind,
        account_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<AccountAccess>>> + Send;

    /// Stamps a successful login on the account.
    fn record_login(
        &mut self,
        account_id: Uuid,
    ) -> impl Future<Output = PgResult<Account>> + Send;

    /// Sets the active flag, returning the updated account.
    ///
    /// Returns `None` if the account does not exist.
    fn set_account_active(
        &mut self,
        account_id: Uuid,
        is_active: bool,
    ) -> impl Future<Output = PgResult<Option<Account>>> + Send;

    /// Lists accounts ordered by creation time, most recent first.
    fn list_accounts(
        &mut self,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<Account>>> + Send;

    /// Returns the ids of all active admin-kind accounts.
    ///
    /// Used to fan out staff notifications.
    fn list_active_admin_ids(&mut self) -> impl Future<Output = PgResult<Vec<Uuid>>> + Send;
}

impl AccountRepository for PgConnection {
    async fn find_account_by_id(&mut self, account_id: Uuid) -> PgResult<Option<Account>> {
        use schema::accounts::{self, dsl};

        accounts::table
            .filter(dsl::id.eq(account_id))
            .select(Account::as_select())
            .first(self)
            .await
            .optional()
            .map_err(Into::into)
    }

    async fn find_account_by_email(&mut self, email: &str) -> PgResult<Option<Account>> {
        use schema::accounts::{self, dsl};

        accounts::table
            .filter(dsl::email_address.eq(email.trim().to_lowercase()))
            .select(Account::as_select())
            .first(self)
            .await
            .optional()
            .map_err(Into::into)
    }

    async fn find_account_access(
        &mut self,
        kind: AccountKind,
        account_id: Uuid,
    ) -> PgResult<Option<AccountAccess>> {
        use schema::{accounts, permissions, role_permissions, roles};

        let account = accounts::table
            .filter(accounts::id.eq(account_id))
            .filter(accounts::kind.eq(kind))
            .select(Account::as_select())
            .first(self)
            .await
            .optional()?;

        let Some(account) = account else {
            return Ok(None);
        };

        let role = match account.role_id {
            Some(role_id) => roles::table
                .filter(roles::id.eq(role_id))
                .select(Role::as_select())
                .first(self)
                .await
                .optional()?,
            None => None,
        };

        let permission_names: Vec<String> = match &role {
            Some(role) => {
                role_permissions::table
                    .inner_join(permissions::table)
                    .filter(role_permissions::role_id.eq(role.id))
                    .select(permissions::name)
                    .load(self)
                    .await?
            }
            None => Vec::new(),
        };

        Ok(Some(AccountAccess {
            account,
            role,
            permissions: permission_names,
        }))
    }

    async fn record_login(&mut self, account_id: Uuid) -> PgResult<Account> {
        use schema::accounts::{self, dsl};

        diesel::update(accounts::table.filter(dsl::id.eq(account_id)))
            .set(UpdateAccount {
                last_login_at: Some(jiff_diesel::Timestamp::from(Timestamp::now())),
                ..Default::default()
            })
            .returning(Account::as_returning())
            .get_result(self)
            .await
            .map_err(Into::into)
    }

    async fn set_account_active(
        &mut self,
        account_id: Uuid,
        is_active: bool,
    ) -> PgResult<Option<Account>> {
        use schema::accounts::{self, dsl};

        diesel::update(accounts::table.filter(dsl::id.eq(account_id)))
            .set((
                dsl::is_active.eq(is_active),
                dsl::updated_at.eq(jiff_diesel::Timestamp::from(Timestamp::now())),
            ))
            .returning(Account::as_returning())
            .get_result(self)
            .await
            .optional()
            .map_err(Into::into)
    }

    async fn list_accounts(&mut self, pagination: Pagination) -> PgResult<Vec<Account>> {
        use schema::accounts::{self, dsl};

        accounts::table
            .order(dsl::created_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(Account::as_select())
            .load(self)
            .await
            .map_err(Into::into)
    }

    async fn list_active_admin_ids(&mut self) -> PgResult<Vec<Uuid>> {
        use schema::accounts::{self, dsl};

        accounts::table
            .filter(dsl::kind.eq(AccountKind::Admin))
            .filter(dsl::is_active.eq(true))
            .select(dsl::id)
            .load(self)
            .await
            .map_err(Into::into)
    }
}
