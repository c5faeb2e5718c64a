//! Notification repository for staff in-app notifications.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use jiff::Timestamp;
use uuid::Uuid;

use super::Pagination;
use crate::model::{AccountNotification, NewAccountNotification};
use crate::{PgConnection, PgResult, schema};

/// Repository for account notification database operations.
pub trait NotificationRepository {
    /// Inserts a batch of notifications, returning how many were created.
    fn create_notifications(
        &mut self,
        new_notifications: Vec<NewAccountNotification>,
    ) -> impl Future<Output = PgResult<usize>> + Send;

    /// Lists an account's notifications, newest first.
    fn list_account_notifications(
        &mut self,
        account_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<AccountNotification>>> + Send;

    /// Counts an account's unread notifications.
    fn unread_notification_count(
        &mut self,
        account_id: Uuid,
    ) -> impl Future<Output = PgResult<i64>> + Send;

    /// Marks a single notification as read.
    ///
    /// The account filter keeps one account from touching another's rows;
    /// returns `None` when nothing matched.
    fn mark_notification_read(
        &mut self,
        account_id: Uuid,
        notification_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<AccountNotification>>> + Send;

    /// Marks all of an account's notifications as read, returning the count.
    fn mark_all_notifications_read(
        &mut self,
        account_id: Uuid,
    ) -> impl Future<Output = PgResult<usize>> + Send;
}

impl NotificationRepository for PgConnection {
    async fn create_notifications(
        &mut self,
        new_notifications: Vec<NewAccountNotification>,
    ) -> PgResult<usize> {
        use schema::account_notifications;

        if new_notifications.is_empty() {
            return Ok(0);
        }

        diesel::insert_into(account_notifications::table)
            .values(&new_notifications)
            .execute(self)
            .await
            .map_err(Into::into)
    }

    async fn list_account_notifications(
        &mut self,
        account_id: Uuid,
        pagination: Pagination,
    ) -> PgResult<Vec<AccountNotification>> {
        use schema::account_notifications::{self, dsl};

        account_notifications::table
            .filter(dsl::account_id.eq(account_id))
            .order(dsl::created_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(AccountNotification::as_select())
            .load(self)
            .await
            .map_err(Into::into)
    }

    async fn unread_notification_count(&mut self, account_id: Uuid) -> PgResult<i64> {
        use schema::account_notifications::{self, dsl};

        account_notifications::table
            .filter(dsl::account_id.eq(account_id))
            .filter(dsl::is_read.eq(false))
            .count()
            .get_result(self)
            .await
            .map_err(Into::into)
    }

    async fn mark_notification_read(
        &mut self,
        account_id: Uuid,
        notification_id: Uuid,
    ) -> PgResult<Option<AccountNotification>> {
        use schema::account_notifications::{self, dsl};

        diesel::update(
            account_notifications::table
                .filter(dsl::id.eq(notification_id))
                .filter(dsl::account_id.eq(account_id)),
        )
        .set((
            dsl::is_read.eq(true),
            dsl::read_at.eq(Some(jiff_diesel::Timestamp::from(Timestamp::now()))),
        ))
        .returning(AccountNotification::as_returning())
        .get_result(self)
        .await
        .optional()
        .map_err(Into::into)
    }

    async fn mark_all_notifications_read(&mut self, account_id: Uuid) -> PgResult<usize> {
        use schema::account_notifications::{self, dsl};

        diesel::update(
            account_notifications::table
                .filter(dsl::account_id.eq(account_id))
                .filter(dsl::is_read.eq(false)),
        )
        .set((
            dsl::is_read.eq(true),
            dsl::read_at.eq(Some(jiff_diesel::Timestamp::from(Timestamp::now()))),
        ))
        .execute(self)
        .await
        .map_err(Into::into)
    }
}
