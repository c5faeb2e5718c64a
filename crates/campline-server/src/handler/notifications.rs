//! Notification handlers for the authenticated account's own notifications.

use axum::Router;
use axum::extract::{Path, Query};
use axum::routing::{get, post};
use campline_postgres::model::AccountNotification;
use campline_postgres::query::NotificationRepository;
use jiff::Timestamp;
use serde::Serialize;
use uuid::Uuid;

use crate::extract::{AuthSession, Capability, Db, Json};
use crate::handler::request::PaginationQuery;
use crate::handler::{ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for notification operations.
const TRACING_TARGET: &str = "campline_server::handler::notifications";

/// Returns the router for notification endpoints.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/notifications", get(list))
        .route("/notifications/unread-count", get(unread_count))
        .route("/notifications/read-all", post(read_all))
        .route("/notifications/{notification_id}/read", post(mark_read))
}

/// Notification details exposed to their owner.
#[must_use]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NotificationView {
    /// ID of the notification.
    id: Uuid,
    /// Notification title.
    title: String,
    /// Notification body.
    body: String,
    /// Whether the notification has been read.
    is_read: bool,
    /// When the notification was read.
    read_at: Option<Timestamp>,
    /// When the notification was created.
    created_at: Timestamp,
}

impl From<AccountNotification> for NotificationView {
    fn from(notification: AccountNotification) -> Self {
        Self {
            id: notification.id,
            title: notification.title,
            body: notification.body,
            is_read: notification.is_read,
            read_at: notification.read_at.map(Into::into),
            created_at: notification.created_at.into(),
        }
    }
}

async fn list(
    auth: AuthSession,
    Db(mut conn): Db,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<Vec<NotificationView>>> {
    auth.require(Capability::ReadNotifications)?;

    let notifications = conn
        .list_account_notifications(auth.account_id(), pagination.into_pagination())
        .await?;

    Ok(Json(notifications.into_iter().map(Into::into).collect()))
}

/// Unread-count payload.
#[must_use]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UnreadCountResponse {
    /// Number of unread notifications.
    unread: i64,
}

async fn unread_count(auth: AuthSession, Db(mut conn): Db) -> Result<Json<UnreadCountResponse>> {
    auth.require(Capability::ReadNotifications)?;

    let unread = conn.unread_notification_count(auth.account_id()).await?;
    Ok(Json(UnreadCountResponse { unread }))
}

async fn mark_read(
    auth: AuthSession,
    Db(mut conn): Db,
    Path(notification_id): Path<Uuid>,
) -> Result<Json<NotificationView>> {
    auth.require(Capability::ReadNotifications)?;

    let notification = conn
        .mark_notification_read(auth.account_id(), notification_id)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("notification"))?;

    Ok(Json(notification.into()))
}

/// Read-all payload.
#[must_use]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReadAllResponse {
    /// Number of notifications marked as read.
    marked: usize,
}

async fn read_all(auth: AuthSession, Db(mut conn): Db) -> Result<Json<ReadAllResponse>> {
    auth.require(Capability::ReadNotifications)?;

    let marked = conn.mark_all_notifications_read(auth.account_id()).await?;

    tracing::debug!(
        target: TRACING_TARGET,
        account_id = %auth.account_id(),
        marked = marked,
        "notifications marked as read"
    );

    Ok(Json(ReadAllResponse { marked }))
}
