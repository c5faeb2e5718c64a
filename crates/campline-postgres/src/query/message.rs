//! Outbound-message repository.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use super::Pagination;
use crate::model::{NewOutboundMessage, OutboundMessage};
use crate::{PgConnection, PgResult, schema};

/// Repository for the outbound message log.
pub trait MessageRepository {
    /// Queues a batch of outbound messages in one statement.
    ///
    /// The batch either lands completely or not at all.
    fn queue_messages(
        &mut self,
        new_messages: Vec<NewOutboundMessage>,
    ) -> impl Future<Output = PgResult<usize>> + Send;

    /// Lists an event's outbound messages, newest first.
    fn list_event_messages(
        &mut self,
        event_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<OutboundMessage>>> + Send;
}

impl MessageRepository for PgConnection {
    async fn queue_messages(
        &mut self,
        new_messages: Vec<NewOutboundMessage>,
    ) -> PgResult<usize> {
        use schema::outbound_messages;

        if new_messages.is_empty() {
            return Ok(0);
        }

        diesel::insert_into(outbound_messages::table)
            .values(&new_messages)
            .execute(self)
            .await
            .map_err(Into::into)
    }

    async fn list_event_messages(
        &mut self,
        event_id: Uuid,
        pagination: Pagination,
    ) -> PgResult<Vec<OutboundMessage>> {
        use schema::outbound_messages::{self, dsl};

        outbound_messages::table
            .filter(dsl::event_id.eq(event_id))
            .order(dsl::created_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(OutboundMessage::as_select())
            .load(self)
            .await
            .map_err(Into::into)
    }
}
