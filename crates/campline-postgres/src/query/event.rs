//! Event repository.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use super::Pagination;
use crate::model::{Event, NewEvent};
use crate::{PgConnection, PgResult, schema};

/// Repository for event database operations.
pub trait EventRepository {
    /// Creates a new event.
    fn create_event(&mut self, new_event: NewEvent)
    -> impl Future<Output = PgResult<Event>> + Send;

    /// Finds an event by its unique identifier.
    fn find_event_by_id(
        &mut self,
        event_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Event>>> + Send;

    /// Lists events ordered by start time, most recent first.
    fn list_events(
        &mut self,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<Event>>> + Send;
}

impl EventRepository for PgConnection {
    async fn create_event(&mut self, mut new_event: NewEvent) -> PgResult<Event> {
        use schema::events;

        new_event.name = new_event.name.trim().to_owned();

        diesel::insert_into(events::table)
            .values(&new_event)
            .returning(Event::as_returning())
            .get_result(self)
            .await
            .map_err(Into::into)
    }

    async fn find_event_by_id(&mut self, event_id: Uuid) -> PgResult<Option<Event>> {
        use schema::events::{self, dsl};

        events::table
            .filter(dsl::id.eq(event_id))
            .select(Event::as_select())
            .first(self)
            .await
            .optional()
            .map_err(Into::into)
    }

    async fn list_events(&mut self, pagination: Pagination) -> PgResult<Vec<Event>> {
        use schema::events::{self, dsl};

        events::table
            .order(dsl::starts_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(Event::as_select())
            .load(self)
            .await
            .map_err(Into::into)
    }
}
