//! Registration repository for intake, roster reads and gate check-in.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use jiff::Timestamp;
use uuid::Uuid;

use super::Pagination;
use crate::model::{NewRegistration, Registration, UpdateRegistration};
use crate::{PgConnection, PgResult, schema};

/// Repository for registration database operations.
pub trait RegistrationRepository {
    /// Creates a new registration.
    ///
    /// The check-in token is generated by the database.
    fn create_registration(
        &mut self,
        new_registration: NewRegistration,
    ) -> impl Future<Output = PgResult<Registration>> + Send;

    /// Finds a registration by its unique identifier.
    fn find_registration_by_id(
        &mut self,
        registration_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Registration>>> + Send;

    /// Finds a registration by its check-in token.
    ///
    /// This is the QR attendance path; the token is the credential.
    fn find_registration_by_checkin_token(
        &mut self,
        checkin_token: Uuid,
    ) -> impl Future<Output = PgResult<Option<Registration>>> + Send;

    /// Applies partial updates to a registration.
    ///
    /// Returns `None` if the registration does not exist.
    fn update_registration(
        &mut self,
        registration_id: Uuid,
        updates: UpdateRegistration,
    ) -> impl Future<Output = PgResult<Option<Registration>>> + Send;

    /// Returns the full roster for an event, ordered by participant name.
    fn list_event_registrations(
        &mut self,
        event_id: Uuid,
    ) -> impl Future<Output = PgResult<Vec<Registration>>> + Send;

    /// Lists registrations for an event with pagination, newest first.
    fn list_event_registrations_page(
        &mut self,
        event_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<Registration>>> + Send;

    /// Stamps the gate check-in time on a registration.
    fn mark_checked_in(
        &mut self,
        registration_id: Uuid,
    ) -> impl Future<Output = PgResult<Registration>> + Send;
}

impl RegistrationRepository for PgConnection {
    async fn create_registration(
        &mut self,
        mut new_registration: NewRegistration,
    ) -> PgResult<Registration> {
        use schema::registrations;

        // Normalize fields: trim whitespace
        new_registration.full_name = new_registration.full_name.trim().to_owned();
        new_registration.guardian_email =
            new_registration.guardian_email.trim().to_lowercase();
        new_registration.guardian_phone = new_registration
            .guardian_phone
            .map(|phone| phone.trim().to_owned())
            .filter(|phone| !phone.is_empty());

        diesel::insert_into(registrations::table)
            .values(&new_registration)
            .returning(Registration::as_returning())
            .get_result(self)
            .await
            .map_err(Into::into)
    }

    async fn find_registration_by_id(
        &mut self,
        registration_id: Uuid,
    ) -> PgResult<Option<Registration>> {
        use schema::registrations::{self, dsl};

        registrations::table
            .filter(dsl::id.eq(registration_id))
            .select(Registration::as_select())
            .first(self)
            .await
            .optional()
            .map_err(Into::into)
    }

    async fn find_registration_by_checkin_token(
        &mut self,
        checkin_token: Uuid,
    ) -> PgResult<Option<Registration>> {
        use schema::registrations::{self, dsl};

        registrations::table
            .filter(dsl::checkin_token.eq(checkin_token))
            .select(Registration::as_select())
            .first(self)
            .await
            .optional()
            .map_err(Into::into)
    }

    async fn update_registration(
        &mut self,
        registration_id: Uuid,
        mut updates: UpdateRegistration,
    ) -> PgResult<Option<Registration>> {
        use schema::registrations::{self, dsl};

        if let Some(name) = updates.full_name.as_mut() {
            *name = name.trim().to_owned();
        }
        if let Some(email) = updates.guardian_email.as_mut() {
            *email = email.trim().to_lowercase();
        }
        // Some(None) clears, Some(Some(value)) sets, None skips
        updates.guardian_phone = updates.guardian_phone.map(|opt| {
            opt.map(|phone| phone.trim().to_owned())
                .filter(|phone| !phone.is_empty())
        });

        diesel::update(registrations::table.filter(dsl::id.eq(registration_id)))
            .set((
                &updates,
                dsl::updated_at.eq(jiff_diesel::Timestamp::from(Timestamp::now())),
            ))
            .returning(Registration::as_returning())
            .get_result(self)
            .await
            .optional()
            .map_err(Into::into)
    }

    async fn list_event_registrations(&mut self, event_id: Uuid) -> PgResult<Vec<Registration>> {
        use schema::registrations::{self, dsl};

        registrations::table
            .filter(dsl::event_id.eq(event_id))
            .order(dsl::full_name.asc())
            .select(Registration::as_select())
            .load(self)
            .await
            .map_err(Into::into)
    }

    async fn list_event_registrations_page(
        &mut self,
        event_id: Uuid,
        pagination: Pagination,
    ) -> PgResult<Vec<Registration>> {
        use schema::registrations::{self, dsl};

        registrations::table
            .filter(dsl::event_id.eq(event_id))
            .order(dsl::created_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(Registration::as_select())
            .load(self)
            .await
            .map_err(Into::into)
    }

    async fn mark_checked_in(&mut self, registration_id: Uuid) -> PgResult<Registration> {
        use schema::registrations::{self, dsl};

        let now = Timestamp::now();

        diesel::update(registrations::table.filter(dsl::id.eq(registration_id)))
            .set((
                dsl::checked_in_at.eq(Some(jiff_diesel::Timestamp::from(now))),
                dsl::updated_at.eq(jiff_diesel::Timestamp::from(now)),
            ))
            .returning(Registration::as_returning())
            .get_result(self)
            .await
            .map_err(Into::into)
    }
}
