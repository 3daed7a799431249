//! Booking service - the seat ledger's application entry point
//!
//! Preconditions are checked here first so the caller gets the most
//! specific error in a fixed order (existence, status, date, seats,
//! duplicate). The repository re-checks them atomically under a row lock;
//! those checks are what actually protect the inventory.

use booking_core::{Booking, DomainError, Identity, Snowflake, User};
use tracing::{info, instrument};

use crate::dto::{BookingResponse, CreateBookingRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct BookingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BookingService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn owner(&self, identity: &Identity) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(identity.user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(identity.user_id).into())
    }

    /// Book one seat of `request.event` for the caller
    #[instrument(skip(self, request), fields(user_id = %identity.user_id, event_id = %request.event))]
    pub async fn create_booking(
        &self,
        identity: &Identity,
        request: CreateBookingRequest,
    ) -> ServiceResult<BookingResponse> {
        let now = self.ctx.now();
        let event_id = request.event;

        // The token may outlive its account
        let owner = self.owner(identity).await?;

        let event = self
            .ctx
            .event_repo()
            .find_by_id(event_id)
            .await?
            .ok_or(DomainError::EventNotFound(event_id))?;
        event.ensure_bookable(now)?;

        if self.ctx.booking_repo().exists(identity.user_id, event_id).await? {
            return Err(DomainError::AlreadyBooked.into());
        }

        let booking = Booking::new(self.ctx.generate_id(), identity.user_id, event_id, now);
        let created = self
            .ctx
            .booking_repo()
            .create_reserving_seat(&booking, now)
            .await?;

        info!(
            booking_id = %booking.id,
            seats_left = created.event.seats,
            "Booking created"
        );

        Ok(BookingResponse::new(&created, &owner))
    }

    /// Cancel one of the caller's bookings and return its seat
    #[instrument(skip(self), fields(user_id = %identity.user_id))]
    pub async fn cancel_booking(
        &self,
        identity: &Identity,
        booking_id: Snowflake,
    ) -> ServiceResult<()> {
        self.ctx
            .booking_repo()
            .cancel_releasing_seat(booking_id, identity.user_id, self.ctx.now())
            .await?;

        info!(booking_id = %booking_id, "Booking cancelled");
        Ok(())
    }

    /// The caller's bookings, newest first
    #[instrument(skip(self), fields(user_id = %identity.user_id))]
    pub async fn list_bookings(&self, identity: &Identity) -> ServiceResult<Vec<BookingResponse>> {
        let entries = self.ctx.booking_repo().list_for_user(identity.user_id).await?;
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let owner = self.owner(identity).await?;
        Ok(entries
            .iter()
            .map(|entry| BookingResponse::new(entry, &owner))
            .collect())
    }

    #[instrument(skip(self), fields(user_id = %identity.user_id))]
    pub async fn get_booking(
        &self,
        identity: &Identity,
        booking_id: Snowflake,
    ) -> ServiceResult<BookingResponse> {
        let entry = self
            .ctx
            .booking_repo()
            .find_for_user(booking_id, identity.user_id)
            .await?
            .ok_or(DomainError::BookingNotFound(booking_id))?;

        let owner = self.owner(identity).await?;
        Ok(BookingResponse::new(&entry, &owner))
    }
}
