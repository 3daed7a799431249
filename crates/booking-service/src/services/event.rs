//! Event service - the public catalog and its admin-only editing
//!
//! Seats are set once at creation. Updates go through
//! [`booking_core::EventRepository::update`], which never writes them.

use booking_core::{DomainError, Event, EventQuery, Identity, ImageKind, Snowflake};
use tracing::{info, instrument};

use crate::dto::{CreateEventRequest, EventResponse, PaginatedResponse, UpdateEventRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::image::ImageService;
use super::user::UserService;

pub struct EventService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EventService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn load(&self, event_id: Snowflake) -> ServiceResult<Event> {
        self.ctx
            .event_repo()
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| DomainError::EventNotFound(event_id).into())
    }

    /// One page of the catalog, ordered by id
    #[instrument(skip(self))]
    pub async fn list_events(
        &self,
        query: EventQuery,
    ) -> ServiceResult<PaginatedResponse<EventResponse>> {
        let limit = query.limit;
        let events = self.ctx.event_repo().list(query).await?;

        let has_more = i64::try_from(events.len()).is_ok_and(|n| n >= limit);
        let before = events.first().map(|e| e.id.to_string());
        let after = events.last().map(|e| e.id.to_string());

        Ok(PaginatedResponse::new(
            events.iter().map(EventResponse::from).collect(),
            before,
            after,
            has_more,
            limit,
        ))
    }

    #[instrument(skip(self))]
    pub async fn get_event(&self, event_id: Snowflake) -> ServiceResult<EventResponse> {
        Ok(EventResponse::from(self.load(event_id).await?))
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_event(
        &self,
        identity: &Identity,
        request: CreateEventRequest,
    ) -> ServiceResult<EventResponse> {
        UserService::new(self.ctx).confirm_admin(identity).await?;

        let mut event = Event::new(
            self.ctx.generate_id(),
            request.name,
            request.description,
            request.category,
            request.date,
            request.venue,
            request.price,
            request.seats,
            identity.user_id,
            self.ctx.now(),
        )?;
        if let Some(status) = request.status {
            event.status = status;
        }
        event.location_link = request.location_link;
        event.image = ImageService::target_path(ImageKind::EventImage, request.image.as_deref());

        self.ctx.event_repo().create(&event).await?;

        info!(event_id = %event.id, seats = event.seats, "Event created");
        Ok(EventResponse::from(event))
    }

    #[instrument(skip(self, request))]
    pub async fn update_event(
        &self,
        identity: &Identity,
        event_id: Snowflake,
        request: UpdateEventRequest,
    ) -> ServiceResult<EventResponse> {
        UserService::new(self.ctx).confirm_admin(identity).await?;

        let mut event = self.load(event_id).await?;
        let old_image = event.image.clone();

        if let Some(name) = request.name {
            event.name = name;
        }
        if let Some(description) = request.description {
            event.description = description;
        }
        if let Some(category) = request.category {
            event.category = category;
        }
        if let Some(date) = request.date {
            event.date = date;
        }
        if let Some(venue) = request.venue {
            event.venue = venue;
        }
        if let Some(price) = request.price {
            event.price = price;
        }
        if let Some(status) = request.status {
            event.status = status;
        }
        if let Some(link) = request.location_link {
            event.location_link = Some(link);
        }
        if request.image.is_some() {
            event.image = ImageService::target_path(ImageKind::EventImage, request.image.as_deref());
        }
        event.updated_at = self.ctx.now();

        self.ctx.event_repo().update(&event).await?;

        if event.image != old_image {
            ImageService::new(self.ctx)
                .replace_image(ImageKind::EventImage, &old_image, Some(&event.image))
                .await;
        }

        info!(event_id = %event.id, "Event updated");

        // Seats may have moved since we loaded the row
        let current = self.load(event_id).await?;
        Ok(EventResponse::from(current))
    }

    /// Delete an event. Its bookings are removed without restoring seats.
    #[instrument(skip(self))]
    pub async fn delete_event(&self, identity: &Identity, event_id: Snowflake) -> ServiceResult<()> {
        UserService::new(self.ctx).confirm_admin(identity).await?;

        let event = self.load(event_id).await?;
        self.ctx.event_repo().delete(event.id).await?;

        ImageService::new(self.ctx)
            .delete_image(ImageKind::EventImage, &event.image)
            .await;

        info!(event_id = %event.id, deleted_by = %identity.user_id, "Event deleted");
        Ok(())
    }
}
