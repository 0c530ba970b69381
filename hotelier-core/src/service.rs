use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use hotelier_shared::Masked;
use tracing::info;
use uuid::Uuid;

use crate::models::{normalize_email, Booking, BookingFilter, BookingRequest, RescheduleRequest, Review, ReviewRequest, Room};
use crate::repository::{BookingRepository, ReviewRepository, RoomRepository};
use crate::reviews::ReviewGatekeeper;
use crate::validator::BookingValidator;
use crate::{CoreError, CoreResult};

/// Runs each request as lookup, validate, write against the injected stores.
#[derive(Clone)]
pub struct BookingService {
    rooms: Arc<dyn RoomRepository>,
    bookings: Arc<dyn BookingRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl BookingService {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        bookings: Arc<dyn BookingRepository>,
        reviews: Arc<dyn ReviewRepository>,
    ) -> Self {
        Self { rooms, bookings, reviews }
    }

    // ------------------------------------------------------------------
    // Rooms
    // ------------------------------------------------------------------

    pub async fn top_rated_rooms(&self, threshold: f64, limit: usize) -> CoreResult<Vec<Room>> {
        self.rooms.top_rated(threshold, limit).await
    }

    pub async fn list_rooms(&self) -> CoreResult<Vec<Room>> {
        self.rooms.list_rooms().await
    }

    pub async fn get_room(&self, id: Uuid) -> CoreResult<Room> {
        self.rooms
            .find_room(id)
            .await?
            .ok_or_else(|| CoreError::NotFound("Room not found".to_string()))
    }

    // ------------------------------------------------------------------
    // Bookings
    // ------------------------------------------------------------------

    pub async fn create_booking(&self, req: &BookingRequest, now: DateTime<Utc>) -> CoreResult<Booking> {
        let (room, siblings) = match req.room_id {
            Some(room_id) => (
                self.rooms.find_room(room_id).await?,
                self.bookings.list_for_room(room_id).await?,
            ),
            None => (None, Vec::new()),
        };

        let booking = BookingValidator::create(room.as_ref(), &siblings, req, now)?;
        self.bookings.insert_booking(&booking).await?;

        info!(
            booking_id = %booking.id,
            room_id = %booking.room_id,
            date = %booking.date,
            user = %Masked::new(booking.user_email.as_str()),
            "Booking created"
        );
        Ok(booking)
    }

    pub async fn list_bookings(&self, filter: &BookingFilter) -> CoreResult<Vec<Booking>> {
        self.bookings.list_bookings(filter).await
    }

    pub async fn reschedule_booking(&self, booking_id: Uuid, req: &RescheduleRequest) -> CoreResult<Booking> {
        let (room, siblings) = match req.room_id {
            Some(room_id) => (
                self.rooms.find_room(room_id).await?,
                self.bookings.list_for_room(room_id).await?,
            ),
            None => (None, Vec::new()),
        };
        let current = self.bookings.find_booking(booking_id).await?;

        let updated = BookingValidator::reschedule(booking_id, current.as_ref(), room.as_ref(), &siblings, req)?;
        self.bookings.update_booking(&updated).await?;

        info!(
            booking_id = %updated.id,
            room_id = %updated.room_id,
            date = %updated.date,
            "Booking rescheduled"
        );
        Ok(updated)
    }

    pub async fn cancel_booking(&self, booking_id: Uuid, today: NaiveDate) -> CoreResult<()> {
        let booking = self.bookings.find_booking(booking_id).await?;
        BookingValidator::cancel(booking.as_ref(), today)?;

        if !self.bookings.delete_booking(booking_id).await? {
            return Err(CoreError::NotFound("Booking not found".to_string()));
        }

        info!(booking_id = %booking_id, "Booking cancelled");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Reviews
    // ------------------------------------------------------------------

    pub async fn list_reviews(&self, room_id: Option<Uuid>) -> CoreResult<Vec<Review>> {
        self.reviews.list_reviews(room_id).await
    }

    pub async fn submit_review(&self, req: &ReviewRequest, now: DateTime<Utc>) -> CoreResult<Review> {
        let email = normalize_email(req.user_email.as_deref().unwrap_or_default());

        let (room, bookings, existing) = match req.room_id {
            Some(room_id) if !email.is_empty() => {
                let filter = BookingFilter {
                    room_id: Some(room_id),
                    user_email: Some(email.clone()),
                };
                (
                    self.rooms.find_room(room_id).await?,
                    self.bookings.list_bookings(&filter).await?,
                    self.reviews.find_by_author(room_id, &email).await?,
                )
            }
            _ => (None, Vec::new(), None),
        };

        let review = ReviewGatekeeper::submit(room.as_ref(), &bookings, existing.as_ref(), req, now)?;
        self.reviews.insert_review(&review).await?;

        info!(
            review_id = %review.id,
            room_id = %review.room_id,
            user = %Masked::new(review.user_email.as_str()),
            "Review posted"
        );
        Ok(review)
    }
}
