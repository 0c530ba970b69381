use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Booking, BookingFilter, Review, Room};
use crate::CoreResult;

/// Read access to the room catalogue
#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn list_rooms(&self) -> CoreResult<Vec<Room>>;

    /// Rooms rated strictly above `threshold`, best first, at most `limit`.
    async fn top_rated(&self, threshold: f64, limit: usize) -> CoreResult<Vec<Room>>;

    async fn find_room(&self, id: Uuid) -> CoreResult<Option<Room>>;
}

/// Booking storage.
///
/// Implementations must reject a write that would leave two bookings on the
/// same (room, date) with `CoreError::Conflict`, even when the caller's own
/// check passed a moment earlier.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn find_booking(&self, id: Uuid) -> CoreResult<Option<Booking>>;

    async fn list_for_room(&self, room_id: Uuid) -> CoreResult<Vec<Booking>>;

    async fn list_bookings(&self, filter: &BookingFilter) -> CoreResult<Vec<Booking>>;

    async fn insert_booking(&self, booking: &Booking) -> CoreResult<()>;

    async fn update_booking(&self, booking: &Booking) -> CoreResult<()>;

    /// Returns false when nothing was deleted.
    async fn delete_booking(&self, id: Uuid) -> CoreResult<bool>;
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Newest first.
    async fn list_reviews(&self, room_id: Option<Uuid>) -> CoreResult<Vec<Review>>;

    async fn find_by_author(&self, room_id: Uuid, user_email: &str) -> CoreResult<Option<Review>>;

    /// `CoreError::Conflict` when the author already reviewed the room.
    async fn insert_review(&self, review: &Review) -> CoreResult<()>;
}
