use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use hotelier_core::repository::{BookingRepository, ReviewRepository, RoomRepository};
use hotelier_core::{Booking, BookingFilter, CoreError, CoreResult, Review, Room};

#[derive(Default)]
struct MemoryState {
    rooms: HashMap<Uuid, Room>,
    bookings: HashMap<Uuid, Booking>,
    reviews: Vec<Review>,
}

impl MemoryState {
    fn slot_taken(&self, booking: &Booking) -> bool {
        self.bookings
            .values()
            .any(|b| b.id != booking.id && b.occupies(booking.room_id, booking.date))
    }
}

/// Process-local store backing all three repositories.
///
/// Uniqueness of (room, date) and (room, author) is re-checked under the
/// write lock, mirroring the constraints of the Postgres schema.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_rooms(rooms: impl IntoIterator<Item = Room>) -> Self {
        let store = Self::new();
        for room in rooms {
            store.insert_room(room).await;
        }
        store
    }

    pub async fn insert_room(&self, room: Room) {
        self.state.write().await.rooms.insert(room.id, room);
    }
}

#[async_trait]
impl RoomRepository for MemoryStore {
    async fn list_rooms(&self) -> CoreResult<Vec<Room>> {
        let state = self.state.read().await;
        let mut rooms: Vec<Room> = state.rooms.values().cloned().collect();
        rooms.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rooms)
    }

    async fn top_rated(&self, threshold: f64, limit: usize) -> CoreResult<Vec<Room>> {
        let state = self.state.read().await;
        let mut rooms: Vec<Room> = state
            .rooms
            .values()
            .filter(|r| r.rating > threshold)
            .cloned()
            .collect();
        rooms.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        rooms.truncate(limit);
        Ok(rooms)
    }

    async fn find_room(&self, id: Uuid) -> CoreResult<Option<Room>> {
        Ok(self.state.read().await.rooms.get(&id).cloned())
    }
}

#[async_trait]
impl BookingRepository for MemoryStore {
    async fn find_booking(&self, id: Uuid) -> CoreResult<Option<Booking>> {
        Ok(self.state.read().await.bookings.get(&id).cloned())
    }

    async fn list_for_room(&self, room_id: Uuid) -> CoreResult<Vec<Booking>> {
        self.list_bookings(&BookingFilter {
            room_id: Some(room_id),
            user_email: None,
        })
        .await
    }

    async fn list_bookings(&self, filter: &BookingFilter) -> CoreResult<Vec<Booking>> {
        let state = self.state.read().await;
        let mut bookings: Vec<Booking> = state
            .bookings
            .values()
            .filter(|b| filter.matches(b))
            .cloned()
            .collect();
        bookings.sort_by_key(|b| (b.date, b.created_at));
        Ok(bookings)
    }

    async fn insert_booking(&self, booking: &Booking) -> CoreResult<()> {
        let mut state = self.state.write().await;
        if state.slot_taken(booking) {
            return Err(CoreError::Conflict("Room is already booked for that date".to_string()));
        }
        state.bookings.insert(booking.id, booking.clone());
        Ok(())
    }

    async fn update_booking(&self, booking: &Booking) -> CoreResult<()> {
        let mut state = self.state.write().await;
        if !state.bookings.contains_key(&booking.id) {
            return Err(CoreError::NotFound("Booking not found".to_string()));
        }
        if state.slot_taken(booking) {
            return Err(CoreError::Conflict("Room is already booked for that date".to_string()));
        }
        state.bookings.insert(booking.id, booking.clone());
        Ok(())
    }

    async fn delete_booking(&self, id: Uuid) -> CoreResult<bool> {
        Ok(self.state.write().await.bookings.remove(&id).is_some())
    }
}

#[async_trait]
impl ReviewRepository for MemoryStore {
    async fn list_reviews(&self, room_id: Option<Uuid>) -> CoreResult<Vec<Review>> {
        let state = self.state.read().await;
        let mut reviews: Vec<Review> = state
            .reviews
            .iter()
            .filter(|r| room_id.map_or(true, |id| r.room_id == id))
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reviews)
    }

    async fn find_by_author(&self, room_id: Uuid, user_email: &str) -> CoreResult<Option<Review>> {
        let state = self.state.read().await;
        Ok(state
            .reviews
            .iter()
            .find(|r| r.room_id == room_id && r.user_email.eq_ignore_ascii_case(user_email.trim()))
            .cloned())
    }

    async fn insert_review(&self, review: &Review) -> CoreResult<()> {
        let mut state = self.state.write().await;
        let duplicate = state
            .reviews
            .iter()
            .any(|r| r.room_id == review.room_id && r.user_email == review.user_email);
        if duplicate {
            return Err(CoreError::Conflict("You have already reviewed this room".to_string()));
        }
        state.reviews.push(review.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn booking(room_id: Uuid, date: NaiveDate) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            room_id,
            user_email: "guest@example.com".to_string(),
            user_name: "Anonymous".to_string(),
            date,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_rejects_taken_slot() {
        let store = MemoryStore::new();
        let room = Uuid::new_v4();
        let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();

        store.insert_booking(&booking(room, date)).await.unwrap();
        let second = store.insert_booking(&booking(room, date)).await;

        assert!(matches!(second, Err(CoreError::Conflict(_))));
        assert_eq!(store.list_for_room(room).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_onto_own_slot_is_allowed() {
        let store = MemoryStore::new();
        let room = Uuid::new_v4();
        let mut b = booking(room, NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
        store.insert_booking(&b).await.unwrap();

        b.user_name = "Ada".to_string();
        store.update_booking(&b).await.unwrap();
        assert_eq!(store.find_booking(b.id).await.unwrap().unwrap().user_name, "Ada");
    }

    #[tokio::test]
    async fn test_top_rated_filters_and_limits() {
        let rooms = (0..10).map(|i| Room::new(format!("Room {}", i), 4.0 + i as f64 * 0.1, 100.0));
        let store = MemoryStore::with_rooms(rooms).await;

        let top = store.top_rated(4.5, 3).await.unwrap();
        assert_eq!(top.len(), 3);
        assert!(top.iter().all(|r| r.rating > 4.5));
        assert!(top[0].rating >= top[1].rating && top[1].rating >= top[2].rating);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_leave_one_booking() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let room = Uuid::new_v4();
        let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.insert_booking(&booking(room, date)).await })
            })
            .collect();

        let mut ok = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                ok += 1;
            }
        }

        assert_eq!(ok, 1);
    }
}
