use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{display_name, normalize_email, Booking, Review, ReviewRequest, Room};
use crate::validator::{required, required_text};
use crate::{CoreError, CoreResult};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Admits a review only from requesters who booked the room, once per room.
pub struct ReviewGatekeeper;

impl ReviewGatekeeper {
    /// `requester_bookings` are the requester's bookings for the room;
    /// `existing` is the requester's earlier review of it, if any.
    pub fn submit(
        room: Option<&Room>,
        requester_bookings: &[Booking],
        existing: Option<&Review>,
        req: &ReviewRequest,
        now: DateTime<Utc>,
    ) -> CoreResult<Review> {
        required(req.room_id, "roomId")?;
        let user_email = normalize_email(required_text(req.user_email.as_deref(), "userEmail")?);
        let rating = required(req.rating, "rating")?;

        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(CoreError::InvalidInput(format!(
                "rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }

        let room = room.ok_or_else(|| CoreError::NotFound("Room not found".to_string()))?;

        let has_booking = requester_bookings
            .iter()
            .any(|b| b.room_id == room.id && normalize_email(&b.user_email) == user_email);
        if !has_booking {
            return Err(CoreError::Forbidden("You can only review rooms you have booked".to_string()));
        }

        if existing.is_some_and(|r| r.room_id == room.id && normalize_email(&r.user_email) == user_email) {
            return Err(CoreError::Conflict("You have already reviewed this room".to_string()));
        }

        Ok(Review {
            id: Uuid::new_v4(),
            room_id: room.id,
            user_email,
            user_name: display_name(req.user_name.as_deref()),
            rating,
            comment: req.comment.trim().to_string(),
            created_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn booking_for(room: &Room, email: &str) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            room_id: room.id,
            user_email: email.to_string(),
            user_name: "Ada".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            created_at: Utc::now(),
        }
    }

    fn review_request(room: &Room, email: &str, rating: i32) -> ReviewRequest {
        ReviewRequest {
            room_id: Some(room.id),
            user_email: Some(email.to_string()),
            user_name: Some("Ada".to_string()),
            rating: Some(rating),
            comment: "Quiet and clean".to_string(),
        }
    }

    #[test]
    fn test_review_requires_booking() {
        let room = Room::new("A", 4.0, 100.0);
        let result = ReviewGatekeeper::submit(Some(&room), &[], None, &review_request(&room, "ada@example.com", 5), Utc::now());
        assert!(matches!(result, Err(CoreError::Forbidden(_))));
    }

    #[test]
    fn test_someone_elses_booking_does_not_count() {
        let room = Room::new("A", 4.0, 100.0);
        let bookings = vec![booking_for(&room, "bob@example.com")];
        let result = ReviewGatekeeper::submit(Some(&room), &bookings, None, &review_request(&room, "ada@example.com", 5), Utc::now());
        assert!(matches!(result, Err(CoreError::Forbidden(_))));
    }

    #[test]
    fn test_review_once_then_conflict() {
        let room = Room::new("A", 4.0, 100.0);
        let bookings = vec![booking_for(&room, "ada@example.com")];
        let req = review_request(&room, "ada@example.com", 4);

        let review = ReviewGatekeeper::submit(Some(&room), &bookings, None, &req, Utc::now()).unwrap();
        assert_eq!(review.rating, 4);
        assert_eq!(review.user_name, "Ada");

        let again = ReviewGatekeeper::submit(Some(&room), &bookings, Some(&review), &req, Utc::now());
        assert!(matches!(again, Err(CoreError::Conflict(_))));
    }

    #[test]
    fn test_rating_out_of_range() {
        let room = Room::new("A", 4.0, 100.0);
        let bookings = vec![booking_for(&room, "ada@example.com")];
        for rating in [0, 6] {
            let result = ReviewGatekeeper::submit(Some(&room), &bookings, None, &review_request(&room, "ada@example.com", rating), Utc::now());
            assert!(matches!(result, Err(CoreError::InvalidInput(_))));
        }
    }

    #[test]
    fn test_missing_room() {
        let room = Room::new("A", 4.0, 100.0);
        let result = ReviewGatekeeper::submit(None, &[], None, &review_request(&room, "ada@example.com", 3), Utc::now());
        assert!(matches!(result, Err(CoreError::NotFound(_))));
    }
}
