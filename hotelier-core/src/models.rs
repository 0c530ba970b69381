use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};

/// Display name used when a requester does not give one.
pub const ANONYMOUS: &str = "Anonymous";

/// A bookable unit. Read-only from the booking flow's point of view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price_per_night: f64,
    pub rating: f64,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Room {
    pub fn new(name: impl Into<String>, rating: f64, price_per_night: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            price_per_night,
            rating,
            images: Vec::new(),
        }
    }
}

/// A reservation of one room for one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub room_id: Uuid,
    pub user_email: String,
    pub user_name: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// True when this booking holds the same (room, day) slot.
    pub fn occupies(&self, room_id: Uuid, date: NaiveDate) -> bool {
        self.room_id == room_id && self.date == date
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub room_id: Uuid,
    pub user_email: String,
    pub user_name: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub room_id: Option<Uuid>,
    pub user_email: Option<String>,
    pub user_name: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleRequest {
    pub room_id: Option<Uuid>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub room_id: Option<Uuid>,
    pub user_email: Option<String>,
    pub user_name: Option<String>,
    pub rating: Option<i32>,
    #[serde(default)]
    pub comment: String,
}

/// Query scope for listing bookings. Empty fields match everything.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFilter {
    pub room_id: Option<Uuid>,
    pub user_email: Option<String>,
}

impl BookingFilter {
    pub fn matches(&self, booking: &Booking) -> bool {
        self.room_id.map_or(true, |id| booking.room_id == id)
            && self
                .user_email
                .as_deref()
                .map_or(true, |email| normalize_email(&booking.user_email) == normalize_email(email))
    }
}

/// Emails are compared and stored trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Falls back to [`ANONYMOUS`] for absent or blank names.
pub fn display_name(name: Option<&str>) -> String {
    match name.map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => ANONYMOUS.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_defaults() {
        assert_eq!(display_name(None), "Anonymous");
        assert_eq!(display_name(Some("   ")), "Anonymous");
        assert_eq!(display_name(Some(" Ada ")), "Ada");
    }

    #[test]
    fn test_booking_request_uses_camel_case() {
        let req: BookingRequest = serde_json::from_value(serde_json::json!({
            "roomId": "7b0c7f0e-4c1f-4b8e-9d5a-0a4c1e2f3d4b",
            "userEmail": "guest@example.com",
            "date": "2024-06-10"
        }))
        .unwrap();

        assert!(req.room_id.is_some());
        assert_eq!(req.user_email.as_deref(), Some("guest@example.com"));
        assert!(req.user_name.is_none());
    }

    #[test]
    fn test_booking_serializes_plain_date() {
        let booking = Booking {
            id: Uuid::new_v4(),
            room_id: Uuid::new_v4(),
            user_email: "guest@example.com".to_string(),
            user_name: ANONYMOUS.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&booking).unwrap();
        assert_eq!(json["date"], "2024-06-10");
        assert_eq!(json["userName"], "Anonymous");
    }

    #[test]
    fn test_filter_matches() {
        let room = Uuid::new_v4();
        let booking = Booking {
            id: Uuid::new_v4(),
            room_id: room,
            user_email: "a@example.com".to_string(),
            user_name: ANONYMOUS.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            created_at: Utc::now(),
        };

        assert!(BookingFilter::default().matches(&booking));
        assert!(BookingFilter { room_id: Some(room), user_email: None }.matches(&booking));
        assert!(!BookingFilter { room_id: None, user_email: Some("b@example.com".into()) }.matches(&booking));
    }

    #[test]
    fn test_filter_ignores_email_case() {
        let booking = Booking {
            id: Uuid::new_v4(),
            room_id: Uuid::new_v4(),
            user_email: "Ada@Example.com".to_string(),
            user_name: ANONYMOUS.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            created_at: Utc::now(),
        };

        let filter = BookingFilter { room_id: None, user_email: Some(" ada@example.com".into()) };
        assert!(filter.matches(&booking));
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }
}
