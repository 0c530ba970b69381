use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::dates::parse_booking_date;
use crate::models::{display_name, normalize_email, Booking, BookingRequest, RescheduleRequest, Room};
use crate::{CoreError, CoreResult};

/// Decides whether bookings may be created, moved or cancelled.
///
/// Pure: every input (room, sibling bookings, clock) is handed in by the
/// caller, and nothing is persisted here.
pub struct BookingValidator;

impl BookingValidator {
    /// Validate a new booking against the bookings already held for its room.
    pub fn create(
        room: Option<&Room>,
        siblings: &[Booking],
        req: &BookingRequest,
        now: DateTime<Utc>,
    ) -> CoreResult<Booking> {
        required(req.room_id, "roomId")?;
        let user_email = required_text(req.user_email.as_deref(), "userEmail")?;
        let raw_date = required_text(req.date.as_deref(), "date")?;

        let room = room.ok_or_else(|| CoreError::NotFound("Room not found".to_string()))?;
        let date = parse_booking_date(raw_date)?;

        if siblings.iter().any(|b| b.occupies(room.id, date)) {
            return Err(CoreError::Conflict(format!(
                "Room is already booked for {}",
                date
            )));
        }

        Ok(Booking {
            id: Uuid::new_v4(),
            room_id: room.id,
            user_email: normalize_email(user_email),
            user_name: display_name(req.user_name.as_deref()),
            date,
            created_at: now,
        })
    }

    /// Move a booking to a new (room, day). `siblings` are the bookings of the
    /// target room; the booking itself may appear among them.
    pub fn reschedule(
        booking_id: Uuid,
        current: Option<&Booking>,
        room: Option<&Room>,
        siblings: &[Booking],
        req: &RescheduleRequest,
    ) -> CoreResult<Booking> {
        required(req.room_id, "roomId")?;
        let raw_date = required_text(req.date.as_deref(), "date")?;
        let date = parse_booking_date(raw_date)?;

        let room = room.ok_or_else(|| CoreError::NotFound("Room not found".to_string()))?;

        if siblings
            .iter()
            .any(|b| b.id != booking_id && b.occupies(room.id, date))
        {
            return Err(CoreError::Conflict(format!(
                "Room is already booked for {}",
                date
            )));
        }

        let current = current
            .filter(|b| b.id == booking_id)
            .ok_or_else(|| CoreError::NotFound("Booking not found".to_string()))?;

        // Keeping the booked day is a no-op, whichever room is named.
        if current.date == date {
            return Err(CoreError::NotFound("Booking not found or no changes applied".to_string()));
        }

        Ok(Booking {
            room_id: room.id,
            date,
            ..current.clone()
        })
    }

    /// Cancellation is allowed up to and including the day before the booked day.
    pub fn cancel(booking: Option<&Booking>, today: NaiveDate) -> CoreResult<()> {
        let booking = booking.ok_or_else(|| CoreError::NotFound("Booking not found".to_string()))?;

        let expired = match booking.date.pred_opt() {
            Some(latest_cancellation_date) => today > latest_cancellation_date,
            None => true,
        };

        if expired {
            return Err(CoreError::Forbidden("cancellation period has expired".to_string()));
        }

        Ok(())
    }
}

pub(crate) fn required<T>(value: Option<T>, field: &str) -> CoreResult<T> {
    value.ok_or_else(|| CoreError::InvalidInput(format!("{} is required", field)))
}

pub(crate) fn required_text<'a>(value: Option<&'a str>, field: &str) -> CoreResult<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(CoreError::InvalidInput(format!("{} is required", field))),
    }
}
