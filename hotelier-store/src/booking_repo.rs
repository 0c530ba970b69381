use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use hotelier_core::repository::BookingRepository;
use hotelier_core::{Booking, BookingFilter, CoreResult};

use crate::database::{internal, map_write_error};

const SLOT_TAKEN: &str = "Room is already booked for that date";

pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    room_id: Uuid,
    user_email: String,
    user_name: String,
    booking_date: NaiveDate,
    created_at: DateTime<Utc>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Booking {
            id: row.id,
            room_id: row.room_id,
            user_email: row.user_email,
            user_name: row.user_name,
            date: row.booking_date,
            created_at: row.created_at,
        }
    }
}

const BOOKING_COLUMNS: &str = "id, room_id, user_email, user_name, booking_date, created_at";

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn find_booking(&self, id: Uuid) -> CoreResult<Option<Booking>> {
        let row = sqlx::query_as::<_, BookingRow>(&format!("SELECT {} FROM bookings WHERE id = $1", BOOKING_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(internal)?;

        Ok(row.map(Booking::from))
    }

    async fn list_for_room(&self, room_id: Uuid) -> CoreResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {} FROM bookings WHERE room_id = $1 ORDER BY booking_date",
            BOOKING_COLUMNS
        ))
        .bind(room_id)
        .fetch_all(&self.pool)
        .await
        .map_err(internal)?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }

    async fn list_bookings(&self, filter: &BookingFilter) -> CoreResult<Vec<Booking>> {
        // NULL parameters disable their predicate
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            r#"
            SELECT {} FROM bookings
            WHERE ($1::uuid IS NULL OR room_id = $1)
              AND ($2::text IS NULL OR lower(user_email) = lower($2))
            ORDER BY booking_date
            "#,
            BOOKING_COLUMNS
        ))
        .bind(filter.room_id)
        .bind(filter.user_email.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(internal)?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }

    async fn insert_booking(&self, booking: &Booking) -> CoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO bookings (id, room_id, user_email, user_name, booking_date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(booking.id)
        .bind(booking.room_id)
        .bind(&booking.user_email)
        .bind(&booking.user_name)
        .bind(booking.date)
        .bind(booking.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, SLOT_TAKEN))?;

        Ok(())
    }

    async fn update_booking(&self, booking: &Booking) -> CoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE bookings SET room_id = $1, booking_date = $2 WHERE id = $3
            "#,
        )
        .bind(booking.room_id)
        .bind(booking.date)
        .bind(booking.id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, SLOT_TAKEN))?;

        if result.rows_affected() == 0 {
            return Err(hotelier_core::CoreError::NotFound("Booking not found".to_string()));
        }

        Ok(())
    }

    async fn delete_booking(&self, id: Uuid) -> CoreResult<bool> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(internal)?;

        Ok(result.rows_affected() > 0)
    }
}
