use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use hotelier_core::repository::ReviewRepository;
use hotelier_core::{CoreResult, Review};

use crate::database::{internal, map_write_error};

pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ReviewRow {
    id: Uuid,
    room_id: Uuid,
    user_email: String,
    user_name: String,
    rating: i32,
    comment: String,
    created_at: DateTime<Utc>,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Review {
            id: row.id,
            room_id: row.room_id,
            user_email: row.user_email,
            user_name: row.user_name,
            rating: row.rating,
            comment: row.comment,
            created_at: row.created_at,
        }
    }
}

const REVIEW_COLUMNS: &str = "id, room_id, user_email, user_name, rating, comment, created_at";

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    async fn list_reviews(&self, room_id: Option<Uuid>) -> CoreResult<Vec<Review>> {
        let rows = sqlx::query_as::<_, ReviewRow>(&format!(
            "SELECT {} FROM reviews WHERE ($1::uuid IS NULL OR room_id = $1) ORDER BY created_at DESC",
            REVIEW_COLUMNS
        ))
        .bind(room_id)
        .fetch_all(&self.pool)
        .await
        .map_err(internal)?;

        Ok(rows.into_iter().map(Review::from).collect())
    }

    async fn find_by_author(&self, room_id: Uuid, user_email: &str) -> CoreResult<Option<Review>> {
        let row = sqlx::query_as::<_, ReviewRow>(&format!(
            "SELECT {} FROM reviews WHERE room_id = $1 AND lower(user_email) = lower($2)",
            REVIEW_COLUMNS
        ))
        .bind(room_id)
        .bind(user_email)
        .fetch_optional(&self.pool)
        .await
        .map_err(internal)?;

        Ok(row.map(Review::from))
    }

    async fn insert_review(&self, review: &Review) -> CoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO reviews (id, room_id, user_email, user_name, rating, comment, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(review.id)
        .bind(review.room_id)
        .bind(&review.user_email)
        .bind(&review.user_name)
        .bind(review.rating)
        .bind(&review.comment)
        .bind(review.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "You have already reviewed this room"))?;

        Ok(())
    }
}
