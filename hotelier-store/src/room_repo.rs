use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use hotelier_core::repository::RoomRepository;
use hotelier_core::{CoreResult, Room};

use crate::database::internal;

pub struct PgRoomRepository {
    pool: PgPool,
}

impl PgRoomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct RoomRow {
    id: Uuid,
    name: String,
    description: String,
    price_per_night: f64,
    rating: f64,
    images: Vec<String>,
}

impl From<RoomRow> for Room {
    fn from(row: RoomRow) -> Self {
        Room {
            id: row.id,
            name: row.name,
            description: row.description,
            price_per_night: row.price_per_night,
            rating: row.rating,
            images: row.images,
        }
    }
}

const ROOM_COLUMNS: &str = "id, name, description, price_per_night, rating, images";

#[async_trait]
impl RoomRepository for PgRoomRepository {
    async fn list_rooms(&self) -> CoreResult<Vec<Room>> {
        let rows = sqlx::query_as::<_, RoomRow>(&format!("SELECT {} FROM rooms ORDER BY name", ROOM_COLUMNS))
            .fetch_all(&self.pool)
            .await
            .map_err(internal)?;

        Ok(rows.into_iter().map(Room::from).collect())
    }

    async fn top_rated(&self, threshold: f64, limit: usize) -> CoreResult<Vec<Room>> {
        let rows = sqlx::query_as::<_, RoomRow>(&format!(
            "SELECT {} FROM rooms WHERE rating > $1 ORDER BY rating DESC LIMIT $2",
            ROOM_COLUMNS
        ))
        .bind(threshold)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(internal)?;

        Ok(rows.into_iter().map(Room::from).collect())
    }

    async fn find_room(&self, id: Uuid) -> CoreResult<Option<Room>> {
        let row = sqlx::query_as::<_, RoomRow>(&format!("SELECT {} FROM rooms WHERE id = $1", ROOM_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(internal)?;

        Ok(row.map(Room::from))
    }
}
