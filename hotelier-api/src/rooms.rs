use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use hotelier_core::Room;
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/hotels/top-rated", get(top_rated))
        .route("/all-rooms", get(all_rooms))
        .route("/api/rooms/{id}", get(get_room))
}

/// GET /hotels/top-rated
async fn top_rated(State(state): State<AppState>) -> Result<Json<Vec<Room>>, AppError> {
    let rules = &state.business_rules;
    let rooms = state
        .service
        .top_rated_rooms(rules.top_rated_threshold, rules.top_rated_limit)
        .await?;
    Ok(Json(rooms))
}

/// GET /all-rooms
async fn all_rooms(State(state): State<AppState>) -> Result<Json<Vec<Room>>, AppError> {
    Ok(Json(state.service.list_rooms().await?))
}

/// GET /api/rooms/:id
async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Room>, AppError> {
    Ok(Json(state.service.get_room(id).await?))
}
