use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use hotelier_core::{Review, ReviewRequest};

use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewQuery {
    room_id: Option<Uuid>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/reviews", get(list_reviews).post(submit_review))
}

/// GET /api/reviews?roomId=
async fn list_reviews(
    State(state): State<AppState>,
    Query(query): Query<ReviewQuery>,
) -> Result<Json<Vec<Review>>, AppError> {
    Ok(Json(state.service.list_reviews(query.room_id).await?))
}

/// POST /api/reviews
async fn submit_review(
    State(state): State<AppState>,
    Json(req): Json<ReviewRequest>,
) -> Result<(StatusCode, Json<Review>), AppError> {
    let review = state.service.submit_review(&req, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(review)))
}
