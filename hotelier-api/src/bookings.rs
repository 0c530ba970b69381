use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{get, patch},
    Extension, Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use hotelier_core::identity::Identity;
use hotelier_core::models::normalize_email;
use hotelier_core::{Booking, BookingFilter, BookingRequest, RescheduleRequest};

use crate::error::AppError;
use crate::middleware::identity_middleware;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct CancelResponse {
    deleted: bool,
    id: Uuid,
}

/// Listing needs a verified identity; creation does not.
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/bookings",
            get(list_bookings)
                .route_layer(middleware::from_fn_with_state(state, identity_middleware))
                .post(create_booking),
        )
        .route("/api/bookings/{id}", patch(reschedule_booking).delete(cancel_booking))
}

/// POST /api/bookings
async fn create_booking(
    State(state): State<AppState>,
    Json(req): Json<BookingRequest>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let booking = state.service.create_booking(&req, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// GET /api/bookings?roomId=&userEmail=
///
/// Only the owner of `userEmail` may list its bookings.
async fn list_bookings(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(filter): Query<BookingFilter>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let requested = filter.user_email.as_deref().unwrap_or_default();
    if !identity.is(requested) {
        return Err(AppError::AuthorizationError("Forbidden access".to_string()));
    }

    let filter = BookingFilter {
        room_id: filter.room_id,
        user_email: Some(normalize_email(requested)),
    };
    Ok(Json(state.service.list_bookings(&filter).await?))
}

/// PATCH /api/bookings/:id
async fn reschedule_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<RescheduleRequest>,
) -> Result<Json<Booking>, AppError> {
    Ok(Json(state.service.reschedule_booking(id, &req).await?))
}

/// DELETE /api/bookings/:id
async fn cancel_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CancelResponse>, AppError> {
    state.service.cancel_booking(id, Utc::now().date_naive()).await?;
    Ok(Json(CancelResponse { deleted: true, id }))
}
