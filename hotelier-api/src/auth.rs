use axum::{
    extract::State,
    Json,
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use jsonwebtoken::{encode, Header, EncodingKey};
use chrono::{TimeDelta, Utc};
use hotelier_shared::Masked;
use crate::{state::AppState, error::AppError};

/// `typ` claim stamped on every session token. Identity verification
/// refuses tokens carrying it.
pub const SESSION_TOKEN_TYPE: &str = "session";

/// Claims of a session token issued by `POST /jwt`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    pub sub: String,
    pub email: String,
    pub typ: String,
    pub exp: usize,
}

#[derive(Debug, Deserialize)]
struct SessionRequest {
    email: Option<String>,
}

#[derive(Debug, Serialize)]
struct AuthResponse {
    token: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/jwt", post(issue_session_token))
}

async fn issue_session_token(
    State(state): State<AppState>,
    Json(req): Json<SessionRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = req.email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::ValidationError("email is required".to_string()))?;

    let expires_at = i64::try_from(state.auth.expiration)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .and_then(|ttl| Utc::now().checked_add_signed(ttl))
        .ok_or_else(|| AppError::InternalServerError("Session expiry out of range".to_string()))?;

    let my_claims = SessionClaims {
        sub: email.to_owned(),
        email: email.to_owned(),
        typ: SESSION_TOKEN_TYPE.to_string(),
        exp: expires_at.timestamp() as usize,
    };

    let token = encode(&Header::default(), &my_claims, &EncodingKey::from_secret(state.auth.secret.as_bytes()))
        .map_err(|e| AppError::InternalServerError(format!("Token encoding failed: {}", e)))?;

    tracing::debug!(user = %Masked::new(email), "Issued session token");

    Ok(Json(AuthResponse { token }))
}
