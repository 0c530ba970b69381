pub mod models;
pub mod dates;
pub mod validator;
pub mod reviews;
pub mod repository;
pub mod identity;
pub mod service;

pub use models::{Booking, BookingFilter, BookingRequest, RescheduleRequest, Review, ReviewRequest, Room};
pub use validator::BookingValidator;
pub use reviews::ReviewGatekeeper;
pub use service::BookingService;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Internal service error: {0}")]
    InternalError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
