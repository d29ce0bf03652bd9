//! Error types for Pitchbook server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Stable application error codes surfaced to API clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    NoSuchData = 4,
    BadValue = 5,
    Duplicate = 6,
    DuplicateSlot = 7,
    SlotUnavailable = 8,
    SlotConflict = 9,
    SlotInUse = 10,
    PastDate = 11,
    InapplicableCode = 12,
    UsageCapExceeded = 13,
    InvalidRank = 14,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    /// A slot already exists for the same shift, date and start time
    #[error("Duplicate slot: {0}")]
    DuplicateSlot(String),

    /// Target slot is not AVAILABLE (booked or under maintenance)
    #[error("Slot not available: {0}")]
    SlotUnavailable(String),

    /// Another booking already claims the slot
    #[error("Slot conflict: {0}")]
    SlotConflict(String),

    /// Slot is referenced by a non-cancelled booking and cannot be deleted
    #[error("Slot in use: {0}")]
    SlotInUse(String),

    #[error("Past date: {0}")]
    PastDate(String),

    /// Discount code is inactive or outside its validity window
    #[error("Discount code not applicable: {0}")]
    InapplicableCode(String),

    /// Discount code usage cap reached
    #[error("Discount code usage cap exceeded: {0}")]
    UsageCapExceeded(String),

    #[error("Invalid rank: {0}")]
    InvalidRank(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchData, msg.clone())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::Conflict(msg) => {
                (StatusCode::CONFLICT, ErrorCode::Duplicate, msg.clone())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
            AppError::DuplicateSlot(msg) => {
                (StatusCode::CONFLICT, ErrorCode::DuplicateSlot, msg.clone())
            }
            AppError::SlotUnavailable(msg) => {
                (StatusCode::CONFLICT, ErrorCode::SlotUnavailable, msg.clone())
            }
            AppError::SlotConflict(msg) => {
                (StatusCode::CONFLICT, ErrorCode::SlotConflict, msg.clone())
            }
            AppError::SlotInUse(msg) => {
                (StatusCode::CONFLICT, ErrorCode::SlotInUse, msg.clone())
            }
            AppError::PastDate(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::PastDate, msg.clone())
            }
            AppError::InapplicableCode(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::InapplicableCode, msg.clone())
            }
            AppError::UsageCapExceeded(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::UsageCapExceeded, msg.clone())
            }
            AppError::InvalidRank(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::InvalidRank, msg.clone())
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
