//! Ratings Error Types
//!
//! Store/rating-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Ratings-specific result type alias
pub type RatingsResult<T> = Result<T, RatingsError>;

/// Ratings-specific error variants
#[derive(Debug, Error)]
pub enum RatingsError {
    /// Store id does not exist
    #[error("Store not found")]
    StoreNotFound,

    /// The calling owner has no store
    #[error("Store not found for this owner")]
    NoStoreForOwner,

    /// Strict update with no prior rating
    #[error("No existing rating found for this store")]
    RatingNotFound,

    /// Store email already registered
    #[error("Store with this email already exists")]
    StoreEmailTaken,

    /// Rating absent, out of [1,5], or not an integer
    #[error("Valid store_id and rating (1-5) are required")]
    InvalidRating,

    /// owner_id does not reference a user with the owner role
    #[error("owner_id must reference a user with the owner role")]
    InvalidOwner,

    /// Required request fields absent or empty
    #[error("All fields are required")]
    MissingFields,

    /// Input validation failure (store email format, ...)
    #[error("{0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RatingsError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            RatingsError::StoreNotFound
            | RatingsError::NoStoreForOwner
            | RatingsError::RatingNotFound => ErrorKind::NotFound,
            RatingsError::StoreEmailTaken => ErrorKind::Conflict,
            RatingsError::InvalidRating
            | RatingsError::InvalidOwner
            | RatingsError::MissingFields
            | RatingsError::Validation(_) => ErrorKind::BadRequest,
            RatingsError::Database(_) | RatingsError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError. Server errors keep their detail out of the
    /// client-facing message.
    pub fn to_app_error(&self) -> AppError {
        match self {
            RatingsError::Database(_) | RatingsError::Internal(_) => {
                AppError::new(self.kind(), "Server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            RatingsError::Database(e) => {
                tracing::error!(error = %e, "Ratings database error");
            }
            RatingsError::Internal(msg) => {
                tracing::error!(message = %msg, "Ratings internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Ratings error");
            }
        }
    }
}

impl IntoResponse for RatingsError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
