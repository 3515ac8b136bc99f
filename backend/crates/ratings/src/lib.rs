//! Ratings (Stores & Ratings) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits, aggregation
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! ## Behavior Model
//! - One rating per (user, store); submitting again updates the value and
//!   refreshes the timestamp. The (user_id, store_id) primary key makes the
//!   upsert race-free; a single statement decides created vs updated.
//! - Average rating is the one-decimal arithmetic mean, absent (null) for
//!   stores with no ratings - never 0.
//! - Store ownership is the explicit `owner_id` column; the owner dashboard
//!   resolves the first store owned by the calling identity.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{RatingsError, RatingsResult};
pub use infra::postgres::PgStoreRepository;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgStoreRepository as RatingsStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

#[cfg(test)]
mod tests;
