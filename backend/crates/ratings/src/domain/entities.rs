//! Domain Entities
//!
//! Core business entities for the store/rating domain.

use chrono::{DateTime, Utc};

/// Store entity as persisted
#[derive(Debug, Clone)]
pub struct Store {
    pub id: i64,
    pub name: String,
    /// Unique across stores
    pub email: String,
    pub address: String,
    /// Owning user (role owner); the authoritative association
    pub owner_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A store about to be inserted; the id is assigned by the database.
#[derive(Debug, Clone)]
pub struct NewStore {
    pub name: String,
    pub email: String,
    pub address: String,
    pub owner_id: Option<i64>,
}

/// Listing row: store plus its aggregated average rating.
///
/// `average_rating` is None for stores nobody has rated yet.
#[derive(Debug, Clone)]
pub struct StoreSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub address: String,
    pub average_rating: Option<f64>,
    /// The calling user's own rating; only populated by the
    /// per-user listing
    pub user_rating: Option<i32>,
}

/// The store resolved for an owner's dashboard
#[derive(Debug, Clone)]
pub struct OwnerStore {
    pub id: i64,
    pub name: String,
}

/// One rating joined with its rater, for the owner dashboard
#[derive(Debug, Clone)]
pub struct StoreRating {
    pub rating: i32,
    pub user_id: i64,
    pub user_name: String,
}

/// Admin dashboard counts. The three counts are taken independently;
/// momentary skew between them under concurrent writes is accepted.
#[derive(Debug, Clone, Copy)]
pub struct DashboardTotals {
    pub total_users: i64,
    pub total_stores: i64,
    pub total_ratings: i64,
}
