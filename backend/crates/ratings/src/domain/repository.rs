//! Repository Traits
//!
//! Interfaces for store and rating persistence. Implementation is in the
//! infrastructure layer.

use crate::domain::entities::{
    DashboardTotals, NewStore, OwnerStore, Store, StoreRating, StoreSummary,
};
use crate::domain::value_objects::RatingValue;
use crate::error::RatingsResult;

/// Optional filters for admin store listings; case-insensitive substring
/// matches, conjunction over the provided fields only.
#[derive(Debug, Clone, Default)]
pub struct StoreFilter {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Whether an upsert inserted a fresh row or replaced an existing value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingOutcome {
    Created,
    Updated,
}

/// Store repository trait
#[trait_variant::make(StoreRepository: Send)]
pub trait LocalStoreRepository {
    /// Insert a new store. Email uniqueness is enforced by the database; a
    /// constraint conflict surfaces as `RatingsError::StoreEmailTaken`.
    async fn insert(&self, store: &NewStore) -> RatingsResult<Store>;

    /// Check if a store email is already registered
    async fn exists_by_email(&self, email: &str) -> RatingsResult<bool>;

    /// Check if a store id exists
    async fn exists(&self, store_id: i64) -> RatingsResult<bool>;

    /// Check that a user exists and has the owner role
    async fn owner_exists(&self, user_id: i64) -> RatingsResult<bool>;

    /// List stores with their average rating, filtered, ordered by name.
    /// `user_rating` is left unpopulated.
    async fn list_with_average(&self, filter: &StoreFilter) -> RatingsResult<Vec<StoreSummary>>;

    /// List all stores with average rating plus the calling user's own
    /// rating, ordered by name
    async fn list_for_user(&self, user_id: i64) -> RatingsResult<Vec<StoreSummary>>;

    /// The store owned by this user; first match when several exist
    async fn find_by_owner(&self, owner_id: i64) -> RatingsResult<Option<OwnerStore>>;
}

/// Rating repository trait
#[trait_variant::make(RatingRepository: Send)]
pub trait LocalRatingRepository {
    /// Insert-or-update the (user, store) rating in one statement; the
    /// primary key guarantees exactly one winner under races.
    async fn upsert(
        &self,
        user_id: i64,
        store_id: i64,
        rating: RatingValue,
    ) -> RatingsResult<RatingOutcome>;

    /// Update an existing rating only. Returns false when the user has not
    /// rated this store yet.
    async fn update_existing(
        &self,
        user_id: i64,
        store_id: i64,
        rating: RatingValue,
    ) -> RatingsResult<bool>;

    /// All ratings for a store joined with rater id and name, most
    /// recently updated first
    async fn ratings_for_store(&self, store_id: i64) -> RatingsResult<Vec<StoreRating>>;

    /// Independent table counts for the admin dashboard
    async fn totals(&self) -> RatingsResult<DashboardTotals>;
}
