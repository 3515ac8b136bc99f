//! Dashboard Use Cases
//!
//! Admin summary counts and the owner dashboard.

use std::sync::Arc;

use crate::domain::entities::{DashboardTotals, StoreRating};
use crate::domain::repository::{RatingRepository, StoreRepository};
use crate::domain::services::average_rating;
use crate::error::{RatingsError, RatingsResult};

/// Owner dashboard output
#[derive(Debug)]
pub struct OwnerDashboard {
    pub store_name: String,
    /// Absent when the store has no ratings
    pub average_rating: Option<f64>,
    pub ratings: Vec<StoreRating>,
}

/// Dashboard use case
pub struct DashboardUseCase<R>
where
    R: StoreRepository + RatingRepository,
{
    repo: Arc<R>,
}

impl<R> DashboardUseCase<R>
where
    R: StoreRepository + RatingRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Admin stats: three independent counts, no transaction
    pub async fn admin_totals(&self) -> RatingsResult<DashboardTotals> {
        self.repo.totals().await
    }

    /// Owner dashboard: resolve the caller's store, fetch its ratings with
    /// rater names, compute the mean.
    pub async fn owner_dashboard(&self, owner_id: i64) -> RatingsResult<OwnerDashboard> {
        let store = self
            .repo
            .find_by_owner(owner_id)
            .await?
            .ok_or(RatingsError::NoStoreForOwner)?;

        let ratings = self.repo.ratings_for_store(store.id).await?;

        let values: Vec<i32> = ratings.iter().map(|r| r.rating).collect();

        Ok(OwnerDashboard {
            store_name: store.name,
            average_rating: average_rating(&values),
            ratings,
        })
    }
}
