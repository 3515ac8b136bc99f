//! Submit Rating Use Case
//!
//! The upsert path (POST) and the strict-update path (PUT). The user id
//! always comes from the authenticated identity, never from the body.

use std::sync::Arc;

use crate::domain::repository::{RatingOutcome, RatingRepository, StoreRepository};
use crate::domain::value_objects::RatingValue;
use crate::error::{RatingsError, RatingsResult};

/// Rating submission input
pub struct SubmitRatingInput {
    pub store_id: Option<i64>,
    /// Arrives as a JSON number; integer-ness is validated, not rounded
    pub rating: Option<f64>,
}

impl SubmitRatingInput {
    fn validate(self) -> RatingsResult<(i64, RatingValue)> {
        let store_id = self.store_id.ok_or(RatingsError::InvalidRating)?;
        let rating = RatingValue::from_json_number(
            self.rating.ok_or(RatingsError::InvalidRating)?,
        )?;
        Ok((store_id, rating))
    }
}

/// Submit rating use case
pub struct SubmitRatingUseCase<R>
where
    R: StoreRepository + RatingRepository,
{
    repo: Arc<R>,
}

impl<R> SubmitRatingUseCase<R>
where
    R: StoreRepository + RatingRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Upsert: insert on first submission, update on resubmission.
    /// Validation failures write nothing.
    pub async fn submit(&self, user_id: i64, input: SubmitRatingInput) -> RatingsResult<RatingOutcome> {
        let (store_id, rating) = input.validate()?;

        if !self.repo.exists(store_id).await? {
            return Err(RatingsError::StoreNotFound);
        }

        let outcome = self.repo.upsert(user_id, store_id, rating).await?;

        tracing::info!(
            user_id,
            store_id,
            rating = rating.get(),
            outcome = ?outcome,
            "Rating stored"
        );

        Ok(outcome)
    }

    /// Strict update: fails with NotFound when the user has no prior
    /// rating for the store.
    pub async fn update(&self, user_id: i64, input: SubmitRatingInput) -> RatingsResult<()> {
        let (store_id, rating) = input.validate()?;

        if !self.repo.exists(store_id).await? {
            return Err(RatingsError::StoreNotFound);
        }

        if !self.repo.update_existing(user_id, store_id, rating).await? {
            return Err(RatingsError::RatingNotFound);
        }

        tracing::info!(user_id, store_id, rating = rating.get(), "Rating updated");

        Ok(())
    }
}
