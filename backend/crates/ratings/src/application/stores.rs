//! Store Management Use Case
//!
//! Admin store creation and the three store listings (admin filtered,
//! authenticated catalog, per-user with own rating).

use std::sync::Arc;

use auth::models::Email;

use crate::domain::entities::{NewStore, StoreSummary};
use crate::domain::repository::{StoreFilter, StoreRepository};
use crate::error::{RatingsError, RatingsResult};

/// Create store input
pub struct CreateStoreInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    /// Optional owning user; must reference a user with the owner role
    pub owner_id: Option<i64>,
}

/// Store management use case
pub struct ManageStoresUseCase<S>
where
    S: StoreRepository,
{
    repo: Arc<S>,
}

impl<S> ManageStoresUseCase<S>
where
    S: StoreRepository,
{
    pub fn new(repo: Arc<S>) -> Self {
        Self { repo }
    }

    /// Create a store, returning the generated id
    pub async fn create(&self, input: CreateStoreInput) -> RatingsResult<i64> {
        let (name, email, address) = match (input.name, input.email, input.address) {
            (Some(name), Some(email), Some(address))
                if !name.trim().is_empty()
                    && !email.trim().is_empty()
                    && !address.trim().is_empty() =>
            {
                (name, email, address)
            }
            _ => return Err(RatingsError::MissingFields),
        };

        // Store emails share the user-email shape rules
        let email = Email::new(email)
            .map_err(|e| RatingsError::Validation(e.to_string()))?;

        // Fast-path duplicate check; the unique constraint stays
        // authoritative under races.
        if self.repo.exists_by_email(email.as_str()).await? {
            return Err(RatingsError::StoreEmailTaken);
        }

        if let Some(owner_id) = input.owner_id {
            if !self.repo.owner_exists(owner_id).await? {
                return Err(RatingsError::InvalidOwner);
            }
        }

        let store = self
            .repo
            .insert(&NewStore {
                name,
                email: email.into_db(),
                address,
                owner_id: input.owner_id,
            })
            .await?;

        tracing::info!(store_id = store.id, "Store added");

        Ok(store.id)
    }

    /// Admin listing: filter conjunction, average rating per store
    pub async fn list(&self, filter: StoreFilter) -> RatingsResult<Vec<StoreSummary>> {
        self.repo.list_with_average(&filter).await
    }

    /// Authenticated catalog: every store with its average rating
    pub async fn catalog(&self) -> RatingsResult<Vec<StoreSummary>> {
        self.repo.list_with_average(&StoreFilter::default()).await
    }

    /// Per-user listing: catalog plus the caller's own rating per store
    pub async fn list_for_user(&self, user_id: i64) -> RatingsResult<Vec<StoreSummary>> {
        self.repo.list_for_user(user_id).await
    }
}
