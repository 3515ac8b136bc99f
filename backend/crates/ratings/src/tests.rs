//! Unit tests for the ratings crate
//!
//! Use cases run against an in-memory repository implementing both
//! `StoreRepository` and `RatingRepository`, mirroring the database's
//! uniqueness behavior.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::application::dashboard::DashboardUseCase;
use crate::application::ratings::{SubmitRatingInput, SubmitRatingUseCase};
use crate::application::stores::{CreateStoreInput, ManageStoresUseCase};
use crate::domain::entities::{
    DashboardTotals, NewStore, OwnerStore, Store, StoreRating, StoreSummary,
};
use crate::domain::repository::{
    RatingOutcome, RatingRepository, StoreFilter, StoreRepository,
};
use crate::domain::services::average_rating;
use crate::domain::value_objects::RatingValue;
use crate::error::{RatingsError, RatingsResult};

// ============================================================================
// In-memory repository
// ============================================================================

#[derive(Clone, Default)]
struct MemStoreRepo {
    inner: Arc<Mutex<MemState>>,
}

#[derive(Default)]
struct MemState {
    next_store_id: i64,
    stores: Vec<Store>,
    /// (user_id, store_id, rating)
    ratings: Vec<(i64, i64, i32)>,
    /// user id -> (name, is_owner)
    users: HashMap<i64, (String, bool)>,
}

impl MemStoreRepo {
    fn with_user(self, user_id: i64, name: &str, is_owner: bool) -> Self {
        self.inner
            .lock()
            .unwrap()
            .users
            .insert(user_id, (name.to_string(), is_owner));
        self
    }

    fn rating_of(&self, user_id: i64, store_id: i64) -> Option<i32> {
        let state = self.inner.lock().unwrap();
        state
            .ratings
            .iter()
            .find(|(u, s, _)| *u == user_id && *s == store_id)
            .map(|(_, _, r)| *r)
    }

    fn rating_count(&self) -> usize {
        self.inner.lock().unwrap().ratings.len()
    }
}

impl StoreRepository for MemStoreRepo {
    async fn insert(&self, store: &NewStore) -> RatingsResult<Store> {
        let mut state = self.inner.lock().unwrap();

        // Same behavior as the unique constraint on stores.email
        if state.stores.iter().any(|s| s.email == store.email) {
            return Err(RatingsError::StoreEmailTaken);
        }

        state.next_store_id += 1;
        let now = Utc::now();
        let stored = Store {
            id: state.next_store_id,
            name: store.name.clone(),
            email: store.email.clone(),
            address: store.address.clone(),
            owner_id: store.owner_id,
            created_at: now,
            updated_at: now,
        };
        state.stores.push(stored.clone());

        Ok(stored)
    }

    async fn exists_by_email(&self, email: &str) -> RatingsResult<bool> {
        let state = self.inner.lock().unwrap();
        Ok(state.stores.iter().any(|s| s.email == email))
    }

    async fn exists(&self, store_id: i64) -> RatingsResult<bool> {
        let state = self.inner.lock().unwrap();
        Ok(state.stores.iter().any(|s| s.id == store_id))
    }

    async fn owner_exists(&self, user_id: i64) -> RatingsResult<bool> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .users
            .get(&user_id)
            .map(|(_, is_owner)| *is_owner)
            .unwrap_or(false))
    }

    async fn list_with_average(&self, filter: &StoreFilter) -> RatingsResult<Vec<StoreSummary>> {
        let state = self.inner.lock().unwrap();
        let matches = |haystack: &str, needle: &Option<String>| match needle {
            Some(n) => haystack.to_lowercase().contains(&n.to_lowercase()),
            None => true,
        };

        let mut stores: Vec<StoreSummary> = state
            .stores
            .iter()
            .filter(|s| {
                matches(&s.name, &filter.name)
                    && matches(&s.email, &filter.email)
                    && matches(&s.address, &filter.address)
            })
            .map(|s| {
                let values: Vec<i32> = state
                    .ratings
                    .iter()
                    .filter(|(_, store_id, _)| *store_id == s.id)
                    .map(|(_, _, r)| *r)
                    .collect();
                StoreSummary {
                    id: s.id,
                    name: s.name.clone(),
                    email: s.email.clone(),
                    address: s.address.clone(),
                    average_rating: average_rating(&values),
                    user_rating: None,
                }
            })
            .collect();
        stores.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(stores)
    }

    async fn list_for_user(&self, user_id: i64) -> RatingsResult<Vec<StoreSummary>> {
        let mut stores = self.list_with_average(&StoreFilter::default()).await?;
        for store in &mut stores {
            store.user_rating = self.rating_of(user_id, store.id);
        }
        Ok(stores)
    }

    async fn find_by_owner(&self, owner_id: i64) -> RatingsResult<Option<OwnerStore>> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .stores
            .iter()
            .filter(|s| s.owner_id == Some(owner_id))
            .min_by_key(|s| s.id)
            .map(|s| OwnerStore {
                id: s.id,
                name: s.name.clone(),
            }))
    }
}

impl RatingRepository for MemStoreRepo {
    async fn upsert(
        &self,
        user_id: i64,
        store_id: i64,
        rating: RatingValue,
    ) -> RatingsResult<RatingOutcome> {
        let mut state = self.inner.lock().unwrap();
        match state
            .ratings
            .iter_mut()
            .find(|(u, s, _)| *u == user_id && *s == store_id)
        {
            Some(entry) => {
                entry.2 = rating.get();
                Ok(RatingOutcome::Updated)
            }
            None => {
                state.ratings.push((user_id, store_id, rating.get()));
                Ok(RatingOutcome::Created)
            }
        }
    }

    async fn update_existing(
        &self,
        user_id: i64,
        store_id: i64,
        rating: RatingValue,
    ) -> RatingsResult<bool> {
        let mut state = self.inner.lock().unwrap();
        match state
            .ratings
            .iter_mut()
            .find(|(u, s, _)| *u == user_id && *s == store_id)
        {
            Some(entry) => {
                entry.2 = rating.get();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ratings_for_store(&self, store_id: i64) -> RatingsResult<Vec<StoreRating>> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .ratings
            .iter()
            .filter(|(_, s, _)| *s == store_id)
            .map(|(user_id, _, rating)| StoreRating {
                rating: *rating,
                user_id: *user_id,
                user_name: state
                    .users
                    .get(user_id)
                    .map(|(name, _)| name.clone())
                    .unwrap_or_default(),
            })
            .collect())
    }

    async fn totals(&self) -> RatingsResult<DashboardTotals> {
        let state = self.inner.lock().unwrap();
        Ok(DashboardTotals {
            total_users: state.users.len() as i64,
            total_stores: state.stores.len() as i64,
            total_ratings: state.ratings.len() as i64,
        })
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn store_input(email: &str, owner_id: Option<i64>) -> CreateStoreInput {
    CreateStoreInput {
        name: Some("Corner Books".to_string()),
        email: Some(email.to_string()),
        address: Some("5 Market Lane".to_string()),
        owner_id,
    }
}

fn rating_input(store_id: i64, rating: f64) -> SubmitRatingInput {
    SubmitRatingInput {
        store_id: Some(store_id),
        rating: Some(rating),
    }
}

async fn repo_with_store() -> (Arc<MemStoreRepo>, i64) {
    let repo = Arc::new(MemStoreRepo::default().with_user(1, "Avery Rater", false));
    let store_id = ManageStoresUseCase::new(repo.clone())
        .create(store_input("books@x.com", None))
        .await
        .unwrap();
    (repo, store_id)
}

// ============================================================================
// Rating submission
// ============================================================================

#[tokio::test]
async fn submit_creates_then_updates() {
    let (repo, store_id) = repo_with_store().await;
    let use_case = SubmitRatingUseCase::new(repo.clone());

    let first = use_case.submit(1, rating_input(store_id, 4.0)).await.unwrap();
    assert_eq!(first, RatingOutcome::Created);

    let second = use_case.submit(1, rating_input(store_id, 2.0)).await.unwrap();
    assert_eq!(second, RatingOutcome::Updated);

    // After the resubmission the stored value is the second one
    assert_eq!(repo.rating_of(1, store_id), Some(2));

    // And the catalog reflects it as the average
    let stores = ManageStoresUseCase::new(repo.clone()).catalog().await.unwrap();
    assert_eq!(stores[0].average_rating, Some(2.0));
}

#[tokio::test]
async fn submit_rejects_out_of_range_and_writes_nothing() {
    let (repo, store_id) = repo_with_store().await;
    let use_case = SubmitRatingUseCase::new(repo.clone());

    for bad in [0.0, 6.0, -1.0, 3.5] {
        let err = use_case.submit(1, rating_input(store_id, bad)).await.unwrap_err();
        assert!(matches!(err, RatingsError::InvalidRating));
    }

    let err = use_case
        .submit(
            1,
            SubmitRatingInput {
                store_id: Some(store_id),
                rating: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RatingsError::InvalidRating));

    assert_eq!(repo.rating_count(), 0);
}

#[tokio::test]
async fn submit_unknown_store() {
    let (repo, _store_id) = repo_with_store().await;

    let err = SubmitRatingUseCase::new(repo)
        .submit(1, rating_input(999, 3.0))
        .await
        .unwrap_err();
    assert!(matches!(err, RatingsError::StoreNotFound));
}

#[tokio::test]
async fn strict_update_requires_prior_rating() {
    let (repo, store_id) = repo_with_store().await;
    let use_case = SubmitRatingUseCase::new(repo.clone());

    let err = use_case.update(1, rating_input(store_id, 3.0)).await.unwrap_err();
    assert!(matches!(err, RatingsError::RatingNotFound));

    use_case.submit(1, rating_input(store_id, 5.0)).await.unwrap();
    use_case.update(1, rating_input(store_id, 3.0)).await.unwrap();
    assert_eq!(repo.rating_of(1, store_id), Some(3));
}

// ============================================================================
// Store management
// ============================================================================

#[tokio::test]
async fn create_store_rejects_duplicate_email() {
    let repo = Arc::new(MemStoreRepo::default());
    let use_case = ManageStoresUseCase::new(repo);

    use_case.create(store_input("books@x.com", None)).await.unwrap();

    let err = use_case
        .create(store_input("books@x.com", None))
        .await
        .unwrap_err();
    assert!(matches!(err, RatingsError::StoreEmailTaken));
}

#[tokio::test]
async fn create_store_rejects_missing_fields() {
    let repo = Arc::new(MemStoreRepo::default());

    let mut input = store_input("books@x.com", None);
    input.address = None;

    let err = ManageStoresUseCase::new(repo).create(input).await.unwrap_err();
    assert!(matches!(err, RatingsError::MissingFields));
}

#[tokio::test]
async fn create_store_validates_owner() {
    let repo = Arc::new(
        MemStoreRepo::default()
            .with_user(1, "Not An Owner", false)
            .with_user(2, "Shop Owner", true),
    );
    let use_case = ManageStoresUseCase::new(repo.clone());

    let err = use_case
        .create(store_input("books@x.com", Some(1)))
        .await
        .unwrap_err();
    assert!(matches!(err, RatingsError::InvalidOwner));

    let err = use_case
        .create(store_input("books@x.com", Some(99)))
        .await
        .unwrap_err();
    assert!(matches!(err, RatingsError::InvalidOwner));

    let store_id = use_case
        .create(store_input("books@x.com", Some(2)))
        .await
        .unwrap();
    assert!(store_id > 0);
}

#[tokio::test]
async fn admin_listing_filters_and_orders() {
    let repo = Arc::new(MemStoreRepo::default());
    let use_case = ManageStoresUseCase::new(repo);

    for (name, email) in [
        ("Zenith Goods", "zenith@x.com"),
        ("Corner Books", "corner@x.com"),
        ("Corner Cafe", "cafe@y.com"),
    ] {
        use_case
            .create(CreateStoreInput {
                name: Some(name.to_string()),
                email: Some(email.to_string()),
                address: Some("5 Market Lane".to_string()),
                owner_id: None,
            })
            .await
            .unwrap();
    }

    let all = use_case.list(StoreFilter::default()).await.unwrap();
    let names: Vec<&str> = all.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Corner Books", "Corner Cafe", "Zenith Goods"]);

    let corners = use_case
        .list(StoreFilter {
            name: Some("corner".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(corners.len(), 2);

    let filtered = use_case
        .list(StoreFilter {
            name: Some("corner".to_string()),
            email: Some("X.COM".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].email, "corner@x.com");
}

#[tokio::test]
async fn unrated_store_has_absent_average() {
    let (repo, _store_id) = repo_with_store().await;

    let stores = ManageStoresUseCase::new(repo).catalog().await.unwrap();
    assert_eq!(stores[0].average_rating, None);
}

#[tokio::test]
async fn user_listing_carries_own_rating() {
    let (repo, store_id) = repo_with_store().await;

    SubmitRatingUseCase::new(repo.clone())
        .submit(1, rating_input(store_id, 5.0))
        .await
        .unwrap();

    let stores = ManageStoresUseCase::new(repo.clone())
        .list_for_user(1)
        .await
        .unwrap();
    assert_eq!(stores[0].user_rating, Some(5));

    // A different user sees the average but no own rating
    let stores = ManageStoresUseCase::new(repo).list_for_user(2).await.unwrap();
    assert_eq!(stores[0].user_rating, None);
    assert_eq!(stores[0].average_rating, Some(5.0));
}

// ============================================================================
// Dashboards
// ============================================================================

#[tokio::test]
async fn owner_dashboard_requires_a_store() {
    let repo = Arc::new(MemStoreRepo::default().with_user(7, "Shop Owner", true));

    let err = DashboardUseCase::new(repo)
        .owner_dashboard(7)
        .await
        .unwrap_err();
    assert!(matches!(err, RatingsError::NoStoreForOwner));
}

#[tokio::test]
async fn owner_dashboard_aggregates_ratings() {
    let repo = Arc::new(
        MemStoreRepo::default()
            .with_user(1, "Avery Rater", false)
            .with_user(2, "Blake Rater", false)
            .with_user(7, "Shop Owner", true),
    );

    let store_id = ManageStoresUseCase::new(repo.clone())
        .create(store_input("books@x.com", Some(7)))
        .await
        .unwrap();

    let submit = SubmitRatingUseCase::new(repo.clone());
    submit.submit(1, rating_input(store_id, 3.0)).await.unwrap();
    submit.submit(2, rating_input(store_id, 5.0)).await.unwrap();

    let dashboard = DashboardUseCase::new(repo)
        .owner_dashboard(7)
        .await
        .unwrap();

    assert_eq!(dashboard.store_name, "Corner Books");
    assert_eq!(dashboard.average_rating, Some(4.0));
    assert_eq!(dashboard.ratings.len(), 2);
    assert!(
        dashboard
            .ratings
            .iter()
            .any(|r| r.user_name == "Avery Rater" && r.rating == 3)
    );
}

#[tokio::test]
async fn owner_dashboard_with_no_ratings_reports_absent_average() {
    let repo = Arc::new(MemStoreRepo::default().with_user(7, "Shop Owner", true));

    ManageStoresUseCase::new(repo.clone())
        .create(store_input("books@x.com", Some(7)))
        .await
        .unwrap();

    let dashboard = DashboardUseCase::new(repo)
        .owner_dashboard(7)
        .await
        .unwrap();
    assert_eq!(dashboard.average_rating, None);
    assert!(dashboard.ratings.is_empty());
}

#[tokio::test]
async fn admin_totals_count_tables_independently() {
    let repo = Arc::new(
        MemStoreRepo::default()
            .with_user(1, "Avery Rater", false)
            .with_user(7, "Shop Owner", true),
    );

    let store_id = ManageStoresUseCase::new(repo.clone())
        .create(store_input("books@x.com", Some(7)))
        .await
        .unwrap();

    SubmitRatingUseCase::new(repo.clone())
        .submit(1, rating_input(store_id, 4.0))
        .await
        .unwrap();

    let totals = DashboardUseCase::new(repo).admin_totals().await.unwrap();
    assert_eq!(totals.total_users, 2);
    assert_eq!(totals.total_stores, 1);
    assert_eq!(totals.total_ratings, 1);
}
