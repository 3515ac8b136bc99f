//! HTTP Handlers

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::identity::Identity;
use std::sync::Arc;

use crate::application::dashboard::DashboardUseCase;
use crate::application::ratings::{SubmitRatingInput, SubmitRatingUseCase};
use crate::application::stores::{CreateStoreInput, ManageStoresUseCase};
use crate::domain::repository::{RatingOutcome, RatingRepository, StoreFilter, StoreRepository};
use crate::error::RatingsResult;
use crate::presentation::dto::{
    CreateStoreRequest, CreateStoreResponse, DashboardStatsResponse, MessageResponse,
    OwnerDashboardResponse, RatingRequest, StoreFilterQuery, StoreResponse, UserStoreResponse,
};

/// Shared state for store/rating handlers
#[derive(Clone)]
pub struct RatingsAppState<R>
where
    R: StoreRepository + RatingRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

// ============================================================================
// Admin: stores and dashboard
// ============================================================================

/// POST /api/admin/stores
pub async fn create_store<R>(
    State(state): State<RatingsAppState<R>>,
    Json(req): Json<CreateStoreRequest>,
) -> RatingsResult<impl IntoResponse>
where
    R: StoreRepository + RatingRepository + Clone + Send + Sync + 'static,
{
    let use_case = ManageStoresUseCase::new(state.repo.clone());

    let store_id = use_case
        .create(CreateStoreInput {
            name: req.name,
            email: req.email,
            address: req.address,
            owner_id: req.owner_id,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateStoreResponse {
            message: "Store added successfully",
            store_id,
        }),
    ))
}

/// GET /api/admin/stores
pub async fn list_stores_admin<R>(
    State(state): State<RatingsAppState<R>>,
    Query(query): Query<StoreFilterQuery>,
) -> RatingsResult<Json<Vec<StoreResponse>>>
where
    R: StoreRepository + RatingRepository + Clone + Send + Sync + 'static,
{
    let filter = StoreFilter {
        name: query.name.filter(|s| !s.is_empty()),
        email: query.email.filter(|s| !s.is_empty()),
        address: query.address.filter(|s| !s.is_empty()),
    };

    let use_case = ManageStoresUseCase::new(state.repo.clone());
    let stores = use_case.list(filter).await?;

    Ok(Json(stores.into_iter().map(StoreResponse::from).collect()))
}

/// GET /api/admin/dashboard
pub async fn admin_dashboard<R>(
    State(state): State<RatingsAppState<R>>,
) -> RatingsResult<Json<DashboardStatsResponse>>
where
    R: StoreRepository + RatingRepository + Clone + Send + Sync + 'static,
{
    let use_case = DashboardUseCase::new(state.repo.clone());
    let totals = use_case.admin_totals().await?;

    Ok(Json(DashboardStatsResponse::from(totals)))
}

// ============================================================================
// Authenticated: store listings
// ============================================================================

/// GET /api/stores
pub async fn list_stores<R>(
    State(state): State<RatingsAppState<R>>,
) -> RatingsResult<Json<Vec<StoreResponse>>>
where
    R: StoreRepository + RatingRepository + Clone + Send + Sync + 'static,
{
    let use_case = ManageStoresUseCase::new(state.repo.clone());
    let stores = use_case.catalog().await?;

    Ok(Json(stores.into_iter().map(StoreResponse::from).collect()))
}

/// GET /api/users/stores
pub async fn list_user_stores<R>(
    State(state): State<RatingsAppState<R>>,
    identity: Identity,
) -> RatingsResult<Json<Vec<UserStoreResponse>>>
where
    R: StoreRepository + RatingRepository + Clone + Send + Sync + 'static,
{
    let use_case = ManageStoresUseCase::new(state.repo.clone());
    let stores = use_case.list_for_user(identity.user_id).await?;

    Ok(Json(
        stores.into_iter().map(UserStoreResponse::from).collect(),
    ))
}

// ============================================================================
// Ratings
// ============================================================================

/// POST /api/ratings, POST /api/users/ratings (upsert)
pub async fn submit_rating<R>(
    State(state): State<RatingsAppState<R>>,
    identity: Identity,
    Json(req): Json<RatingRequest>,
) -> RatingsResult<impl IntoResponse>
where
    R: StoreRepository + RatingRepository + Clone + Send + Sync + 'static,
{
    let use_case = SubmitRatingUseCase::new(state.repo.clone());

    let outcome = use_case
        .submit(
            identity.user_id,
            SubmitRatingInput {
                store_id: req.store_id,
                rating: req.rating,
            },
        )
        .await?;

    Ok(match outcome {
        RatingOutcome::Created => (
            StatusCode::CREATED,
            Json(MessageResponse {
                message: "Rating submitted successfully",
            }),
        ),
        RatingOutcome::Updated => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Rating updated successfully",
            }),
        ),
    })
}

/// PUT /api/users/ratings (strict update)
pub async fn update_rating<R>(
    State(state): State<RatingsAppState<R>>,
    identity: Identity,
    Json(req): Json<RatingRequest>,
) -> RatingsResult<Json<MessageResponse>>
where
    R: StoreRepository + RatingRepository + Clone + Send + Sync + 'static,
{
    let use_case = SubmitRatingUseCase::new(state.repo.clone());

    use_case
        .update(
            identity.user_id,
            SubmitRatingInput {
                store_id: req.store_id,
                rating: req.rating,
            },
        )
        .await?;

    Ok(Json(MessageResponse {
        message: "Rating updated successfully",
    }))
}

// ============================================================================
// Owner dashboard
// ============================================================================

/// GET /api/owner/dashboard
pub async fn owner_dashboard<R>(
    State(state): State<RatingsAppState<R>>,
    identity: Identity,
) -> RatingsResult<Json<OwnerDashboardResponse>>
where
    R: StoreRepository + RatingRepository + Clone + Send + Sync + 'static,
{
    let use_case = DashboardUseCase::new(state.repo.clone());
    let dashboard = use_case.owner_dashboard(identity.user_id).await?;

    Ok(Json(OwnerDashboardResponse::from(dashboard)))
}
