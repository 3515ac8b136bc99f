//! API DTOs (Data Transfer Objects)
//!
//! Field casing mirrors the public wire format: dashboards and the create
//! response are camelCase, store rows and rating bodies are snake_case.

use serde::{Deserialize, Serialize};

use crate::application::dashboard::OwnerDashboard;
use crate::domain::entities::{DashboardTotals, StoreRating, StoreSummary};

// ============================================================================
// Stores
// ============================================================================

/// Admin create-store request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStoreRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub owner_id: Option<i64>,
}

/// Admin create-store response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoreResponse {
    pub message: &'static str,
    pub store_id: i64,
}

/// Query filters for GET /admin/stores
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreFilterQuery {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// One row of the catalog and admin listings. `average_rating` is null
/// for unrated stores.
#[derive(Debug, Clone, Serialize)]
pub struct StoreResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub address: String,
    pub average_rating: Option<f64>,
}

impl From<StoreSummary> for StoreResponse {
    fn from(store: StoreSummary) -> Self {
        Self {
            id: store.id,
            name: store.name,
            email: store.email,
            address: store.address,
            average_rating: store.average_rating,
        }
    }
}

/// One row of the per-user listing; `user_rating` is null when the caller
/// has not rated the store.
#[derive(Debug, Clone, Serialize)]
pub struct UserStoreResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub address: String,
    pub average_rating: Option<f64>,
    pub user_rating: Option<i32>,
}

impl From<StoreSummary> for UserStoreResponse {
    fn from(store: StoreSummary) -> Self {
        Self {
            id: store.id,
            name: store.name,
            email: store.email,
            address: store.address,
            average_rating: store.average_rating,
            user_rating: store.user_rating,
        }
    }
}

// ============================================================================
// Ratings
// ============================================================================

/// Rating submission body (POST and PUT share it)
#[derive(Debug, Clone, Deserialize)]
pub struct RatingRequest {
    pub store_id: Option<i64>,
    pub rating: Option<f64>,
}

/// Plain success envelope
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// ============================================================================
// Dashboards
// ============================================================================

/// Admin dashboard stats
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsResponse {
    pub total_users: i64,
    pub total_stores: i64,
    pub total_ratings: i64,
}

impl From<DashboardTotals> for DashboardStatsResponse {
    fn from(totals: DashboardTotals) -> Self {
        Self {
            total_users: totals.total_users,
            total_stores: totals.total_stores,
            total_ratings: totals.total_ratings,
        }
    }
}

/// Owner dashboard response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerDashboardResponse {
    pub store_name: String,
    pub average_rating: Option<f64>,
    pub ratings: Vec<OwnerRatingEntry>,
}

/// One rating with its rater, as shown to the owner
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerRatingEntry {
    pub rating: i32,
    pub user_id: i64,
    pub user_name: String,
}

impl From<StoreRating> for OwnerRatingEntry {
    fn from(rating: StoreRating) -> Self {
        Self {
            rating: rating.rating,
            user_id: rating.user_id,
            user_name: rating.user_name,
        }
    }
}

impl From<OwnerDashboard> for OwnerDashboardResponse {
    fn from(dashboard: OwnerDashboard) -> Self {
        Self {
            store_name: dashboard.store_name,
            average_rating: dashboard.average_rating,
            ratings: dashboard
                .ratings
                .into_iter()
                .map(OwnerRatingEntry::from)
                .collect(),
        }
    }
}
