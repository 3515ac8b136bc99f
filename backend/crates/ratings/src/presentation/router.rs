//! Ratings Routers
//!
//! Self-guarded routers for each mount point. The authentication and role
//! gates come from the auth crate; every route here requires at least a
//! valid token.

use auth::AuthConfig;
use auth::middleware::{AuthGateState, require_admin, require_auth, require_owner};
use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::infra::postgres::PgStoreRepository;
use crate::presentation::handlers::{self, RatingsAppState};

fn gate(config: AuthConfig) -> AuthGateState {
    AuthGateState {
        config: Arc::new(config),
    }
}

/// GET / catalog router (mounted at /api/stores)
pub fn store_router(repo: PgStoreRepository, config: AuthConfig) -> Router {
    let state = RatingsAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route("/", get(handlers::list_stores::<PgStoreRepository>))
        .route_layer(middleware::from_fn_with_state(gate(config), require_auth))
        .with_state(state)
}

/// Per-user store listing and rating routes (mounted at /api/users)
pub fn user_store_router(repo: PgStoreRepository, config: AuthConfig) -> Router {
    let state = RatingsAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route("/stores", get(handlers::list_user_stores::<PgStoreRepository>))
        .route(
            "/ratings",
            post(handlers::submit_rating::<PgStoreRepository>)
                .put(handlers::update_rating::<PgStoreRepository>),
        )
        .route_layer(middleware::from_fn_with_state(gate(config), require_auth))
        .with_state(state)
}

/// Bare rating submission router (mounted at /api/ratings)
pub fn rating_router(repo: PgStoreRepository, config: AuthConfig) -> Router {
    let state = RatingsAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route("/", post(handlers::submit_rating::<PgStoreRepository>))
        .route_layer(middleware::from_fn_with_state(gate(config), require_auth))
        .with_state(state)
}

/// Admin store management and dashboard (mounted at /api/admin)
pub fn admin_store_router(repo: PgStoreRepository, config: AuthConfig) -> Router {
    let state = RatingsAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route(
            "/stores",
            post(handlers::create_store::<PgStoreRepository>)
                .get(handlers::list_stores_admin::<PgStoreRepository>),
        )
        .route(
            "/dashboard",
            get(handlers::admin_dashboard::<PgStoreRepository>),
        )
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(gate(config), require_auth))
        .with_state(state)
}

/// Owner dashboard (mounted at /api/owner)
pub fn owner_dashboard_router(repo: PgStoreRepository, config: AuthConfig) -> Router {
    let state = RatingsAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route(
            "/dashboard",
            get(handlers::owner_dashboard::<PgStoreRepository>),
        )
        .route_layer(middleware::from_fn(require_owner))
        .route_layer(middleware::from_fn_with_state(gate(config), require_auth))
        .with_state(state)
}
