//! Auth Routers
//!
//! Routers are self-guarded: each applies the authentication gate and the
//! role gate its routes require, so composing them in the API binary is
//! just nesting.

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthGateState, require_admin, require_auth, require_owner};

/// Create the auth router (register/login/update-password) with the
/// PostgreSQL repository
pub fn auth_router(repo: PgUserRepository, config: AuthConfig) -> Router {
    auth_router_generic(repo, config)
}

/// Create the auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };
    let gate = AuthGateState {
        config: state.config.clone(),
    };

    let protected = Router::new()
        .route("/update-password", put(handlers::update_password::<R>))
        .route_layer(middleware::from_fn_with_state(gate, require_auth));

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .merge(protected)
        .with_state(state)
}

/// Admin user-management router (mounted under /api/admin)
pub fn admin_user_router(repo: PgUserRepository, config: AuthConfig) -> Router {
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };
    let gate = AuthGateState {
        config: state.config.clone(),
    };

    Router::new()
        .route(
            "/users",
            post(handlers::create_user::<PgUserRepository>)
                .get(handlers::list_users::<PgUserRepository>),
        )
        .route("/user/{id}", get(handlers::get_user::<PgUserRepository>))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(gate, require_auth))
        .with_state(state)
}

/// Owner password-change router (mounted under /api/owner)
pub fn owner_password_router(repo: PgUserRepository, config: AuthConfig) -> Router {
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };
    let gate = AuthGateState {
        config: state.config.clone(),
    };

    Router::new()
        .route(
            "/change-password",
            put(handlers::update_password::<PgUserRepository>),
        )
        .route_layer(middleware::from_fn(require_owner))
        .route_layer(middleware::from_fn_with_state(gate, require_auth))
        .with_state(state)
}
