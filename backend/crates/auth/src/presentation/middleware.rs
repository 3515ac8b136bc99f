//! Auth Middleware
//!
//! The authentication gate (bearer token -> Identity) and the role gates
//! layered on top of it for guarded routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::identity::{Identity, Role};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::error::AuthError;

/// State for the authentication gate
#[derive(Clone)]
pub struct AuthGateState {
    pub config: Arc<AuthConfig>,
}

/// Authentication gate.
///
/// Extracts the bearer token, verifies signature and expiry, and attaches
/// the resolved [`Identity`] to request extensions. Stateless per request.
pub async fn require_auth(
    State(state): State<AuthGateState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let Some(token) = platform::bearer::extract_bearer_token(req.headers()) else {
        return Err(AuthError::MissingToken.into_response());
    };

    let claims = TokenService::new(&state.config)
        .verify(&token)
        .map_err(|e| e.into_response())?;

    req.extensions_mut().insert(claims.identity());

    Ok(next.run(req).await)
}

/// Authorization gate: admin only
pub async fn require_admin(req: Request, next: Next) -> Result<Response, Response> {
    require_role(Role::Admin, req, next).await
}

/// Authorization gate: owner only
pub async fn require_owner(req: Request, next: Next) -> Result<Response, Response> {
    require_role(Role::Owner, req, next).await
}

/// Single-role check against the identity attached by [`require_auth`].
/// Each guarded operation in this system requires exactly one role.
async fn require_role(expected: Role, req: Request, next: Next) -> Result<Response, Response> {
    match req.extensions().get::<Identity>() {
        Some(identity) if identity.role == expected => Ok(next.run(req).await),
        Some(identity) => {
            tracing::warn!(
                user_id = identity.user_id,
                role = %identity.role,
                required = %expected,
                "Role check rejected request"
            );
            Err(AuthError::Forbidden.into_response())
        }
        // require_auth did not run; treat as unauthenticated
        None => Err(AuthError::MissingToken.into_response()),
    }
}
