//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::identity::Identity;
use std::sync::Arc;

use crate::application::admin_users::ManageUsersUseCase;
use crate::application::change_password::{ChangePasswordInput, ChangePasswordUseCase};
use crate::application::config::AuthConfig;
use crate::application::login::{LoginInput, LoginUseCase};
use crate::application::register::{RegisterInput, RegisterUseCase, required};
use crate::domain::repository::{UserFilter, UserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    CreateUserResponse, LoginRequest, LoginResponse, MessageResponse, PublicUser,
    RegisterRequest, UpdatePasswordRequest, UserDetailResponse, UserFilterQuery, UserResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    use_case
        .execute(RegisterInput {
            name: req.name,
            email: req.email,
            password: req.password,
            address: req.address,
            role: req.role,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully",
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        token: output.token,
        user: PublicUser {
            id: output.user_id,
            name: output.name,
            role: output.role,
        },
    }))
}

// ============================================================================
// Change Password (self-service; also mounted under /api/owner)
// ============================================================================

/// PUT /api/auth/update-password, PUT /api/owner/change-password
pub async fn update_password<R>(
    State(state): State<AuthAppState<R>>,
    identity: Identity,
    Json(req): Json<UpdatePasswordRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = ChangePasswordUseCase::new(state.repo.clone(), state.config.clone());

    use_case
        .execute(
            identity.user_id,
            ChangePasswordInput {
                current_password: req.current_password,
                new_password: req.new_password,
            },
        )
        .await?;

    Ok(Json(MessageResponse {
        message: "Password updated successfully",
    }))
}

// ============================================================================
// Admin: user management
// ============================================================================

/// POST /api/admin/users
pub async fn create_user<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    // Unlike self-registration, the admin path requires an explicit role.
    let role = required(req.role)?;

    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(RegisterInput {
            name: req.name,
            email: req.email,
            password: req.password,
            address: req.address,
            role: Some(role),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            message: "User created successfully",
            user_id: output.user_id,
        }),
    ))
}

/// GET /api/admin/users
pub async fn list_users<R>(
    State(state): State<AuthAppState<R>>,
    Query(query): Query<UserFilterQuery>,
) -> AuthResult<Json<Vec<UserResponse>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let role = match query.role.as_deref() {
        None | Some("") => None,
        Some(value) => Some(
            value
                .parse()
                .map_err(|_| AuthError::Validation("Invalid role".to_string()))?,
        ),
    };

    let filter = UserFilter {
        name: query.name.filter(|s| !s.is_empty()),
        email: query.email.filter(|s| !s.is_empty()),
        address: query.address.filter(|s| !s.is_empty()),
        role,
    };

    let use_case = ManageUsersUseCase::new(state.repo.clone());
    let users = use_case.list(filter).await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /api/admin/user/{id}
pub async fn get_user<R>(
    State(state): State<AuthAppState<R>>,
    Path(user_id): Path<i64>,
) -> AuthResult<Json<UserDetailResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = ManageUsersUseCase::new(state.repo.clone());
    let detail = use_case.get(user_id).await?;

    Ok(Json(UserDetailResponse::from(detail)))
}
