//! API DTOs (Data Transfer Objects)
//!
//! Field casing mirrors the public wire format: password-change and the
//! create responses are camelCase, everything else is snake_case.

use kernel::identity::Role;
use serde::{Deserialize, Serialize};

use crate::application::admin_users::UserDetail;
use crate::domain::entity::user::UserSummary;

// ============================================================================
// Register / Create User
// ============================================================================

/// Register request. Fields are optional so presence can be validated with
/// a 400 rather than a deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub address: Option<String>,
    pub role: Option<String>,
}

/// Plain success envelope
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Admin create-user response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserResponse {
    pub message: &'static str,
    pub user_id: i64,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: PublicUser,
}

/// Public user projection - no sensitive fields
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub name: String,
    pub role: Role,
}

// ============================================================================
// Change Password
// ============================================================================

/// Password change request (self-service and owner variants share it)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

// ============================================================================
// Admin listings
// ============================================================================

/// Query filters for GET /admin/users
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserFilterQuery {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub role: Option<String>,
}

/// One row of the admin user listing
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub address: String,
    pub role: Role,
}

impl From<UserSummary> for UserResponse {
    fn from(user: UserSummary) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            address: user.address,
            role: user.role,
        }
    }
}

/// Admin single-user detail; average_rating appears only for owners
#[derive(Debug, Clone, Serialize)]
pub struct UserDetailResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub address: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
}

impl From<UserDetail> for UserDetailResponse {
    fn from(detail: UserDetail) -> Self {
        Self {
            id: detail.user.id,
            name: detail.user.name,
            email: detail.user.email.into_db(),
            address: detail.user.address,
            role: detail.user.role,
            average_rating: detail.average_rating,
        }
    }
}
