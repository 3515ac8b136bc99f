//! Repository Traits
//!
//! Interfaces for user persistence. Implementation is in the
//! infrastructure layer.

use crate::domain::entity::user::{NewUser, User, UserSummary};
use crate::error::AuthResult;

/// Optional filters for admin user listings. An absent filter imposes no
/// constraint; name/email/address are case-insensitive substring matches,
/// role is an exact match.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub role: Option<kernel::identity::Role>,
}

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user, returning the stored row. Email uniqueness is
    /// enforced by the database; a constraint conflict surfaces as
    /// `AuthError::EmailTaken`.
    async fn insert(&self, user: &NewUser) -> AuthResult<User>;

    /// Find user by email (exact, case-sensitive)
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: i64) -> AuthResult<Option<User>>;

    /// Check if an email is already registered
    async fn exists_by_email(&self, email: &str) -> AuthResult<bool>;

    /// Replace the stored password hash. Returns false when no such user.
    async fn update_password(&self, user_id: i64, password_hash: &str) -> AuthResult<bool>;

    /// List users matching the filter conjunction, ordered by name
    async fn list(&self, filter: &UserFilter) -> AuthResult<Vec<UserSummary>>;

    /// Average rating across the stores owned by this user, one decimal;
    /// None when the owner's stores have no ratings
    async fn owner_average_rating(&self, user_id: i64) -> AuthResult<Option<f64>>;
}
