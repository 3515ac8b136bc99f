//! Admin User Management Use Case
//!
//! Filtered listing and single-user detail for administrators. Creation
//! goes through [`RegisterUseCase`](crate::application::register) with an
//! explicit role.

use std::sync::Arc;

use crate::domain::entity::user::{User, UserSummary};
use crate::domain::repository::{UserFilter, UserRepository};
use crate::error::{AuthError, AuthResult};

/// Single-user detail; carries the average rating of the user's stores
/// when the user is an owner.
#[derive(Debug)]
pub struct UserDetail {
    pub user: User,
    pub average_rating: Option<f64>,
}

/// Admin user management use case
pub struct ManageUsersUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> ManageUsersUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// List users matching the filter conjunction; an empty result is not
    /// an error.
    pub async fn list(&self, filter: UserFilter) -> AuthResult<Vec<UserSummary>> {
        self.repo.list(&filter).await
    }

    /// Fetch one user; owners additionally get the average rating across
    /// their stores (absent when unrated).
    pub async fn get(&self, user_id: i64) -> AuthResult<UserDetail> {
        let user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let average_rating = if user.role.is_owner() {
            self.repo.owner_average_rating(user.id).await?
        } else {
            None
        };

        Ok(UserDetail {
            user,
            average_rating,
        })
    }
}
