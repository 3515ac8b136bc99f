//! Change Password Use Case
//!
//! Self-service password change. The target user id comes from the
//! authenticated identity, never from the request body, so a caller can
//! only ever change their own password.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Change password input
pub struct ChangePasswordInput {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

/// Change password use case
pub struct ChangePasswordUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> ChangePasswordUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, user_id: i64, input: ChangePasswordInput) -> AuthResult<()> {
        let (current, new) = match (input.current_password, input.new_password) {
            (Some(current), Some(new)) if !current.is_empty() && !new.is_empty() => {
                (current, new)
            }
            _ => return Err(AuthError::MissingFields),
        };

        let user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let current = ClearTextPassword::new(current)
            .map_err(|_| AuthError::CurrentPasswordIncorrect)?;

        if !user.password_hash.verify(&current, self.config.pepper()) {
            return Err(AuthError::CurrentPasswordIncorrect);
        }

        let new = ClearTextPassword::new(new)?;
        let new_hash = new.hash(self.config.pepper())?;

        if !self
            .repo
            .update_password(user.id, new_hash.as_phc_string())
            .await?
        {
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(user_id = user.id, "Password updated");

        Ok(())
    }
}
