//! Login Use Case
//!
//! Authenticates a user and issues a bearer token.

use std::sync::Arc;

use kernel::identity::Role;
use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login output: the token plus the public user projection
#[derive(Debug)]
pub struct LoginOutput {
    pub token: String,
    pub user_id: i64,
    pub name: String,
    pub role: Role,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let (email, password) = match (input.email, input.password) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                (email, password)
            }
            _ => return Err(AuthError::MissingCredentials),
        };

        // The response never distinguishes unknown email from wrong
        // password; the logs do.
        let user = match self.repo.find_by_email(email.trim()).await? {
            Some(user) => user,
            None => {
                tracing::warn!("Login attempt for unknown email");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let password = ClearTextPassword::new(password)
            .map_err(|_| AuthError::InvalidCredentials)?;

        if !user.password_hash.verify(&password, self.config.pepper()) {
            tracing::warn!(user_id = user.id, "Login attempt with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = TokenService::new(&self.config).issue(user.id, user.role)?;

        tracing::info!(user_id = user.id, "User signed in");

        Ok(LoginOutput {
            token,
            user_id: user.id,
            name: user.name,
            role: user.role,
        })
    }
}
