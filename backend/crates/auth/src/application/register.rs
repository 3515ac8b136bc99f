//! Register Use Case
//!
//! Creates a new user account. Shared by self-registration (role defaults
//! to `user`) and the admin create-user path (role required, checked by
//! the handler).

use std::sync::Arc;

use kernel::identity::Role;
use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::NewUser;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Name length bounds
const NAME_MIN_LENGTH: usize = 3;
const NAME_MAX_LENGTH: usize = 60;

/// Address length bound
const ADDRESS_MAX_LENGTH: usize = 400;

/// Register input
pub struct RegisterInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub address: Option<String>,
    /// Absent or empty means `user`
    pub role: Option<String>,
}

/// Register output
#[derive(Debug)]
pub struct RegisterOutput {
    pub user_id: i64,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> RegisterUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let name = required(input.name)?;
        let email = required(input.email)?;
        let password = required(input.password)?;
        let address = required(input.address)?;

        let name_len = name.chars().count();
        if name_len < NAME_MIN_LENGTH || name_len > NAME_MAX_LENGTH {
            return Err(AuthError::Validation(format!(
                "Name must be between {} and {} characters",
                NAME_MIN_LENGTH, NAME_MAX_LENGTH
            )));
        }

        if address.chars().count() > ADDRESS_MAX_LENGTH {
            return Err(AuthError::Validation(format!(
                "Address must be at most {} characters",
                ADDRESS_MAX_LENGTH
            )));
        }

        let email = Email::new(email)?;

        let role = match input.role.as_deref() {
            None | Some("") => Role::User,
            Some(value) => value
                .parse::<Role>()
                .map_err(|_| AuthError::Validation("Invalid role".to_string()))?,
        };

        // Fast-path duplicate check for a friendly message; the database
        // unique constraint remains the authoritative arbiter under races.
        if self.repo.exists_by_email(email.as_str()).await? {
            return Err(AuthError::EmailTaken);
        }

        let password = ClearTextPassword::new(password)?;
        let password_hash = password.hash(self.config.pepper())?;

        let user = self
            .repo
            .insert(&NewUser {
                name,
                email,
                password_hash,
                address,
                role,
            })
            .await?;

        tracing::info!(
            user_id = user.id,
            role = %user.role,
            "User registered"
        );

        Ok(RegisterOutput { user_id: user.id })
    }
}

/// Presence check mirroring the transport contract: absent and empty are
/// both "missing".
pub(crate) fn required(field: Option<String>) -> AuthResult<String> {
    match field {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AuthError::MissingFields),
    }
}
