//! Unit tests for the auth crate
//!
//! Use cases run against an in-memory repository implementing
//! `UserRepository`, mirroring the database's email-uniqueness behavior.

use std::sync::{Arc, Mutex};

use kernel::identity::Role;

use crate::application::admin_users::ManageUsersUseCase;
use crate::application::change_password::{ChangePasswordInput, ChangePasswordUseCase};
use crate::application::config::AuthConfig;
use crate::application::login::{LoginInput, LoginUseCase};
use crate::application::register::{RegisterInput, RegisterUseCase};
use crate::application::token::TokenService;
use crate::domain::entity::user::{NewUser, User, UserSummary};
use crate::domain::repository::{UserFilter, UserRepository};
use crate::error::{AuthError, AuthResult};

// ============================================================================
// In-memory repository
// ============================================================================

#[derive(Clone, Default)]
struct MemUserRepo {
    inner: Arc<Mutex<MemState>>,
}

#[derive(Default)]
struct MemState {
    next_id: i64,
    users: Vec<User>,
}

impl MemUserRepo {
    fn stored_hash(&self, user_id: i64) -> Option<String> {
        let state = self.inner.lock().unwrap();
        state
            .users
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| u.password_hash.as_phc_string().to_string())
    }
}

impl UserRepository for MemUserRepo {
    async fn insert(&self, user: &NewUser) -> AuthResult<User> {
        let mut state = self.inner.lock().unwrap();

        // Same behavior as the unique constraint on users.email
        if state.users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }

        state.next_id += 1;
        let now = chrono::Utc::now();
        let stored = User {
            id: state.next_id,
            name: user.name.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            address: user.address.clone(),
            role: user.role,
            created_at: now,
            updated_at: now,
        };
        state.users.push(stored.clone());

        Ok(stored)
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        let state = self.inner.lock().unwrap();
        Ok(state.users.iter().find(|u| u.email.as_str() == email).cloned())
    }

    async fn find_by_id(&self, user_id: i64) -> AuthResult<Option<User>> {
        let state = self.inner.lock().unwrap();
        Ok(state.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> AuthResult<bool> {
        let state = self.inner.lock().unwrap();
        Ok(state.users.iter().any(|u| u.email.as_str() == email))
    }

    async fn update_password(&self, user_id: i64, password_hash: &str) -> AuthResult<bool> {
        let mut state = self.inner.lock().unwrap();
        match state.users.iter_mut().find(|u| u.id == user_id) {
            Some(user) => {
                user.password_hash =
                    platform::password::HashedPassword::from_phc_string(password_hash)
                        .map_err(|e| AuthError::Internal(e.to_string()))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list(&self, filter: &UserFilter) -> AuthResult<Vec<UserSummary>> {
        let state = self.inner.lock().unwrap();
        let matches = |haystack: &str, needle: &Option<String>| match needle {
            Some(n) => haystack.to_lowercase().contains(&n.to_lowercase()),
            None => true,
        };

        let mut users: Vec<UserSummary> = state
            .users
            .iter()
            .filter(|u| {
                matches(&u.name, &filter.name)
                    && matches(u.email.as_str(), &filter.email)
                    && matches(&u.address, &filter.address)
                    && filter.role.map(|r| u.role == r).unwrap_or(true)
            })
            .map(|u| UserSummary {
                id: u.id,
                name: u.name.clone(),
                email: u.email.as_str().to_string(),
                address: u.address.clone(),
                role: u.role,
            })
            .collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(users)
    }

    async fn owner_average_rating(&self, _user_id: i64) -> AuthResult<Option<f64>> {
        Ok(None)
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn setup() -> (Arc<MemUserRepo>, Arc<AuthConfig>) {
    (
        Arc::new(MemUserRepo::default()),
        Arc::new(AuthConfig::with_random_secret()),
    )
}

fn register_input(email: &str, password: &str, role: Option<&str>) -> RegisterInput {
    RegisterInput {
        name: Some("Jordan Example".to_string()),
        email: Some(email.to_string()),
        password: Some(password.to_string()),
        address: Some("12 Sample Street".to_string()),
        role: role.map(str::to_string),
    }
}

// ============================================================================
// Register
// ============================================================================

#[tokio::test]
async fn register_then_login_round_trip() {
    let (repo, config) = setup();

    let registered = RegisterUseCase::new(repo.clone(), config.clone())
        .execute(register_input("a@x.com", "S3cure pass!", None))
        .await
        .unwrap();

    let output = LoginUseCase::new(repo.clone(), config.clone())
        .execute(LoginInput {
            email: Some("a@x.com".to_string()),
            password: Some("S3cure pass!".to_string()),
        })
        .await
        .unwrap();

    // The token decodes back to the same id and role
    let claims = TokenService::new(&config).verify(&output.token).unwrap();
    assert_eq!(claims.sub, registered.user_id);
    assert_eq!(claims.role, Role::User);
    assert_eq!(output.role, Role::User);
}

#[tokio::test]
async fn register_rejects_duplicate_email() {
    let (repo, config) = setup();
    let use_case = RegisterUseCase::new(repo.clone(), config.clone());

    use_case
        .execute(register_input("a@x.com", "S3cure pass!", None))
        .await
        .unwrap();

    let err = use_case
        .execute(register_input("a@x.com", "0ther pass!", None))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::EmailTaken));
}

#[tokio::test]
async fn register_accepts_explicit_role() {
    let (repo, config) = setup();

    let output = RegisterUseCase::new(repo.clone(), config.clone())
        .execute(register_input("o@x.com", "S3cure pass!", Some("owner")))
        .await
        .unwrap();

    let user = repo.find_by_id(output.user_id).await.unwrap().unwrap();
    assert_eq!(user.role, Role::Owner);
}

#[tokio::test]
async fn register_rejects_unknown_role() {
    let (repo, config) = setup();

    let err = RegisterUseCase::new(repo, config)
        .execute(register_input("a@x.com", "S3cure pass!", Some("moderator")))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Validation(_)));
}

#[tokio::test]
async fn register_rejects_missing_fields() {
    let (repo, config) = setup();

    let mut input = register_input("a@x.com", "S3cure pass!", None);
    input.address = None;

    let err = RegisterUseCase::new(repo, config)
        .execute(input)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::MissingFields));
}

#[tokio::test]
async fn register_rejects_short_name_and_bad_email() {
    let (repo, config) = setup();
    let use_case = RegisterUseCase::new(repo, config);

    let mut input = register_input("a@x.com", "S3cure pass!", None);
    input.name = Some("Al".to_string());
    assert!(matches!(
        use_case.execute(input).await.unwrap_err(),
        AuthError::Validation(_)
    ));

    let err = use_case
        .execute(register_input("not-an-email", "S3cure pass!", None))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Validation(_)));
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let (repo, config) = setup();

    RegisterUseCase::new(repo.clone(), config.clone())
        .execute(register_input("a@x.com", "S3cure pass!", None))
        .await
        .unwrap();

    let use_case = LoginUseCase::new(repo, config);

    // Unknown email and wrong password map to the same variant
    let unknown = use_case
        .execute(LoginInput {
            email: Some("nobody@x.com".to_string()),
            password: Some("S3cure pass!".to_string()),
        })
        .await
        .unwrap_err();
    assert!(matches!(unknown, AuthError::InvalidCredentials));

    let wrong = use_case
        .execute(LoginInput {
            email: Some("a@x.com".to_string()),
            password: Some("wrong pass 123".to_string()),
        })
        .await
        .unwrap_err();
    assert!(matches!(wrong, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn login_requires_email_and_password() {
    let (repo, config) = setup();

    let err = LoginUseCase::new(repo, config)
        .execute(LoginInput {
            email: Some("a@x.com".to_string()),
            password: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::MissingCredentials));
}

// ============================================================================
// Change Password
// ============================================================================

#[tokio::test]
async fn change_password_wrong_current_leaves_hash_unchanged() {
    let (repo, config) = setup();

    let registered = RegisterUseCase::new(repo.clone(), config.clone())
        .execute(register_input("a@x.com", "S3cure pass!", None))
        .await
        .unwrap();

    let before = repo.stored_hash(registered.user_id).unwrap();

    let err = ChangePasswordUseCase::new(repo.clone(), config.clone())
        .execute(
            registered.user_id,
            ChangePasswordInput {
                current_password: Some("wrong pass 123".to_string()),
                new_password: Some("Brand new pass!".to_string()),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::CurrentPasswordIncorrect));
    assert_eq!(repo.stored_hash(registered.user_id).unwrap(), before);
}

#[tokio::test]
async fn change_password_then_login_with_new() {
    let (repo, config) = setup();

    let registered = RegisterUseCase::new(repo.clone(), config.clone())
        .execute(register_input("a@x.com", "S3cure pass!", None))
        .await
        .unwrap();

    ChangePasswordUseCase::new(repo.clone(), config.clone())
        .execute(
            registered.user_id,
            ChangePasswordInput {
                current_password: Some("S3cure pass!".to_string()),
                new_password: Some("Brand new pass!".to_string()),
            },
        )
        .await
        .unwrap();

    let output = LoginUseCase::new(repo, config)
        .execute(LoginInput {
            email: Some("a@x.com".to_string()),
            password: Some("Brand new pass!".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(output.user_id, registered.user_id);
}

#[tokio::test]
async fn change_password_unknown_user() {
    let (repo, config) = setup();

    let err = ChangePasswordUseCase::new(repo, config)
        .execute(
            999,
            ChangePasswordInput {
                current_password: Some("whatever pass".to_string()),
                new_password: Some("Brand new pass!".to_string()),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::UserNotFound));
}

// ============================================================================
// Admin user management
// ============================================================================

#[tokio::test]
async fn list_users_applies_filter_conjunction() {
    let (repo, config) = setup();
    let register = RegisterUseCase::new(repo.clone(), config.clone());

    for (email, role) in [
        ("alice@x.com", Some("admin")),
        ("bob@y.com", Some("owner")),
        ("carol@x.com", None),
    ] {
        register
            .execute(register_input(email, "S3cure pass!", role))
            .await
            .unwrap();
    }

    let use_case = ManageUsersUseCase::new(repo);

    let all = use_case.list(UserFilter::default()).await.unwrap();
    assert_eq!(all.len(), 3);

    let owners = use_case
        .list(UserFilter {
            role: Some(Role::Owner),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(owners.len(), 1);
    assert_eq!(owners[0].email, "bob@y.com");

    let filtered = use_case
        .list(UserFilter {
            email: Some("X.COM".to_string()),
            role: Some(Role::Admin),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].email, "alice@x.com");
}

#[tokio::test]
async fn get_user_not_found() {
    let (repo, _config) = setup();

    let err = ManageUsersUseCase::new(repo).get(42).await.unwrap_err();
    assert!(matches!(err, AuthError::UserNotFound));
}
