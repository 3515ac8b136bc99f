//! PostgreSQL Repository Implementation

use kernel::error::conversions::is_unique_violation;
use kernel::identity::Role;
use platform::password::HashedPassword;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::entity::user::{NewUser, User, UserSummary};
use crate::domain::repository::{UserFilter, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = "id, name, email, password, address, role, created_at, updated_at";

impl UserRepository for PgUserRepository {
    async fn insert(&self, user: &NewUser) -> AuthResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (name, email, password, address, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, password, address, role, created_at, updated_at
            "#,
        )
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(&user.address)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AuthError::EmailTaken
            } else {
                AuthError::Database(e)
            }
        })?;

        row.into_user()
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_id(&self, user_id: i64) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_email(&self, email: &str) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update_password(&self, user_id: i64, password_hash: &str) -> AuthResult<bool> {
        let updated = sqlx::query(
            "UPDATE users SET password = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(user_id)
        .bind(password_hash)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn list(&self, filter: &UserFilter) -> AuthResult<Vec<UserSummary>> {
        let mut query = QueryBuilder::<Postgres>::new(
            "SELECT id, name, email, address, role FROM users WHERE 1=1",
        );

        if let Some(name) = &filter.name {
            query.push(" AND name ILIKE ");
            query.push_bind(format!("%{}%", name));
        }
        if let Some(email) = &filter.email {
            query.push(" AND email ILIKE ");
            query.push_bind(format!("%{}%", email));
        }
        if let Some(address) = &filter.address {
            query.push(" AND address ILIKE ");
            query.push_bind(format!("%{}%", address));
        }
        if let Some(role) = &filter.role {
            query.push(" AND role = ");
            query.push_bind(role.as_str());
        }

        query.push(" ORDER BY name ASC");

        let rows = query
            .build_query_as::<UserSummaryRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(|r| r.into_summary()).collect()
    }

    async fn owner_average_rating(&self, user_id: i64) -> AuthResult<Option<f64>> {
        let average = sqlx::query_scalar::<_, Option<f64>>(
            r#"
            SELECT ROUND(AVG(r.rating), 1)::float8
            FROM ratings r
            JOIN stores s ON s.id = r.store_id
            WHERE s.owner_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(average)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    password: String,
    address: String,
    role: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let role = parse_role(&self.role)?;

        let password_hash = HashedPassword::from_phc_string(self.password)
            .map_err(|e| AuthError::Internal(format!("Invalid stored password hash: {}", e)))?;

        Ok(User {
            id: self.id,
            name: self.name,
            email: Email::from_db(self.email),
            password_hash,
            address: self.address,
            role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct UserSummaryRow {
    id: i64,
    name: String,
    email: String,
    address: String,
    role: String,
}

impl UserSummaryRow {
    fn into_summary(self) -> AuthResult<UserSummary> {
        Ok(UserSummary {
            id: self.id,
            name: self.name,
            email: self.email,
            address: self.address,
            role: parse_role(&self.role)?,
        })
    }
}

/// The role column carries a CHECK constraint, so a parse failure here
/// means the row predates the constraint or was written out-of-band.
fn parse_role(value: &str) -> AuthResult<Role> {
    value
        .parse::<Role>()
        .map_err(|_| AuthError::Internal(format!("Invalid stored role: {}", value)))
}
