//! User Entity

use chrono::{DateTime, Utc};
use kernel::identity::Role;
use platform::password::HashedPassword;

use crate::domain::value_object::email::Email;

/// User entity as persisted.
///
/// Carries the password hash; never serialize this type to clients - the
/// presentation layer projects it into DTOs without sensitive fields.
#[derive(Debug, Clone)]
pub struct User {
    /// Database-generated identifier
    pub id: i64,
    pub name: String,
    /// Unique, stored case-sensitively
    pub email: Email,
    pub password_hash: HashedPassword,
    pub address: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user about to be inserted; the id is assigned by the database.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub password_hash: HashedPassword,
    pub address: String,
    pub role: Role,
}

/// Projection without sensitive fields, used by admin listings.
#[derive(Debug, Clone)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub address: String,
    pub role: Role,
}
