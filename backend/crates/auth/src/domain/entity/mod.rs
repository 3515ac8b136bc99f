//! Entity Module

pub mod user;

pub use user::{NewUser, User, UserSummary};
