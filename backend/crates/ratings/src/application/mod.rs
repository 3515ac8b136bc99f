//! Application Layer
//!
//! Use cases.

pub mod dashboard;
pub mod ratings;
pub mod stores;

// Re-exports
pub use dashboard::{DashboardUseCase, OwnerDashboard};
pub use ratings::{SubmitRatingInput, SubmitRatingUseCase};
pub use stores::{CreateStoreInput, ManageStoresUseCase};
