//! Presentation Layer
//!
//! HTTP handlers, DTOs, and routers.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::RatingsAppState;
pub use router::{
    admin_store_router, owner_dashboard_router, rating_router, store_router, user_store_router,
};
