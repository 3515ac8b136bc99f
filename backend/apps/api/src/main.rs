//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; application-level errors go through
//! `kernel::error::AppError`.

use auth::{AuthConfig, PgUserRepository};
use axum::{
    Router, http,
    http::{Method, header},
};
use ratings::PgStoreRepository;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,ratings=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../database/migrations").run(&pool).await?;

    tracing::info!("Migrations completed");

    // Auth configuration
    let auth_config = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        // In production, load the token secret from environment
        let secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set in production");

        let token_ttl_secs = env::var("TOKEN_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(24 * 3600);

        AuthConfig {
            token_secret: secret.into_bytes(),
            token_ttl: Duration::from_secs(token_ttl_secs),
            password_pepper: env::var("PASSWORD_PEPPER").ok().map(String::into_bytes),
        }
    };

    let user_repo = PgUserRepository::new(pool.clone());
    let store_repo = PgStoreRepository::new(pool.clone());

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:5173,http://127.0.0.1:5173".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router; every guarded router carries its own gates
    let app = Router::new()
        .nest(
            "/api/auth",
            auth::router::auth_router(user_repo.clone(), auth_config.clone()),
        )
        .nest(
            "/api/admin",
            auth::router::admin_user_router(user_repo.clone(), auth_config.clone()).merge(
                ratings::router::admin_store_router(store_repo.clone(), auth_config.clone()),
            ),
        )
        .nest(
            "/api/owner",
            auth::router::owner_password_router(user_repo.clone(), auth_config.clone()).merge(
                ratings::router::owner_dashboard_router(store_repo.clone(), auth_config.clone()),
            ),
        )
        .nest(
            "/api/stores",
            ratings::router::store_router(store_repo.clone(), auth_config.clone()),
        )
        .nest(
            "/api/users",
            ratings::router::user_store_router(store_repo.clone(), auth_config.clone()),
        )
        .nest(
            "/api/ratings",
            ratings::router::rating_router(store_repo, auth_config),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(5000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
