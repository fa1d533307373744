//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request errors are rendered by the
//! `auth` and `blog` crates.

mod app;
mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use auth::{MemoryAuthRepository, PgAuthRepository};
use blog::{MemoryPostRepository, PgPostRepository};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blog_api=info,auth=info,blog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    let auth_config = Arc::new(config.auth.clone());

    let app = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await?;

            tracing::info!("Connected to database");

            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            app::build_router(
                Arc::new(PgAuthRepository::new(pool.clone())),
                Arc::new(PgPostRepository::new(pool)),
                auth_config,
                &config.frontend_origins,
            )
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory storage");

            app::build_router(
                Arc::new(MemoryAuthRepository::new()),
                Arc::new(MemoryPostRepository::new()),
                auth_config,
                &config.frontend_origins,
            )
        }
    };

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
