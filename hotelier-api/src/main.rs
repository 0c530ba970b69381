use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use hotelier_api::{app, middleware::JwtIdentityVerifier, state::{AppState, AuthConfig}};
use hotelier_core::BookingService;
use hotelier_store::{DbClient, MemoryStore, PgBookingRepository, PgReviewRepository, PgRoomRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hotelier_api=debug,hotelier_core=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = hotelier_store::app_config::Config::load().context("Failed to load config")?;
    tracing::info!("Starting Hotelier API on port {}", config.server.port);

    let mut db = None;
    let service = match config.database.url.as_deref() {
        Some(url) => {
            let client = DbClient::new(url, config.database.max_connections)
                .await
                .context("Failed to connect to Postgres")?;
            client.migrate().await.context("Failed to run migrations")?;

            let service = BookingService::new(
                Arc::new(PgRoomRepository::new(client.pool.clone())),
                Arc::new(PgBookingRepository::new(client.pool.clone())),
                Arc::new(PgReviewRepository::new(client.pool.clone())),
            );
            db = Some(client);
            service
        }
        None => {
            tracing::warn!("No database url configured, using the in-memory store");
            let store = Arc::new(MemoryStore::new());
            BookingService::new(store.clone(), store.clone(), store)
        }
    };

    let app_state = AppState {
        service,
        identity: Arc::new(JwtIdentityVerifier::from_config(&config.identity)),
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            expiration: config.auth.jwt_expiration_seconds,
        },
        business_rules: config.business_rules.clone(),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(client) = db {
        client.close().await;
        tracing::info!("Database pool closed");
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
