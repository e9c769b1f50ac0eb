use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod state;
mod db;
mod routes;
mod extractors;
mod crypto {
    pub mod jwt;
}

mod models {
    pub mod user;
    pub mod session;
    pub mod feedback;
}

mod repositories {
    pub mod user;
    pub mod feedback;
}

mod services {
    pub mod auth;
    pub mod feedback;
    pub mod provision;
    pub mod export;
}

mod handlers {
    pub mod auth;
    pub mod feedback;
    pub mod health;
}

mod middleware_layer {
    pub mod auth;
}

mod validation {
    pub mod auth;
    pub mod feedback;
}

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("✅ Configuration loaded successfully");

    let state = AppState::new(&config)?;

    db::ensure_schema(&state.db)
        .await
        .context("Failed to prepare the database schema")?;

    match services::provision::ensure_admin(&state.db, &state.config.admin).await {
        Ok(outcome) => {
            tracing::info!("✅ Admin provisioning completed: {:?}", outcome);
        }
        Err(e) => {
            tracing::error!("❌ Failed to provision admin user: {}", e);
            return Err(e.into());
        }
    }

    let app = routes::app(state.clone());

    let addr = state.config.bind_addr;
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("🚀 Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("❌ Failed to listen for shutdown signal: {}", e);
    }
}
