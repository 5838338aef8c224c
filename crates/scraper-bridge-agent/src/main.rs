//! Scraper Bridge Agent - example scraper
//!
//! Starts an agent from the environment, logs the login users the hub hands
//! out and then serves the inbound API until it stops.
//!
//! # Configuration
//!
//! - `RTCV_SERVER` - primary hub URL with credentials (required)
//! - `RTCV_ALTERNATIVE_SERVER` - alternative hub URL with credentials
//! - `SERVER_PORT` - gateway listen address or port (default `:2000`)
//! - `SCRAPER_SLUG` - slug to register (default `example-scraper`)

use std::sync::Arc;

use async_trait::async_trait;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scraper_bridge_agent::{start, AgentOptions};
use scraper_bridge_client::HubError;
use scraper_bridge_core::LoginUser;
use scraper_bridge_gateway::{HandlerResult, HandlerSet};

/// Accepts every user whose password is `test`.
struct ExampleHandlers;

#[async_trait]
impl HandlerSet for ExampleHandlers {
    async fn check_credentials(&self, user: LoginUser) -> HandlerResult<bool> {
        Ok(user.password == "test")
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,scraper_bridge=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let slug = std::env::var("SCRAPER_SLUG").unwrap_or_else(|_| "example-scraper".into());
    let options = AgentOptions::from_env();
    tracing::info!(slug = %slug, options = ?options, "Starting example scraper");

    let agent = start(&slug, Arc::new(ExampleHandlers), options).await?;

    match agent.get_users(false).await {
        Ok(users) => tracing::info!(count = users.len(), "Fetched login users"),
        Err(HubError::DeprecatedEncryption) => {
            tracing::error!("Login users use a deprecated encryption, convert them on the hub");
        }
        Err(err) => tracing::warn!(error = %err, "Failed to fetch login users"),
    }

    agent.wait().await?;
    Ok(())
}
