//! Inbound HTTP API through which a hub calls back into a scraper.
//!
//! The hub uses this API to ask the scraper to check login credentials, to
//! check stored browser data, or to scrape a single CV on demand. The crate
//! provides:
//!
//! - The [`HandlerSet`] trait the scraper implements
//! - Basic-Auth against the API keys of every configured hub
//! - The axum router, with a hook for embedder routes
//! - A background server with a [`GatewayHandle`] to await or stop it
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use scraper_bridge_gateway::{
//!     create_router, spawn_server, BasicCredentials, CredentialSet, GatewayConfig,
//!     GatewayState, NoopHandlers,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials: CredentialSet =
//!     std::iter::once(BasicCredentials::new("key_id", "key")).collect();
//! let config = GatewayConfig::default();
//! let state = GatewayState::new(Arc::new(NoopHandlers), credentials, config.clone());
//!
//! let handle = spawn_server(create_router(state, None), &config).await?;
//! handle.wait().await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod config;
pub mod error;
pub mod handler_set;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use auth::{BasicCredentials, CredentialSet};
pub use config::GatewayConfig;
pub use error::{ApiError, GatewayError};
pub use handler_set::{HandlerError, HandlerResult, HandlerSet, NoopHandlers};
pub use routes::{create_router, RouterHook};
pub use server::{spawn_server, GatewayHandle};
pub use state::GatewayState;
