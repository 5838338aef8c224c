//! Scraper agent for the recruitment hub.
//!
//! A scraper embeds this crate to talk to its hub. [`start`] validates the
//! configured hub credentials, makes sure the hub is reachable, registers the
//! scraper's slug and serves the inbound API the hub calls back into. The
//! returned [`AgentHandle`] submits CVs and login reports, copying them to an
//! alternative hub when one is configured.
//!
//! # Architecture
//!
//! ```text
//!                 ┌──────────────────────────┐
//!                 │         Scraper          │
//!                 └──────────────────────────┘
//!                    │                    ▲
//!        AgentHandle │                    │ HandlerSet
//!                    ▼                    │
//! ┌───────────────────────────┐  ┌───────────────────────────┐
//! │  HubClient (primary)      │  │  Gateway (Basic-Auth)     │
//! │  HubClient (alternative)  │  │  /health /cv /check-...   │
//! └───────────────────────────┘  └───────────────────────────┘
//!                    │                    ▲
//!                    ▼                    │
//!                 ┌──────────────────────────┐
//!                 │   Primary / alt. hubs    │
//!                 └──────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use scraper_bridge_agent::{start, AgentOptions};
//! use scraper_bridge_core::Cv;
//! use scraper_bridge_gateway::NoopHandlers;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let agent = start("my-scraper", Arc::new(NoopHandlers), AgentOptions::from_env()).await?;
//!
//! agent.send_cv(&Cv::with_reference("ref-1")).await?;
//! agent.wait().await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod agent;
pub mod error;
pub mod options;

pub use agent::{start, AgentHandle};
pub use error::{BootstrapError, Result};
pub use options::AgentOptions;
