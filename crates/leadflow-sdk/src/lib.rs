//! # Leadflow SDK
//!
//! Rust client for the Leadflow REST API: webhook configurations, contacts,
//! and email-verification jobs.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use leadflow_sdk::LeadflowClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = LeadflowClient::builder()
//!         .base_url("http://localhost:5000")
//!         .build()?;
//!
//!     for webhook in client.list_webhooks().await? {
//!         println!("{}", webhook.url);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod models;

pub use client::{LeadflowClient, LeadflowClientBuilder};
pub use error::{LeadflowError, Result};
pub use models::*;

/// SDK version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
