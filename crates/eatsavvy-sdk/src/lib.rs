//! EatSavvy Rust SDK
//!
//! HTTP client for the EatSavvy restaurant directory and the session type
//! that applies its responses to a [`DirectoryStore`](eatsavvy_store::DirectoryStore).
//!
//! # Example
//!
//! ```no_run
//! use eatsavvy_sdk::{ClientConfig, DirectoryClient, DirectorySession};
//!
//! # async fn run() -> Result<(), eatsavvy_sdk::SdkError> {
//! let client = DirectoryClient::new(ClientConfig::from_env())?;
//! let mut session = DirectorySession::new(client);
//!
//! session.submit_search("pizza").await?;
//! session.store_mut().select_all_visible();
//! session.enrich_selected().await?;
//!
//! println!("{}", session.store().summary());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod clock;
mod config;
mod error;
mod service;
mod session;
pub mod wire;

pub use client::{DirectoryClient, HealthStatus};
pub use clock::{host_utc_offset_minutes, LocalInstant};
pub use config::{ClientConfig, DEFAULT_API_URL};
pub use error::{Result, SdkError};
pub use service::DirectoryService;
pub use session::{DirectorySession, LoadOutcome, LoadTicket};
