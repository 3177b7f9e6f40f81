//! # Pure Array API
//!
//! A small Rust client for the management REST API (version 1.8) of a
//! Pure Storage array.
//!
//! ## Features
//!
//! - Log in with an API token (form-encoded `POST /api/1.8/auth/session`)
//! - Fetch open alerts (`GET /api/1.8/message?open=true&recent=true`)
//! - List volumes and snapshots as `(name, serial)` records
//! - Fail-soft variants that log errors and return `None` or an empty list
//! - Configurable timeout (30s default) and TLS certificate verification
//!   (disabled by default, arrays usually serve self-signed certificates)
//!
//! Every operation logs in on its own session; no session is cached.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pure_array_api::{ArrayClient, ArrayConfig};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ArrayConfig::new("array01.example.com", "api-token")?
//!         .with_timeout(Duration::from_secs(10));
//!     let client = ArrayClient::new(config);
//!
//!     if let Some(alerts) = client.get_alerts().await {
//!         println!("open alerts: {alerts}");
//!     }
//!
//!     for volume in client.volumes().await? {
//!         println!("{} -> {}", volume.name, volume.serial);
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod errors;
mod session;
mod types;

pub use client::ArrayClient;
pub use config::{ArrayConfig, DEFAULT_TIMEOUT};
pub use errors::{ArrayError, Result};
pub use session::ArraySession;
pub use types::{SnapshotRecord, VolumeRecord};
