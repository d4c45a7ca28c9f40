//! Common library for the TikTok lookup services
//!
//! This crate provides shared functionality used across the services in the
//! workspace: the browser-like outbound HTTP client and its error type.
//!
//! ```rust,no_run
//! use common::http::{HttpConfig, init_client};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = HttpConfig::from_env()?;
//!     let client = init_client(&config)?;
//!     let body = client.get("https://www.tiktok.com/").send().await?.text().await?;
//!     println!("Fetched {} bytes", body.len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod http;
