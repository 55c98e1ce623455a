//! # prime-client
//!
//! A Rust client library for the Cisco Prime Infrastructure REST API.
//!
//! This crate covers the device inventory: listing devices, fetching a
//! device's full record, adding a device through a bulk-import job and
//! deleting a device.
//!
//! ## Features
//!
//! - 🔐 HTTP basic authentication on every request
//! - 📦 Normalized results: every operation resolves to an [`Outcome`]
//! - 🔒 Per-client TLS verification policy
//! - 🔄 Async API built on `reqwest`
//!
//! ## Example
//!
//! ```rust,no_run
//! use prime_client::{ClientConfig, PrimeClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::builder()
//!         .host("prime.example.com")
//!         .username("api-user")
//!         .password_from_env("PRIME_PASSWORD")
//!         .verify_tls(true)
//!         .build()?;
//!
//!     let client = PrimeClient::new(config)?;
//!
//!     let outcome = client.devices().get("10.0.0.5").send().await;
//!     match outcome.into_result() {
//!         Ok(device) => println!("{device:#}"),
//!         Err(failure) => eprintln!("lookup failed: {failure}"),
//!     }
//!
//!     Ok(())
//! }
//! ```

mod api;
mod client;
mod error;
pub mod models;

pub use api::devices::{
    AddDeviceBuilder, DeleteDeviceBuilder, DeviceHandler, GetDeviceBuilder, ListDevicesBuilder,
};
pub use client::{ClientConfig, ClientConfigBuilder, PrimeClient};
pub use error::{PrimeError, PrimeResult, UrlParseError};
pub use models::device::{DeviceId, SnmpVersion};
pub use models::outcome::{ErrorCode, Failure, Outcome};
