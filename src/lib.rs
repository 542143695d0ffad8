//! geolocation_tracker library: cached, retrying IP geolocation lookups
//!
//! This library provides a provider client that geolocates IP addresses
//! through ipinfo.io, an in-memory cache of successful lookups, and the
//! interactive session that drives the lookups from a numbered menu.
//!
//! # Example
//!
//! ```no_run
//! use geolocation_tracker::{Config, GeoClient};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::new("your-ipinfo-token");
//! let mut client = GeoClient::new(&config)?;
//!
//! let record = client.fetch(Some("8.8.8.8")).await?;
//! println!("{} is in {}", record.ip(), record.city().unwrap_or("N/A"));
//!
//! // Served from the cache, no network call
//! let again = client.fetch(Some("8.8.8.8")).await?;
//! assert_eq!(record, again);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! Lookups are async and need a Tokio runtime.

pub mod config;
pub mod error_handling;
pub mod geo;
pub mod initialization;
pub mod output;
pub mod session;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{ConfigError, GeoError, InitializationError, InputError};
pub use geo::{Backoff, Coordinates, GeoClient, GeoRecord, RetryPolicy, Target};
pub use session::{Flow, MenuChoice, Session};
