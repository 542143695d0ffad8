//! Error handling.
//!
//! This module provides:
//! - Error type definitions (lookup, input, configuration, initialization)
//! - Categorization of `reqwest` failures
//! - Retry strategy construction
//!
//! Lookup errors are never fatal. Input errors are recovered locally by the
//! session. Only configuration and initialization errors stop the program.

mod categorization;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, get_retry_strategy};
pub use types::{ConfigError, GeoError, GeoErrorKind, InitializationError, InputError};
