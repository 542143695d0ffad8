//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Errors returned by a geolocation lookup.
///
/// None of these are fatal: the session turns them into a one-line notice
/// and keeps running.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum GeoError {
    /// No response arrived within the per-attempt deadline on the last attempt.
    #[error("Request timed out. Please check your connection.")]
    Timeout,

    /// The provider answered with a non-success status that was either not
    /// retryable or still failing after the last attempt.
    #[error("HTTP error occurred: {status}")]
    HttpError {
        /// HTTP status code of the final response
        status: u16,
    },

    /// Connection-level failure (DNS, TLS, refused connection, broken body stream).
    #[error("Request error: {0}")]
    TransportError(#[source] ReqwestError),

    /// The response body was not the structured record we expect.
    #[error("Malformed response from provider: {0}")]
    MalformedResponse(String),
}

impl GeoError {
    /// Returns the category of this error for logging.
    pub fn kind(&self) -> GeoErrorKind {
        match self {
            GeoError::Timeout => GeoErrorKind::Timeout,
            GeoError::HttpError { .. } => GeoErrorKind::Http,
            GeoError::TransportError(_) => GeoErrorKind::Transport,
            GeoError::MalformedResponse(_) => GeoErrorKind::MalformedResponse,
        }
    }
}

/// Payload-free category of a [`GeoError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum GeoErrorKind {
    Timeout,
    Http,
    Transport,
    MalformedResponse,
}

impl std::fmt::Display for GeoErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl GeoErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeoErrorKind::Timeout => "timeout",
            GeoErrorKind::Http => "http error",
            GeoErrorKind::Transport => "transport error",
            GeoErrorKind::MalformedResponse => "malformed response",
        }
    }
}

/// Invalid interactive input. Always recovered locally by re-prompting or
/// falling back to a default.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// The text was not a number.
    #[error("Invalid input! Please enter a valid number.")]
    NotANumber(String),

    /// The number is not one of the menu entries.
    #[error("Please choose from: [1, 2, 3, 4, 5, 6]")]
    UnknownMenuChoice(i64),
}

/// Startup configuration errors. These are the only fatal errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The access token variable is unset or blank.
    #[error("Missing access token: set the {0} environment variable")]
    MissingToken(&'static str),

    /// A variable is set but does not parse.
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue {
        /// Environment variable name
        key: &'static str,
        /// Offending value
        value: String,
    },
}

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// The provider base URL does not parse or cannot carry a path.
    #[error("Invalid provider URL {url:?}: {reason}")]
    ProviderUrlError {
        /// The configured URL
        url: String,
        /// Why it was rejected
        reason: String,
    },
}
