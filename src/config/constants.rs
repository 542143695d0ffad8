//! Configuration constants.
//!
//! Defaults for the provider endpoint, timeouts, retry behavior and the
//! output files written by the session.

// Provider
/// Base URL of the geolocation provider (ipinfo.io)
pub const DEFAULT_PROVIDER_URL: &str = "https://ipinfo.io";
/// Name of the query parameter carrying the access token
pub const TOKEN_QUERY_PARAM: &str = "token";
/// Per-attempt request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

// Retry strategy
/// Total attempts per fetch (initial attempt + 3 retries)
pub const RETRY_MAX_ATTEMPTS: usize = 4;
/// Delay before the first retry in milliseconds
pub const RETRY_INITIAL_DELAY_MS: u64 = 1000;
/// Factor by which retry delay is multiplied on each attempt
pub const RETRY_FACTOR: u32 = 2;
/// Maximum delay between retries in seconds
pub const RETRY_MAX_DELAY_SECS: u64 = 30;
/// Status codes that trigger a retry
pub const RETRYABLE_STATUS_CODES: [u16; 5] = [429, 500, 502, 503, 504];

// Output files
/// File that saved lookups are appended to
pub const DEFAULT_SAVE_FILE: &str = "geolocation_data.json";
/// File the rendered map is written to
pub const DEFAULT_MAP_FILE: &str = "geolocation_map.html";

// Map options
pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 18;
pub const DEFAULT_ZOOM: u8 = 10;

/// Placeholder shown for fields the provider did not return
pub const NOT_AVAILABLE: &str = "N/A";

// Environment variables
pub const ENV_TOKEN: &str = "IPINFO_TOKEN";
pub const ENV_PROVIDER_URL: &str = "GEOTRACK_PROVIDER_URL";
pub const ENV_TIMEOUT_SECS: &str = "GEOTRACK_TIMEOUT_SECS";
pub const ENV_MAX_ATTEMPTS: &str = "GEOTRACK_MAX_ATTEMPTS";
pub const ENV_SAVE_FILE: &str = "GEOTRACK_SAVE_FILE";
pub const ENV_MAP_FILE: &str = "GEOTRACK_MAP_FILE";
pub const ENV_OPEN_MAP: &str = "GEOTRACK_OPEN_MAP";
pub const ENV_LOG_LEVEL: &str = "GEOTRACK_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "GEOTRACK_LOG_FORMAT";
