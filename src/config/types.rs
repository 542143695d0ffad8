//! Configuration types.
//!
//! This module defines the logging enums and the `Config` struct, which is
//! loaded from the process environment at startup.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use strum_macros::{Display, EnumString};

use crate::config::constants::*;
use crate::error_handling::ConfigError;
use crate::geo::RetryPolicy;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    Plain,
    Json,
}

/// Application configuration.
///
/// Every field except `token` has a default. Use [`Config::from_env`] in the
/// binary and [`Config::new`] when constructing one programmatically.
///
/// # Examples
///
/// ```no_run
/// use geolocation_tracker::Config;
///
/// let config = Config {
///     provider_url: "http://127.0.0.1:8080".to_string(),
///     max_attempts: 2,
///     ..Config::new("my-token")
/// };
/// ```
#[derive(Clone)]
pub struct Config {
    /// Provider access token (secret, required)
    pub token: String,

    /// Provider base URL
    pub provider_url: String,

    /// Per-attempt timeout in seconds
    pub timeout_seconds: u64,

    /// Total attempts per fetch, including the first one
    pub max_attempts: usize,

    /// File that saved lookups are appended to
    pub save_file: PathBuf,

    /// File the rendered map is written to
    pub map_file: PathBuf,

    /// Open the rendered map in the default browser
    pub open_map: bool,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Config {
    /// Creates a configuration with the given token and defaults everywhere else.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            provider_url: DEFAULT_PROVIDER_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            max_attempts: RETRY_MAX_ATTEMPTS,
            save_file: PathBuf::from(DEFAULT_SAVE_FILE),
            map_file: PathBuf::from(DEFAULT_MAP_FILE),
            open_map: true,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
        }
    }

    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingToken` if `IPINFO_TOKEN` is unset or blank,
    /// and `ConfigError::InvalidValue` if any other variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the configuration through an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let token = get(ENV_TOKEN).ok_or(ConfigError::MissingToken(ENV_TOKEN))?;
        let mut config = Config::new(token);

        if let Some(url) = get(ENV_PROVIDER_URL) {
            config.provider_url = url;
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            config.timeout_seconds = parse_value(ENV_TIMEOUT_SECS, &raw)?;
        }
        if let Some(raw) = get(ENV_MAX_ATTEMPTS) {
            let attempts: usize = parse_value(ENV_MAX_ATTEMPTS, &raw)?;
            if attempts == 0 {
                return Err(ConfigError::InvalidValue {
                    key: ENV_MAX_ATTEMPTS,
                    value: raw,
                });
            }
            config.max_attempts = attempts;
        }
        if let Some(path) = get(ENV_SAVE_FILE) {
            config.save_file = PathBuf::from(path);
        }
        if let Some(path) = get(ENV_MAP_FILE) {
            config.map_file = PathBuf::from(path);
        }
        if let Some(raw) = get(ENV_OPEN_MAP) {
            config.open_map = parse_flag(ENV_OPEN_MAP, &raw)?;
        }
        if let Some(raw) = get(ENV_LOG_LEVEL) {
            config.log_level = parse_value(ENV_LOG_LEVEL, &raw)?;
        }
        if let Some(raw) = get(ENV_LOG_FORMAT) {
            config.log_format = parse_value(ENV_LOG_FORMAT, &raw)?;
        }

        Ok(config)
    }

    /// Per-attempt timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Builds the retry policy used for every fetch of the session.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            ..RetryPolicy::default()
        }
    }
}

// The token is a secret; keep it out of debug output and logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("provider_url", &self.provider_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("max_attempts", &self.max_attempts)
            .field("save_file", &self.save_file)
            .field("map_file", &self.map_file)
            .field("open_map", &self.open_map)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .finish()
    }
}

fn parse_value<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_log_level_parses_case_insensitively() {
        assert_eq!("DEBUG".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("warn".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_log_format_parses() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("Plain".parse::<LogFormat>().unwrap(), LogFormat::Plain);
    }

    #[test]
    fn test_missing_token_fails_fast() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingToken(ENV_TOKEN)));
    }

    #[test]
    fn test_blank_token_is_missing() {
        let err = Config::from_lookup(lookup_from(&[(ENV_TOKEN, "   ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingToken(_)));
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup_from(&[(ENV_TOKEN, "abc")])).unwrap();
        assert_eq!(config.token, "abc");
        assert_eq!(config.provider_url, DEFAULT_PROVIDER_URL);
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.max_attempts, RETRY_MAX_ATTEMPTS);
        assert_eq!(config.save_file, PathBuf::from(DEFAULT_SAVE_FILE));
        assert_eq!(config.map_file, PathBuf::from(DEFAULT_MAP_FILE));
        assert!(config.open_map);
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.log_format, LogFormat::Plain);
    }

    #[test]
    fn test_overrides_applied() {
        let config = Config::from_lookup(lookup_from(&[
            (ENV_TOKEN, "abc"),
            (ENV_PROVIDER_URL, "http://localhost:9000"),
            (ENV_TIMEOUT_SECS, "2"),
            (ENV_MAX_ATTEMPTS, "7"),
            (ENV_SAVE_FILE, "out.json"),
            (ENV_MAP_FILE, "map.html"),
            (ENV_OPEN_MAP, "false"),
            (ENV_LOG_LEVEL, "debug"),
            (ENV_LOG_FORMAT, "json"),
        ]))
        .unwrap();
        assert_eq!(config.provider_url, "http://localhost:9000");
        assert_eq!(config.timeout(), Duration::from_secs(2));
        assert_eq!(config.max_attempts, 7);
        assert_eq!(config.retry_policy().max_attempts, 7);
        assert_eq!(config.save_file, PathBuf::from("out.json"));
        assert_eq!(config.map_file, PathBuf::from("map.html"));
        assert!(!config.open_map);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            (ENV_TOKEN, "abc"),
            (ENV_TIMEOUT_SECS, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: ENV_TIMEOUT_SECS,
                ..
            }
        ));

        let err = Config::from_lookup(lookup_from(&[
            (ENV_TOKEN, "abc"),
            (ENV_MAX_ATTEMPTS, "0"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: ENV_MAX_ATTEMPTS,
                ..
            }
        ));
    }

    #[test]
    fn test_open_map_flag() {
        for (raw, expected) in [("0", false), ("off", false), ("Yes", true), ("TRUE", true)] {
            let config =
                Config::from_lookup(lookup_from(&[(ENV_TOKEN, "abc"), (ENV_OPEN_MAP, raw)]))
                    .unwrap();
            assert_eq!(config.open_map, expected, "value {:?}", raw);
        }

        let err = Config::from_lookup(lookup_from(&[(ENV_TOKEN, "abc"), (ENV_OPEN_MAP, "maybe")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: ENV_OPEN_MAP,
                ..
            }
        ));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = Config::new("super-secret");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
