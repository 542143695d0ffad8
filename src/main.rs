//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `geolocation_tracker` library that handles:
//! - Environment variable loading (.env file)
//! - Configuration and logger initialization
//! - Running the interactive session
//!
//! All core functionality is implemented in the library crate.

use std::process;

use anyhow::{Context, Result};

use geolocation_tracker::initialization::init_logger_with;
use geolocation_tracker::{Config, Session};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists), so IPINFO_TOKEN
    // can live there. Try the current directory first, then the executable's directory
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    // Misconfiguration is the only fatal error; fail before entering the menu loop
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("geolocation_tracker error: {}", e);
            process::exit(1);
        }
    };

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;
    log::debug!("Loaded configuration: {:?}", config);

    let mut session = match Session::from_config(&config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("geolocation_tracker error: {}", e);
            process::exit(1);
        }
    };

    session.run().await;
    Ok(())
}
