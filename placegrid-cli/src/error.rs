//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use placegrid::config::ConfigError;
use placegrid::provider::ProviderError;
use placegrid::service::ServiceError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(ConfigError),
    /// Invalid search region bounds
    InvalidBounds(String),
    /// No place types were given
    NoTypes,
    /// No API key available
    MissingApiKey,
    /// Failed to create the HTTP client
    HttpClient(ProviderError),
    /// Search session failed
    Search(ServiceError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::MissingApiKey => {
                eprintln!();
                eprintln!("Provide an API key either way:");
                eprintln!("  1. Pass --api-key <KEY>");
                eprintln!("  2. Set api_key under [provider] in ~/.placegrid/config.ini");
            }
            CliError::InvalidBounds(_) => {
                eprintln!();
                eprintln!("The region is given by its south-west and north-east corners:");
                eprintln!("  --sw-lat 40.48 --sw-lon -74.28 --ne-lat 40.92 --ne-lon -73.68");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::InvalidBounds(msg) => write!(f, "Invalid region bounds: {}", msg),
            CliError::NoTypes => write!(f, "At least one place type is required (--types)"),
            CliError::MissingApiKey => write!(f, "No API key configured"),
            CliError::HttpClient(e) => write!(f, "Failed to create HTTP client: {}", e),
            CliError::Search(e) => write!(f, "Search failed: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::HttpClient(e) => Some(e),
            CliError::Search(e) => Some(e),
            _ => None,
        }
    }
}
