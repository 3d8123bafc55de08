//! Error types for CloudLaunch client configuration.
//!
//! This module contains the error type used when the API endpoint or auth
//! token is missing or malformed, and when the local configuration store
//! cannot be read or written.
//!
//! # Error Handling
//!
//! Configuration errors are never retried. They surface directly at the call
//! site so the CLI can show them to the user as-is.
//!
//! # Example
//!
//! ```rust
//! use cloudlaunch::{ApiUrl, ConfigError};
//!
//! let result = ApiUrl::new("not a url");
//! assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring access to the CloudLaunch API.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The base URL or the auth token is not configured.
    ///
    /// Checked before every API call, since either value can be changed
    /// between calls.
    #[error("Auth token and url are required.")]
    MissingAuth,

    /// The URL could not be parsed or has no scheme/host.
    #[error("URL '{url}' is not in the required format: scheme://domain.name(:port)/path")]
    InvalidUrl {
        /// The URL that was provided.
        url: String,
    },

    /// The URL path does not contain the API root segment.
    #[error("URL '{url}' must include the API root path '{api_root}' (e.g., https://launch.example.org/cloudlaunch{api_root})")]
    MissingApiRoot {
        /// The URL that was provided.
        url: String,
        /// The API root segment that was expected.
        api_root: &'static str,
    },

    /// Auth token cannot be empty.
    #[error("Auth token cannot be empty. See the CloudLaunch documentation for how to obtain one.")]
    EmptyToken,

    /// The configuration key is not one the store recognises.
    #[error("'{name}' is not a recognized config parameter (expected one of: {expected})")]
    UnknownKey {
        /// The key that was provided.
        name: String,
        /// Comma separated list of valid keys.
        expected: String,
    },

    /// The home directory could not be determined.
    #[error("Unable to determine the home directory for the configuration file")]
    NoHomeDirectory,

    /// The configuration file could not be read or parsed.
    #[error("Unable to read configuration file '{path}': {reason}")]
    Read {
        /// Path of the configuration file.
        path: String,
        /// Underlying failure.
        reason: String,
    },

    /// The configuration file could not be written.
    #[error("Unable to write configuration file '{path}': {source}")]
    Write {
        /// Path of the configuration file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_auth_error_message() {
        let error = ConfigError::MissingAuth;
        assert_eq!(error.to_string(), "Auth token and url are required.");
    }

    #[test]
    fn test_missing_api_root_error_message() {
        let error = ConfigError::MissingApiRoot {
            url: "https://launch.example.org/".to_string(),
            api_root: "/api/v1",
        };
        let message = error.to_string();
        assert!(message.contains("https://launch.example.org/"));
        assert!(message.contains("/api/v1"));
    }

    #[test]
    fn test_unknown_key_error_message() {
        let error = ConfigError::UnknownKey {
            name: "colour".to_string(),
            expected: "url, token".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("colour"));
        assert!(message.contains("url, token"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyToken;
        let _: &dyn std::error::Error = &error;
    }
}
