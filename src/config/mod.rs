//! Configuration types for the CloudLaunch client.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ApiConfig`]: The values every API call needs (base URL, auth token,
//!   optional cloud credentials)
//! - [`ApiConfigBuilder`]: A builder for [`ApiConfig`]
//! - [`ApiUrl`]: A validated API base URL
//! - [`AuthToken`]: An auth token with masked debug output
//! - [`ConfigStore`]: The persisted `~/.cloudlaunch` key/value file used by
//!   the command line client
//!
//! # Example
//!
//! ```rust
//! use cloudlaunch::ApiConfig;
//!
//! let config = ApiConfig::builder()
//!     .url("http://localhost:8000/api/v1")
//!     .token("abc123")
//!     .build();
//!
//! assert_eq!(config.url(), Some("http://localhost:8000/api/v1"));
//! assert!(config.cloud_credentials().is_none());
//! ```

mod newtypes;
mod store;

pub use newtypes::{ApiUrl, AuthToken, API_ROOT};
pub use store::{ConfigStore, EnvLookup, CONFIG_FILE_NAME, SECTION, TOKEN_ENV, URL_ENV};

use crate::credentials::CloudCredentials;
use crate::error::ConfigError;

/// Configuration needed to reach the CloudLaunch API.
///
/// Every field is optional here. The URL and token are checked right before
/// each API call ([`ApiConfig::require_auth`]), so a client can be built
/// first and configured later.
#[derive(Clone, Debug, Default)]
pub struct ApiConfig {
    url: Option<String>,
    token: Option<AuthToken>,
    cloud_credentials: Option<CloudCredentials>,
}

impl ApiConfig {
    /// Creates a new builder for constructing an `ApiConfig`.
    #[must_use]
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::new()
    }

    /// Returns the API base URL, if configured.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Returns the auth token, if configured.
    #[must_use]
    pub const fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    /// Returns the cloud credentials forwarded with each request, if any.
    #[must_use]
    pub const fn cloud_credentials(&self) -> Option<&CloudCredentials> {
        self.cloud_credentials.as_ref()
    }

    /// Replaces the API base URL.
    pub fn set_url(&mut self, url: Option<String>) {
        self.url = url.filter(|url| !url.trim().is_empty());
    }

    /// Replaces the auth token.
    pub fn set_token(&mut self, token: Option<AuthToken>) {
        self.token = token;
    }

    /// Replaces the cloud credentials.
    pub fn set_cloud_credentials(&mut self, credentials: Option<CloudCredentials>) {
        self.cloud_credentials = credentials;
    }

    /// Returns the URL and token, failing if either is missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingAuth`] if the URL or the token is not set.
    pub fn require_auth(&self) -> Result<(&str, &AuthToken), ConfigError> {
        match (self.url(), self.token()) {
            (Some(url), Some(token)) => Ok((url, token)),
            _ => Err(ConfigError::MissingAuth),
        }
    }
}

/// Builder for constructing [`ApiConfig`] instances.
///
/// Empty strings are treated as "not set".
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    url: Option<String>,
    token: Option<String>,
    cloud_credentials: Option<CloudCredentials>,
}

impl ApiConfigBuilder {
    /// Creates a new builder with nothing set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the auth token.
    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the cloud credentials forwarded with each request.
    #[must_use]
    pub fn cloud_credentials(mut self, credentials: CloudCredentials) -> Self {
        self.cloud_credentials = Some(credentials);
        self
    }

    /// Builds the [`ApiConfig`].
    #[must_use]
    pub fn build(self) -> ApiConfig {
        let mut config = ApiConfig {
            url: None,
            token: self.token.and_then(|token| AuthToken::new(token).ok()),
            cloud_credentials: self.cloud_credentials,
        };
        config.set_url(self.url);
        config
    }
}

// Verify ApiConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiConfig>();
};
