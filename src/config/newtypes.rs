//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around the two values every API
//! call needs: the base URL of the CloudLaunch API and the auth token.

use crate::error::ConfigError;
use std::fmt;
use url::{Position, Url};

/// Path segment every CloudLaunch API base URL must contain.
pub const API_ROOT: &str = "/api/v1";

/// A validated CloudLaunch API base URL.
///
/// The URL must be absolute (scheme and host) and its path must contain
/// [`API_ROOT`]. Anything after the API root is dropped, so pasting the URL
/// of a specific API page still yields the base URL.
///
/// # Example
///
/// ```rust
/// use cloudlaunch::ApiUrl;
///
/// let url = ApiUrl::new("https://launch.example.org/cloudlaunch/api/v1/deployments/").unwrap();
/// assert_eq!(url.as_ref(), "https://launch.example.org/cloudlaunch/api/v1");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiUrl(String);

impl ApiUrl {
    /// Creates a new validated API URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the value is not an absolute
    /// URL, or [`ConfigError::MissingApiRoot`] if its path does not contain
    /// [`API_ROOT`].
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim();

        let parsed = Url::parse(url).map_err(|_| ConfigError::InvalidUrl {
            url: url.to_string(),
        })?;
        if parsed.scheme().is_empty() || parsed.host_str().map_or(true, str::is_empty) {
            return Err(ConfigError::InvalidUrl {
                url: url.to_string(),
            });
        }

        let path = parsed.path();
        let root_end = Self::api_root_end(path).ok_or_else(|| ConfigError::MissingApiRoot {
            url: url.to_string(),
            api_root: API_ROOT,
        })?;

        Ok(Self(format!(
            "{}{}",
            &parsed[..Position::BeforePath],
            &path[..root_end]
        )))
    }

    /// Returns the byte offset just past the first complete `API_ROOT`
    /// segment in `path`.
    fn api_root_end(path: &str) -> Option<usize> {
        path.match_indices(API_ROOT)
            .map(|(start, _)| start + API_ROOT.len())
            .find(|&end| path[end..].is_empty() || path[end..].starts_with('/'))
    }
}

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A CloudLaunch API auth token.
///
/// The `Debug` implementation masks the value, displaying only
/// `AuthToken(*****)`, so tokens do not end up in logs.
///
/// # Example
///
/// ```rust
/// use cloudlaunch::AuthToken;
///
/// let token = AuthToken::new("abc123").unwrap();
/// assert_eq!(token.as_ref(), "abc123");
/// assert_eq!(format!("{:?}", token), "AuthToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Creates a new auth token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AuthToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(*****)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_accepts_base_url() {
        let url = ApiUrl::new("http://localhost:8000/api/v1").unwrap();
        assert_eq!(url.as_ref(), "http://localhost:8000/api/v1");
    }

    #[test]
    fn test_api_url_truncates_after_api_root() {
        let url = ApiUrl::new("https://launch.example.org/cloudlaunch/api/v1/deployments/12/").unwrap();
        assert_eq!(url.as_ref(), "https://launch.example.org/cloudlaunch/api/v1");
    }

    #[test]
    fn test_api_url_drops_query_and_fragment() {
        let url = ApiUrl::new("https://launch.example.org/api/v1/?format=json#top").unwrap();
        assert_eq!(url.as_ref(), "https://launch.example.org/api/v1");
    }

    #[test]
    fn test_api_url_rejects_missing_api_root() {
        let result = ApiUrl::new("https://launch.example.org/cloudlaunch/");
        assert!(matches!(result, Err(ConfigError::MissingApiRoot { .. })));
    }

    #[test]
    fn test_api_url_rejects_partial_segment_match() {
        let result = ApiUrl::new("https://launch.example.org/api/v10");
        assert!(matches!(result, Err(ConfigError::MissingApiRoot { .. })));
    }

    #[test]
    fn test_api_url_rejects_relative_url() {
        let result = ApiUrl::new("launch.example.org/api/v1");
        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn test_auth_token_rejects_empty_string() {
        assert!(matches!(AuthToken::new(""), Err(ConfigError::EmptyToken)));
        assert!(matches!(AuthToken::new("   "), Err(ConfigError::EmptyToken)));
    }

    #[test]
    fn test_auth_token_masks_value_in_debug() {
        let token = AuthToken::new("super-secret-token").unwrap();
        assert_eq!(format!("{token:?}"), "AuthToken(*****)");
    }
}
