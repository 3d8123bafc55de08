//! Transport error types for the CloudLaunch API client.
//!
//! # Error Handling
//!
//! The transport reports failures without interpreting them:
//!
//! - [`TransportError::Network`]: The request never produced a response
//! - [`TransportError::Response`]: The API answered with a 4xx/5xx status
//! - [`TransportError::Parameters`]: Parameters were rejected before sending
//! - [`TransportError::LinkNotFound`]: The schema has no link for the action
//!
//! There is no retry at this layer.
//!
//! # Example
//!
//! ```rust,ignore
//! use cloudlaunch::clients::TransportError;
//!
//! match client.deployments().get(12, Params::new()).await {
//!     Err(ResourceError::Transport(TransportError::Response { code: 404, .. })) => {
//!         println!("No such deployment");
//!     }
//!     Err(ResourceError::Transport(TransportError::Parameters(e))) => {
//!         for (name, message) in &e.errors {
//!             println!("{name}: {message}");
//!         }
//!     }
//!     other => { /* ... */ }
//! }
//! ```

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

/// Message reported for a required parameter that was not supplied.
pub const REQUIRED_PARAMETER: &str = "This parameter is required.";

/// Message reported for a parameter the link does not declare.
pub const UNKNOWN_PARAMETER: &str = "Unknown parameter.";

/// Parameters that failed validation or could not be encoded.
///
/// Maps each offending parameter name to a message.
///
/// # Example
///
/// ```rust
/// use cloudlaunch::clients::ParameterError;
///
/// let mut error = ParameterError::default();
/// error.insert("name", "This parameter is required.");
///
/// assert_eq!(error.to_string(), "Invalid parameters: name: This parameter is required.");
/// ```
#[derive(Clone, Debug, Default, Error, PartialEq, Eq)]
#[error("Invalid parameters: {}", describe(.errors))]
pub struct ParameterError {
    /// Parameter name to message.
    pub errors: BTreeMap<String, String>,
}

impl ParameterError {
    /// Records a problem with parameter `name`.
    pub fn insert(&mut self, name: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(name.into(), message.into());
    }

    /// Returns `true` if no problems were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Converts into a `Result`, failing if any problem was recorded.
    ///
    /// # Errors
    ///
    /// Returns `self` if it holds at least one problem.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

fn describe(errors: &BTreeMap<String, String>) -> String {
    errors
        .iter()
        .map(|(name, message)| format!("{name}: {message}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors returned by a [`Transport`](super::Transport).
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API returned a 4xx or 5xx status.
    #[error("Request to {url} failed with status {code}: {body}")]
    Response {
        /// The URL the request was sent to.
        url: String,
        /// HTTP status code.
        code: u16,
        /// Decoded response body, or the raw text as a JSON string.
        body: Value,
    },

    /// Parameters failed validation or could not be encoded.
    #[error(transparent)]
    Parameters(#[from] ParameterError),

    /// The schema document has no link at the requested keys.
    #[error("No link found at '{keys}': {reason}")]
    LinkNotFound {
        /// The requested keys, joined with `.`.
        keys: String,
        /// What went wrong during lookup.
        reason: String,
    },

    /// A URL could not be parsed or joined.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL that was rejected.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// The response or schema could not be decoded.
    #[error("Unable to decode API response: {0}")]
    Decode(String),
}

impl TransportError {
    /// Returns the HTTP status code for [`TransportError::Response`].
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response { code, .. } => Some(*code),
            _ => None,
        }
    }
}
