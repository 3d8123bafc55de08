//! Error types for resource and endpoint operations.
//!
//! # Error Handling
//!
//! - [`ResourceError::FieldNotFound`]: The field is absent from the resource data
//! - [`ResourceError::NoEndpoint`]: A detached resource was asked to persist itself
//! - [`ResourceError::Config`]: The URL or token is missing at call time
//! - [`ResourceError::Transport`]: Anything the transport reported, unchanged
//!
//! A field that is present but `null` is not an error: reading it yields
//! `Value::Null`.
//!
//! # Example
//!
//! ```rust
//! use cloudlaunch::rest::{Resource, ResourceError, ResourceKind};
//! use serde_json::json;
//!
//! let deployment = Resource::from_value(ResourceKind::Deployment, json!({"id": 1})).unwrap();
//! match deployment.value("name") {
//!     Err(ResourceError::FieldNotFound { resource, field }) => {
//!         assert_eq!(resource, "Deployment");
//!         assert_eq!(field, "name");
//!     }
//!     _ => unreachable!(),
//! }
//! ```

use crate::clients::TransportError;
use crate::error::ConfigError;
use thiserror::Error;

/// Error type for resource and endpoint operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The field does not exist in the resource data.
    #[error("{resource} has no field '{field}'")]
    FieldNotFound {
        /// The kind of the resource.
        resource: &'static str,
        /// The requested field.
        field: String,
    },

    /// The identifier field cannot be changed after construction.
    #[error("The identifier field '{field}' of {resource} cannot be changed")]
    ImmutableIdentifier {
        /// The kind of the resource.
        resource: &'static str,
        /// The identifier field name.
        field: &'static str,
    },

    /// The resource has no attached endpoint to persist through.
    #[error("No endpoint for {operation} of {resource}")]
    NoEndpoint {
        /// The operation that was attempted.
        operation: &'static str,
        /// The kind of the resource.
        resource: &'static str,
    },

    /// The resource data carries no usable identifier.
    #[error("{resource} has no identifier in field '{field}'")]
    MissingIdentifier {
        /// The kind of the resource.
        resource: &'static str,
        /// The identifier field name.
        field: &'static str,
    },

    /// A field holds a value of a different type than requested.
    #[error("Field '{field}' of {resource} has an unexpected type: {reason}")]
    FieldType {
        /// The kind of the resource.
        resource: &'static str,
        /// The requested field.
        field: String,
        /// Conversion failure.
        reason: String,
    },

    /// The API response did not have the expected shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The client is not configured for the call.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The transport failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}
