//! Transport layer for CloudLaunch API communication.
//!
//! The CloudLaunch API is schema driven: the server publishes a Core API
//! document listing every action, and the client performs an action by
//! naming the keys that lead to its link. This module provides that
//! mechanism. Endpoints in [`crate::rest`] build on top of it.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`Transport`]: The async trait endpoints call into
//! - [`HttpTransport`]: The `reqwest` implementation of [`Transport`]
//! - [`Connection`]: Base URL, token and extra headers for one call
//! - [`Document`] / [`Link`]: The parsed schema
//! - [`HttpRequest`]: A link with its parameters sorted into path, query and body
//! - [`TransportError`]: Everything that can go wrong below the endpoint
//!
//! # Example
//!
//! ```rust,ignore
//! use cloudlaunch::clients::{Connection, HttpTransport, Params, Transport};
//! use cloudlaunch::AuthToken;
//!
//! let token = AuthToken::new("abc123")?;
//! let connection = Connection::new("http://localhost:8000/api/v1", &token, Default::default())?;
//!
//! let transport = HttpTransport::new()?;
//! let document = transport.get_document(&connection).await?;
//!
//! let mut params = Params::new();
//! params.insert("id".to_string(), 12.into());
//! let deployment = transport
//!     .action(&connection, &document, &["deployments", "read"], params, true)
//!     .await?;
//! ```
//!
//! # Retry Behavior
//!
//! None. Every action is one request; failures are returned as-is.

mod document;
mod errors;
mod http_request;
mod http_response;
mod http_transport;
mod transport;

pub use document::{Document, FieldLocation, Link, LinkField, Node, DEFAULT_ENCODING};
pub use errors::{ParameterError, TransportError, REQUIRED_PARAMETER, UNKNOWN_PARAMETER};
pub use http_request::{
    expand_template, validate_parameters, HttpMethod, HttpRequest, RequestBody, URL_ENCODED_FORM,
};
pub use http_response::HttpResponse;
pub use http_transport::{HttpTransport, ACCEPT, CLIENT_VERSION};
pub use transport::{Connection, Params, Transport, SCHEMA_PATH};
