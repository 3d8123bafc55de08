//! The transport seam between endpoints and the network.
//!
//! Endpoints never speak HTTP themselves. They hand a [`Connection`], the
//! action keys and a parameter map to a [`Transport`], which fetches the
//! schema document and performs the action. [`HttpTransport`] is the real
//! implementation; tests substitute their own.
//!
//! [`HttpTransport`]: super::HttpTransport

use std::fmt;

use async_trait::async_trait;
use serde_json::{Map, Value};
use url::Url;

use super::document::Document;
use super::errors::TransportError;
use crate::config::AuthToken;
use crate::credentials::HttpHeaders;

/// Parameters of one action: name to JSON value.
pub type Params = Map<String, Value>;

/// Path of the schema document, relative to the API base URL.
pub const SCHEMA_PATH: &str = "schema/";

/// Everything a transport needs to reach the API for one call.
///
/// The `Authorization: Token ...` credential is only sent to the host of
/// the base URL. The extra headers (derived from cloud credentials) are
/// sent with every request.
#[derive(Clone)]
pub struct Connection {
    base_url: Url,
    auth_host: Option<String>,
    authorization: String,
    headers: HttpHeaders,
}

impl Connection {
    /// Creates a connection to the API at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidUrl`] if `base_url` is not an
    /// absolute URL.
    pub fn new(
        base_url: &str,
        token: &AuthToken,
        headers: HttpHeaders,
    ) -> Result<Self, TransportError> {
        let with_slash = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&with_slash).map_err(|e| TransportError::InvalidUrl {
            url: with_slash.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            auth_host: base_url.host_str().map(ToString::to_string),
            authorization: format!("Token {}", token.as_ref()),
            base_url,
            headers,
        })
    }

    /// Returns the base URL, always ending in `/`.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the URL of the schema document.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidUrl`] if the join fails.
    pub fn schema_url(&self) -> Result<Url, TransportError> {
        self.base_url
            .join(SCHEMA_PATH)
            .map_err(|e| TransportError::InvalidUrl {
                url: format!("{}{SCHEMA_PATH}", self.base_url),
                reason: e.to_string(),
            })
    }

    /// Returns the `Authorization` header value for a request to `url`, if
    /// `url` is on the API host.
    #[must_use]
    pub fn authorization_for(&self, url: &Url) -> Option<&str> {
        match (&self.auth_host, url.host_str()) {
            (Some(auth_host), Some(host)) if auth_host == host => Some(&self.authorization),
            _ => None,
        }
    }

    /// Returns the headers sent with every request.
    #[must_use]
    pub const fn headers(&self) -> &HttpHeaders {
        &self.headers
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("base_url", &self.base_url.as_str())
            .field("auth_host", &self.auth_host)
            .field("authorization", &"Token *****")
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Performs schema-driven actions against the CloudLaunch API.
///
/// # Example
///
/// ```rust,ignore
/// use cloudlaunch::clients::{Connection, HttpTransport, Params, Transport};
///
/// let transport = HttpTransport::new()?;
/// let connection = Connection::new("http://localhost:8000/api/v1", &token, Default::default())?;
/// let document = transport.get_document(&connection).await?;
/// let deployments = transport
///     .action(&connection, &document, &["deployments", "list"], Params::new(), true)
///     .await?;
/// ```
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Fetches the schema document from `{base_url}/schema/`.
    async fn get_document(&self, connection: &Connection) -> Result<Document, TransportError>;

    /// Performs the action at `keys` in `document`.
    ///
    /// When `validate` is `false` the parameters are sent without being
    /// checked against the link's declared fields.
    async fn action(
        &self,
        connection: &Connection,
        document: &Document,
        keys: &[&str],
        params: Params,
        validate: bool,
    ) -> Result<Value, TransportError>;
}
