//! HTTP transport for CloudLaunch API communication.
//!
//! This module provides [`HttpTransport`], the [`Transport`] that talks to a
//! real CloudLaunch server over HTTP with `reqwest`.

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use super::document::Document;
use super::errors::TransportError;
use super::http_request::{HttpMethod, HttpRequest, RequestBody};
use super::http_response::HttpResponse;
use super::transport::{Connection, Params, Transport};

/// Client version from Cargo.toml.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Media types accepted from the API, schema format first.
pub const ACCEPT: &str = "application/coreapi+json, application/vnd.coreapi+json, application/json";

/// HTTP transport for the CloudLaunch API.
///
/// The transport handles:
/// - Fetching and decoding the schema document
/// - Turning link + parameters into a request
/// - Host-scoped `Authorization` and per-connection credential headers
/// - Decoding the JSON response, with 4xx/5xx becoming errors
///
/// Requests are sent once. There is no retry.
///
/// # Thread Safety
///
/// `HttpTransport` is `Send + Sync` and cheap to clone; clones share the
/// underlying connection pool.
///
/// # Example
///
/// ```rust,ignore
/// use cloudlaunch::clients::{Connection, HttpTransport, Params, Transport};
///
/// let transport = HttpTransport::new()?;
/// let document = transport.get_document(&connection).await?;
/// let clouds = transport
///     .action(&connection, &document, &["infrastructure", "clouds", "list"], Params::new(), true)
///     .await?;
/// ```
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
}

// Verify HttpTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpTransport>();
};

impl HttpTransport {
    /// Creates a transport with a fresh `reqwest` client.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Network`] if the client cannot be built
    /// (for example if TLS initialization fails).
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(format!("cloudlaunch-cli/{CLIENT_VERSION}"))
            .build()?;
        Ok(Self { client })
    }

    /// Creates a transport around an existing `reqwest` client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn send(
        &self,
        connection: &Connection,
        request: HttpRequest,
    ) -> Result<HttpResponse, TransportError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self
            .client
            .request(method, request.url.clone())
            .header(reqwest::header::ACCEPT, ACCEPT);

        if let Some(authorization) = connection.authorization_for(&request.url) {
            builder = builder.header(reqwest::header::AUTHORIZATION, authorization);
        }
        for (name, value) in connection.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        builder = match &request.body {
            Some(RequestBody::Json(body)) => builder.json(body),
            Some(RequestBody::Form(pairs)) => builder.form(pairs),
            None => builder,
        };

        let res = builder.send().await?;
        let code = res.status().as_u16();
        let text = res.text().await?;

        HttpResponse::from_text(code, &text)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_document(&self, connection: &Connection) -> Result<Document, TransportError> {
        let url = connection.schema_url()?;
        tracing::debug!("Fetching schema document from {}", url);

        let request = HttpRequest {
            method: HttpMethod::Get,
            url: url.clone(),
            query: Vec::new(),
            body: None,
        };
        let body = self.send(connection, request).await?.into_result(url.as_str())?;

        let mut document = Document::from_value(&body)?;
        document.set_url_if_missing(url.as_str());
        Ok(document)
    }

    async fn action(
        &self,
        connection: &Connection,
        document: &Document,
        keys: &[&str],
        params: Params,
        validate: bool,
    ) -> Result<Value, TransportError> {
        let link = document.lookup_link(keys)?;

        let base = match document.url() {
            Some(url) => Url::parse(url).map_err(|e| TransportError::InvalidUrl {
                url: url.to_string(),
                reason: e.to_string(),
            })?,
            None => connection.base_url().clone(),
        };
        let request = HttpRequest::from_link(&base, link, &params, validate)?;

        tracing::debug!(
            "{} {} for action '{}'",
            request.method,
            request.url,
            keys.join(".")
        );

        let url = request.url.to_string();
        self.send(connection, request).await?.into_result(&url)
    }
}
