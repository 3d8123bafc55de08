//! The top-level API client.

use std::sync::Arc;

use super::endpoint::{ApiContext, Endpoint};
use super::routes::{self, Route};
use crate::clients::{HttpTransport, Transport, TransportError};
use crate::config::{ApiConfig, AuthToken};
use crate::credentials::CloudCredentials;

/// Entry point to the CloudLaunch API.
///
/// One client hands out an endpoint per top-level route. All of them share
/// the client's configuration and transport, so changing the URL, token or
/// cloud credentials on the client affects every later call.
///
/// # Example
///
/// ```rust,ignore
/// use cloudlaunch::{ApiClient, ApiConfig};
/// use cloudlaunch::clients::Params;
///
/// let config = ApiConfig::builder()
///     .url("http://localhost:8000/api/v1")
///     .token("abc123")
///     .build();
/// let client = ApiClient::new(config)?;
///
/// for cloud in client.clouds().list(Params::new()).await? {
///     println!("{}", cloud.get_str("name").unwrap_or_default());
/// }
/// ```
#[derive(Clone, Debug)]
pub struct ApiClient {
    context: Arc<ApiContext>,
}

impl ApiClient {
    /// Creates a client talking HTTP.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Network`] if the HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, TransportError> {
        Ok(Self::with_transport(config, Arc::new(HttpTransport::new()?)))
    }

    /// Creates a client on top of `transport`.
    #[must_use]
    pub fn with_transport(config: ApiConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            context: Arc::new(ApiContext::new(config, transport)),
        }
    }

    /// Returns a copy of the current configuration.
    #[must_use]
    pub fn config(&self) -> ApiConfig {
        self.context.config()
    }

    /// Replaces the API base URL.
    pub fn set_url(&self, url: Option<String>) {
        self.context.update_config(|config| config.set_url(url));
    }

    /// Replaces the auth token.
    pub fn set_token(&self, token: Option<AuthToken>) {
        self.context.update_config(|config| config.set_token(token));
    }

    /// Replaces the cloud credentials sent with each request.
    pub fn set_cloud_credentials(&self, credentials: Option<CloudCredentials>) {
        self.context
            .update_config(|config| config.set_cloud_credentials(credentials));
    }

    /// Returns a top-level endpoint for `route`.
    #[must_use]
    pub fn endpoint(&self, route: &'static Route) -> Endpoint {
        Endpoint::new(route, Arc::clone(&self.context))
    }

    /// Deployments of the user.
    #[must_use]
    pub fn deployments(&self) -> Endpoint {
        self.endpoint(&routes::DEPLOYMENTS)
    }

    /// Launchable applications.
    #[must_use]
    pub fn applications(&self) -> Endpoint {
        self.endpoint(&routes::APPLICATIONS)
    }

    /// The authenticated user.
    #[must_use]
    pub fn users(&self) -> Endpoint {
        self.endpoint(&routes::USERS)
    }

    /// Stored AWS credentials.
    #[must_use]
    pub fn aws_credentials(&self) -> Endpoint {
        self.endpoint(&routes::AWS_CREDENTIALS)
    }

    /// Stored OpenStack credentials.
    #[must_use]
    pub fn openstack_credentials(&self) -> Endpoint {
        self.endpoint(&routes::OPENSTACK_CREDENTIALS)
    }

    /// Stored Azure credentials.
    #[must_use]
    pub fn azure_credentials(&self) -> Endpoint {
        self.endpoint(&routes::AZURE_CREDENTIALS)
    }

    /// Stored GCE credentials.
    #[must_use]
    pub fn gce_credentials(&self) -> Endpoint {
        self.endpoint(&routes::GCE_CREDENTIALS)
    }

    /// Configured clouds.
    #[must_use]
    pub fn clouds(&self) -> Endpoint {
        self.endpoint(&routes::CLOUDS)
    }
}
