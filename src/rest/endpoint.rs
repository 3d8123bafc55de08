//! CRUD endpoints over the CloudLaunch transport.
//!
//! An [`Endpoint`] is a [`Route`] bound to a client context plus the
//! identifiers of its ancestors (the "parent URL kwargs"). Every verb
//! fetches the schema document and performs exactly one action; nothing is
//! cached or retried.
//!
//! # Parent URL kwargs
//!
//! A nested endpoint needs the ids of every resource above it. When a child
//! endpoint is created for a resource, it copies the parent's accumulated
//! kwargs and adds `{parent_url_kwarg: parent_id}`. Those kwargs are merged
//! into the parameters of every call, after the caller's parameters.
//!
//! # Example
//!
//! ```rust,ignore
//! use cloudlaunch::{ApiClient, ApiConfig};
//! use cloudlaunch::clients::Params;
//!
//! let client = ApiClient::new(
//!     ApiConfig::builder().url("http://localhost:8000/api/v1").token("abc123").build(),
//! )?;
//!
//! let deployment = client.deployments().get(12, Params::new()).await?;
//! let tasks = deployment.subroute("tasks").unwrap();
//! assert_eq!(tasks.parent_url_kwargs()["deployment_pk"], 12.into());
//! let task_list = tasks.list(Params::new()).await?;
//! ```

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use serde_json::Value;

use super::errors::ResourceError;
use super::kind::ResourceKind;
use super::resource::{Resource, ResourceId};
use super::routes::{Operation, Route};
use crate::clients::{Connection, Params, Transport};
use crate::config::ApiConfig;
use crate::credentials::CloudCredentials;

/// Parent URL keyword to ancestor identifier.
pub type ParentUrlKwargs = BTreeMap<String, ResourceId>;

/// Configuration and transport shared by every endpoint of one client.
///
/// The configuration sits behind a lock so the URL, token and cloud
/// credentials can be swapped between calls.
#[derive(Debug)]
pub struct ApiContext {
    config: RwLock<ApiConfig>,
    transport: Arc<dyn Transport>,
}

impl ApiContext {
    /// Creates a context.
    #[must_use]
    pub fn new(config: ApiConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: RwLock::new(config),
            transport,
        }
    }

    /// Returns a copy of the current configuration.
    #[must_use]
    pub fn config(&self) -> ApiConfig {
        self.read_config().clone()
    }

    /// Changes the configuration in place.
    pub fn update_config(&self, update: impl FnOnce(&mut ApiConfig)) {
        let mut config = self
            .config
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        update(&mut config);
    }

    /// Returns the transport.
    #[must_use]
    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    /// Builds the connection for one call from the current configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Config`] if the URL or token is missing, or
    /// [`ResourceError::Transport`] if the URL cannot be parsed.
    pub fn connection(&self) -> Result<Connection, ResourceError> {
        let config = self.read_config();
        let (url, token) = config.require_auth()?;
        let headers = config
            .cloud_credentials()
            .map(CloudCredentials::to_http_headers)
            .unwrap_or_default();
        Ok(Connection::new(url, token, headers)?)
    }

    fn read_config(&self) -> RwLockReadGuard<'_, ApiConfig> {
        self.config.read().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A CRUD router for one route, scoped to its ancestors.
///
/// Endpoints are cheap to clone. Two endpoints for the same route differ
/// only in their parent URL kwargs.
#[derive(Clone, Debug)]
pub struct Endpoint {
    route: &'static Route,
    context: Arc<ApiContext>,
    parent_url_kwargs: ParentUrlKwargs,
}

impl Endpoint {
    /// Creates a top-level endpoint for `route`.
    #[must_use]
    pub fn new(route: &'static Route, context: Arc<ApiContext>) -> Self {
        Self::with_parent(route, context, None, ParentUrlKwargs::new())
    }

    /// Creates an endpoint nested under the resource `parent_id`.
    ///
    /// `parent_url_kwargs` are the ancestor ids accumulated so far. When
    /// `parent_id` is given it is added under the route's parent URL
    /// keyword; if the route declares none, the id is ignored with a
    /// warning.
    #[must_use]
    pub fn with_parent(
        route: &'static Route,
        context: Arc<ApiContext>,
        parent_id: Option<ResourceId>,
        parent_url_kwargs: ParentUrlKwargs,
    ) -> Self {
        let mut parent_url_kwargs = parent_url_kwargs;
        match (parent_id, route.parent_url_kwarg) {
            (Some(id), Some(kwarg)) => {
                parent_url_kwargs.insert(kwarg.to_string(), id);
            }
            (Some(id), None) => {
                tracing::warn!(
                    "Ignoring parent id {} for {}: the route has no parent URL keyword",
                    id,
                    route.name
                );
            }
            (None, _) => {}
        }

        Self {
            route,
            context,
            parent_url_kwargs,
        }
    }

    /// Returns the route.
    #[must_use]
    pub const fn route(&self) -> &'static Route {
        self.route
    }

    /// Returns the accumulated ancestor identifiers.
    #[must_use]
    pub const fn parent_url_kwargs(&self) -> &ParentUrlKwargs {
        &self.parent_url_kwargs
    }

    /// Returns the shared client context.
    #[must_use]
    pub const fn context(&self) -> &Arc<ApiContext> {
        &self.context
    }

    /// Fetches the resource `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Config`] if the client is not configured,
    /// [`ResourceError::Transport`] if the call fails, or
    /// [`ResourceError::MalformedResponse`] if the response is not an object.
    pub async fn get(
        &self,
        id: impl Into<ResourceId> + Send,
        params: Params,
    ) -> Result<Resource, ResourceError> {
        let params = self.create_params(Some(id.into()), params);
        let item = self.perform(Operation::Read, params, true).await?;
        self.create_response(item)
    }

    /// Lists the resources on the first result page.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get); additionally
    /// [`ResourceError::MalformedResponse`] if `results` is missing.
    pub async fn list(&self, params: Params) -> Result<Vec<Resource>, ResourceError> {
        let params = self.create_params(None, params);
        let items = self.perform(Operation::List, params, true).await?;

        let Value::Object(mut page) = items else {
            return Err(ResourceError::MalformedResponse(format!(
                "{} list response is not an object",
                self.route.name
            )));
        };
        let Some(Value::Array(results)) = page.remove("results") else {
            return Err(ResourceError::MalformedResponse(format!(
                "{} list response has no 'results' list",
                self.route.name
            )));
        };

        results
            .into_iter()
            .map(|item| self.create_response(item))
            .collect()
    }

    /// Creates a resource from `params`.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub async fn create(&self, params: Params) -> Result<Resource, ResourceError> {
        let params = self.create_params(None, params);
        let item = self.perform(Operation::Create, params, true).await?;
        self.create_response(item)
    }

    /// Replaces the resource `id` with `params`.
    ///
    /// Parameters are not validated against the schema: a full update
    /// carries every field of the resource, including read-only ones.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub async fn update(
        &self,
        id: impl Into<ResourceId> + Send,
        params: Params,
    ) -> Result<Resource, ResourceError> {
        let params = self.create_params(Some(id.into()), params);
        let item = self.perform(Operation::Update, params, false).await?;
        self.create_response(item)
    }

    /// Changes the fields in `params` of the resource `id`.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub async fn partial_update(
        &self,
        id: impl Into<ResourceId> + Send,
        params: Params,
    ) -> Result<Resource, ResourceError> {
        let params = self.create_params(Some(id.into()), params);
        let item = self.perform(Operation::PartialUpdate, params, true).await?;
        self.create_response(item)
    }

    /// Deletes the resource `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Config`] if the client is not configured or
    /// [`ResourceError::Transport`] if the call fails.
    pub async fn delete(&self, id: impl Into<ResourceId> + Send) -> Result<(), ResourceError> {
        let params = self.create_params(Some(id.into()), Params::new());
        self.perform(Operation::Delete, params, true).await?;
        Ok(())
    }

    /// Returns the child endpoints of the resource `id`, by name.
    #[must_use]
    pub fn subroutes(&self, id: Option<ResourceId>) -> Vec<(&'static str, Self)> {
        self.route
            .subroutes
            .iter()
            .map(|(name, route)| (*name, self.child(route, id.clone())))
            .collect()
    }

    /// Returns the child endpoint `name` of the resource `id`.
    #[must_use]
    pub fn subroute(&self, name: &str, id: Option<ResourceId>) -> Option<Self> {
        self.route
            .subroute(name)
            .map(|route| self.child(route, id))
    }

    /// Returns the child endpoint producing `kind` for the resource `id`.
    #[must_use]
    pub fn subroute_for(&self, kind: ResourceKind, id: Option<ResourceId>) -> Option<Self> {
        self.route
            .subroute_for(kind)
            .map(|route| self.child(route, id))
    }

    fn child(&self, route: &'static Route, id: Option<ResourceId>) -> Self {
        Self::with_parent(
            route,
            Arc::clone(&self.context),
            id,
            self.parent_url_kwargs.clone(),
        )
    }

    /// Merges the caller's parameters, the identifier and the parent URL
    /// kwargs, in that order of precedence (last wins).
    fn create_params(&self, id: Option<ResourceId>, params: Params) -> Params {
        let mut params = params;
        if let Some(id) = id {
            params.insert(self.route.id_param_name.to_string(), id.to_value());
        }
        for (name, value) in &self.parent_url_kwargs {
            params.insert(name.clone(), value.to_value());
        }
        params
    }

    fn create_response(&self, data: Value) -> Result<Resource, ResourceError> {
        let mut resource = Resource::from_value(self.route.resource_kind, data)?;
        resource.register_update_endpoint(self.clone());
        Ok(resource)
    }

    async fn perform(
        &self,
        operation: Operation,
        params: Params,
        validate: bool,
    ) -> Result<Value, ResourceError> {
        let connection = self.context.connection()?;
        let transport = self.context.transport();
        let document = transport.get_document(&connection).await?;

        let keys = self.route.keys(operation);
        tracing::debug!(
            "Performing '{}' (validate: {}) with parameters {:?}",
            keys.join("."),
            validate,
            params.keys().collect::<Vec<_>>()
        );

        Ok(transport
            .action(&connection, &document, &keys, params, validate)
            .await?)
    }
}

// Verify endpoint types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiContext>();
    assert_send_sync::<Endpoint>();
    assert_send_sync::<Resource>();
};
