//! The static endpoint catalogue.
//!
//! Each [`Route`] binds a REST path (the schema keys of its actions) to an
//! identifier parameter, an optional parent URL keyword and a resource
//! kind. Nested routes are listed by name in their parent's `subroutes`
//! table, so finding the child endpoint for a resource is a table lookup.
//!
//! # Example
//!
//! ```rust
//! use cloudlaunch::rest::{routes, Operation, ResourceKind};
//!
//! let tasks = routes::DEPLOYMENTS.subroute("tasks").unwrap();
//! assert_eq!(tasks.path, &["deployments", "tasks"]);
//! assert_eq!(tasks.parent_url_kwarg, Some("deployment_pk"));
//! assert_eq!(tasks.resource_kind, ResourceKind::Task);
//! assert_eq!(tasks.keys(Operation::Create), vec!["deployments", "tasks", "create"]);
//! ```

use super::kind::ResourceKind;

/// Actions an endpoint performs, named as in the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Fetch one resource by id.
    Read,
    /// Fetch the first page of resources.
    List,
    /// Create a resource.
    Create,
    /// Replace a resource.
    Update,
    /// Change some fields of a resource.
    PartialUpdate,
    /// Delete a resource.
    Delete,
}

impl Operation {
    /// Returns the schema key of the operation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::List => "list",
            Self::Create => "create",
            Self::Update => "update",
            Self::PartialUpdate => "partial_update",
            Self::Delete => "delete",
        }
    }
}

/// A named child route.
pub type Subroute = (&'static str, &'static Route);

/// A REST path with its routing metadata.
#[derive(Debug, PartialEq, Eq)]
pub struct Route {
    /// Name used in log messages.
    pub name: &'static str,
    /// Schema keys leading to the route's actions.
    pub path: &'static [&'static str],
    /// Parameter carrying the resource identifier.
    pub id_param_name: &'static str,
    /// Parameter naming the parent resource, for nested routes.
    pub parent_url_kwarg: Option<&'static str>,
    /// Kind of the resources the route produces.
    pub resource_kind: ResourceKind,
    /// Child routes by name.
    pub subroutes: &'static [Subroute],
}

impl Route {
    /// Creates a top-level route with an `id` identifier and no subroutes.
    #[must_use]
    pub const fn new(
        name: &'static str,
        path: &'static [&'static str],
        resource_kind: ResourceKind,
    ) -> Self {
        Self {
            name,
            path,
            id_param_name: "id",
            parent_url_kwarg: None,
            resource_kind,
            subroutes: &[],
        }
    }

    /// Sets the identifier parameter name.
    #[must_use]
    pub const fn with_id_param(self, id_param_name: &'static str) -> Self {
        Self {
            id_param_name,
            ..self
        }
    }

    /// Sets the parent URL keyword.
    #[must_use]
    pub const fn with_parent_url_kwarg(self, parent_url_kwarg: &'static str) -> Self {
        Self {
            parent_url_kwarg: Some(parent_url_kwarg),
            ..self
        }
    }

    /// Sets the child routes.
    #[must_use]
    pub const fn with_subroutes(self, subroutes: &'static [Subroute]) -> Self {
        Self { subroutes, ..self }
    }

    /// Returns the child route called `name`.
    #[must_use]
    pub fn subroute(&self, name: &str) -> Option<&'static Self> {
        self.subroutes
            .iter()
            .find(|(subroute, _)| *subroute == name)
            .map(|(_, route)| *route)
    }

    /// Returns the child route producing resources of `kind`.
    #[must_use]
    pub fn subroute_for(&self, kind: ResourceKind) -> Option<&'static Self> {
        self.subroutes
            .iter()
            .find(|(_, route)| route.resource_kind == kind)
            .map(|(_, route)| *route)
    }

    /// Returns the schema keys of `operation` on this route.
    #[must_use]
    pub fn keys(&self, operation: Operation) -> Vec<&'static str> {
        self.path
            .iter()
            .copied()
            .chain(std::iter::once(operation.as_str()))
            .collect()
    }
}

/// Tasks of one deployment.
pub static DEPLOYMENT_TASKS: Route = Route::new(
    "deployment tasks",
    &["deployments", "tasks"],
    ResourceKind::Task,
)
.with_parent_url_kwarg("deployment_pk");

static DEPLOYMENT_SUBROUTES: [Subroute; 1] = [("tasks", &DEPLOYMENT_TASKS)];

/// Deployments of the user.
pub static DEPLOYMENTS: Route = Route::new("deployments", &["deployments"], ResourceKind::Deployment)
    .with_subroutes(&DEPLOYMENT_SUBROUTES);

/// Launchable applications.
pub static APPLICATIONS: Route =
    Route::new("applications", &["applications"], ResourceKind::Application).with_id_param("slug");

/// The authenticated user.
pub static USERS: Route = Route::new("users", &["auth", "user"], ResourceKind::User);

/// Stored AWS credentials.
pub static AWS_CREDENTIALS: Route = Route::new(
    "aws credentials",
    &["auth", "user", "credentials", "aws"],
    ResourceKind::Credentials,
);

/// Stored OpenStack credentials.
pub static OPENSTACK_CREDENTIALS: Route = Route::new(
    "openstack credentials",
    &["auth", "user", "credentials", "openstack"],
    ResourceKind::Credentials,
);

/// Stored Azure credentials.
pub static AZURE_CREDENTIALS: Route = Route::new(
    "azure credentials",
    &["auth", "user", "credentials", "azure"],
    ResourceKind::Credentials,
);

/// Stored GCE credentials.
pub static GCE_CREDENTIALS: Route = Route::new(
    "gce credentials",
    &["auth", "user", "credentials", "gce"],
    ResourceKind::Credentials,
);

/// VM types offered in a zone.
pub static ZONE_VM_TYPES: Route = Route::new(
    "zone vm types",
    &["infrastructure", "clouds", "regions", "zones", "compute", "vm_types"],
    ResourceKind::VmType,
)
.with_parent_url_kwarg("zone_pk");

static ZONE_SUBROUTES: [Subroute; 1] = [("vm_types", &ZONE_VM_TYPES)];

/// Zones of a region.
pub static REGION_ZONES: Route = Route::new(
    "region zones",
    &["infrastructure", "clouds", "regions", "zones"],
    ResourceKind::Zone,
)
.with_id_param("zone_id")
.with_parent_url_kwarg("region_pk")
.with_subroutes(&ZONE_SUBROUTES);

static REGION_SUBROUTES: [Subroute; 1] = [("zones", &REGION_ZONES)];

/// Regions of a cloud.
pub static CLOUD_REGIONS: Route = Route::new(
    "cloud regions",
    &["infrastructure", "clouds", "regions"],
    ResourceKind::Region,
)
.with_id_param("region_id")
.with_parent_url_kwarg("cloud_pk")
.with_subroutes(&REGION_SUBROUTES);

static CLOUD_SUBROUTES: [Subroute; 1] = [("regions", &CLOUD_REGIONS)];

/// Configured clouds.
pub static CLOUDS: Route = Route::new("clouds", &["infrastructure", "clouds"], ResourceKind::Cloud)
    .with_id_param("slug")
    .with_subroutes(&CLOUD_SUBROUTES);
