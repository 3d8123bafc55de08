//! Resources and endpoints of the CloudLaunch REST API.
//!
//! This module provides the layer between the schema transport and callers:
//!
//! - **[`Resource`]**: A wrapper around one JSON object with explicit field accessors
//! - **[`ResourceKind`]**: Identifier field and nested data mappings per resource type
//! - **[`Endpoint`]**: CRUD actions for one [`Route`], scoped to its ancestors
//! - **[`routes`]**: The static endpoint catalogue
//! - **[`ApiClient`]**: One endpoint per top-level route, sharing configuration
//! - **[`resources`]**: Typed views with computed properties (Deployment, Task, ...)
//!
//! # Overview
//!
//! Every endpoint call fetches the schema document and performs one action.
//! Resources produced by an endpoint remember it, so they can update or
//! delete themselves, and their nested resources are wired to the matching
//! child endpoints.
//!
//! # Example
//!
//! ```rust,ignore
//! use cloudlaunch::{ApiClient, ApiConfig};
//! use cloudlaunch::clients::Params;
//! use cloudlaunch::rest::resources::Deployment;
//!
//! let client = ApiClient::new(
//!     ApiConfig::builder().url("http://localhost:8000/api/v1").token("abc123").build(),
//! )?;
//!
//! let mut resource = client.deployments().get(12, Params::new()).await?;
//! if let Some(deployment) = Deployment::new(&resource) {
//!     println!("{:?}", deployment.public_ip());
//!     deployment.run_health_check().await?;
//! }
//!
//! resource.set("archived", true)?;
//! resource.update(Params::new()).await?;
//! ```
//!
//! # Key Types
//!
//! - [`ResourceError`]: Error types for resource operations
//! - [`ResourceId`]: A numeric id or a slug
//! - [`Field`]: A plain value or nested resources
//! - [`Operation`]: The schema action an endpoint performs

mod client;
mod endpoint;
mod errors;
mod kind;
mod resource;

pub mod resources;
pub mod routes;

// Public exports
pub use client::ApiClient;
pub use endpoint::{ApiContext, Endpoint, ParentUrlKwargs};
pub use errors::ResourceError;
pub use kind::ResourceKind;
pub use resource::{Field, Resource, ResourceId};
pub use routes::{Operation, Route, Subroute};
