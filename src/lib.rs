//! # CloudLaunch API client
//!
//! A Rust client for the CloudLaunch deployment service, providing a
//! schema-driven transport, routed CRUD endpoints, resource wrappers and the
//! `cloudlaunch` command line tool built on them.
//!
//! ## Overview
//!
//! This crate provides:
//! - Configuration via [`ApiConfig`] and [`ApiConfigBuilder`]
//! - The persisted `~/.cloudlaunch` settings file via [`ConfigStore`]
//! - Cloud provider credentials sent as HTTP headers via [`credentials`]
//! - A Core API schema transport via [`clients`]
//! - Endpoints and resources for deployments, applications and clouds via [`rest`]
//!
//! ## Quick Start
//!
//! ```rust
//! use cloudlaunch::{ApiConfig, ConfigError};
//!
//! let config = ApiConfig::builder()
//!     .url("http://localhost:8000/api/v1")
//!     .token("abc123")
//!     .build();
//! assert!(config.require_auth().is_ok());
//!
//! let unconfigured = ApiConfig::default();
//! assert!(matches!(unconfigured.require_auth(), Err(ConfigError::MissingAuth)));
//! ```
//!
//! ## Making API Calls
//!
//! ```rust,ignore
//! use cloudlaunch::{ApiClient, ApiConfig};
//! use cloudlaunch::clients::Params;
//! use cloudlaunch::credentials::CloudCredentials;
//!
//! let client = ApiClient::new(
//!     ApiConfig::builder().url("http://localhost:8000/api/v1").token("abc123").build(),
//! )?;
//!
//! let cloud = client.clouds().get("aws-us-east-1", Params::new()).await?;
//! client.set_cloud_credentials(CloudCredentials::load_from_environment("aws"));
//!
//! let regions = cloud.subroute("regions").unwrap().list(Params::new()).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No hidden work**: every endpoint call is one schema fetch plus one action
//! - **Soft credential loading**: missing credentials yield `None`, never an error
//! - **Explicit accessors**: resource fields are read and written by name
//! - **Thread-safe**: Clients, endpoints and resources are `Send + Sync`

pub mod clients;
pub mod config;
pub mod credentials;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{ApiConfig, ApiConfigBuilder, ApiUrl, AuthToken, ConfigStore};
pub use error::ConfigError;

pub use clients::{HttpTransport, Transport, TransportError};
pub use credentials::{CloudCredentials, CloudType};
pub use rest::{ApiClient, Endpoint, Resource, ResourceError, ResourceId, ResourceKind};
