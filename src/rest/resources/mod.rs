//! Typed views over [`Resource`](super::Resource).
//!
//! A view borrows a resource of one kind and adds the accessors and
//! computed properties that kind supports. Views are zero-cost: they hold a
//! single reference, and the underlying resource stays the source of truth.
//!
//! ```text
//! resources/
//!   mod.rs           <- This file
//!   deployment.rs    <- Deployment, Task
//!   application.rs   <- Application, ApplicationVersion, ApplicationVersionCloudConfig
//!   cloud.rs         <- Cloud
//! ```
//!
//! # Example
//!
//! ```rust
//! use cloudlaunch::rest::resources::Deployment;
//! use cloudlaunch::rest::{Resource, ResourceKind};
//! use serde_json::json;
//!
//! let resource = Resource::from_value(ResourceKind::Deployment, json!({
//!     "id": 7,
//!     "latest_task": {
//!         "action": "HEALTH_CHECK",
//!         "status": "SUCCESS",
//!         "result": {"instance_status": "running"}
//!     },
//!     "launch_task": {
//!         "action": "LAUNCH",
//!         "status": "SUCCESS",
//!         "result": {"cloudLaunch": {"publicIP": "10.0.0.4"}}
//!     }
//! }))
//! .unwrap();
//!
//! let deployment = Deployment::new(&resource).unwrap();
//! assert_eq!(deployment.latest_task().unwrap().instance_status(), Some("running"));
//! assert_eq!(deployment.launch_task().unwrap().instance_status(), None);
//! assert_eq!(deployment.public_ip(), Some("10.0.0.4"));
//! ```

mod application;
mod cloud;
mod deployment;

pub use application::{Application, ApplicationVersion, ApplicationVersionCloudConfig};
pub use cloud::Cloud;
pub use deployment::{Deployment, Task, TaskAction, TASK_STATUS_SUCCESS};
