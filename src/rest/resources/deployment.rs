//! Deployment and Task views.

use crate::clients::Params;
use crate::rest::{Endpoint, Resource, ResourceError, ResourceKind};

/// Status reported by a task that finished successfully.
pub const TASK_STATUS_SUCCESS: &str = "SUCCESS";

/// Actions a deployment task can perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskAction {
    /// Initial launch of the deployment.
    Launch,
    /// Query the instance state.
    HealthCheck,
    /// Restart the instance.
    Restart,
    /// Delete the instance.
    Delete,
}

impl TaskAction {
    /// Returns the action name used by the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Launch => "LAUNCH",
            Self::HealthCheck => "HEALTH_CHECK",
            Self::Restart => "RESTART",
            Self::Delete => "DELETE",
        }
    }
}

/// A task run against a deployment.
#[derive(Clone, Copy, Debug)]
pub struct Task<'a>(&'a Resource);

impl<'a> Task<'a> {
    /// Views `resource` as a task, if it is one.
    #[must_use]
    pub fn new(resource: &'a Resource) -> Option<Self> {
        (resource.kind() == ResourceKind::Task).then_some(Self(resource))
    }

    /// Returns the underlying resource.
    #[must_use]
    pub const fn resource(&self) -> &'a Resource {
        self.0
    }

    /// Returns the task action, such as `LAUNCH` or `HEALTH_CHECK`.
    #[must_use]
    pub fn action(&self) -> Option<&'a str> {
        self.0.get_str("action")
    }

    /// Returns the task status, such as `PENDING` or `SUCCESS`.
    #[must_use]
    pub fn status(&self) -> Option<&'a str> {
        self.0.get_str("status")
    }

    /// Returns the instance status reported by a successful health check.
    ///
    /// `None` for any other action, for an unfinished or failed health
    /// check, or when the result carries no status.
    #[must_use]
    pub fn instance_status(&self) -> Option<&'a str> {
        if self.action() != Some(TaskAction::HealthCheck.as_str())
            || self.status() != Some(TASK_STATUS_SUCCESS)
        {
            return None;
        }
        self.0
            .value("result")
            .ok()?
            .get("instance_status")?
            .as_str()
    }
}

/// A launched application instance.
#[derive(Clone, Copy, Debug)]
pub struct Deployment<'a>(&'a Resource);

impl<'a> Deployment<'a> {
    /// Views `resource` as a deployment, if it is one.
    #[must_use]
    pub fn new(resource: &'a Resource) -> Option<Self> {
        (resource.kind() == ResourceKind::Deployment).then_some(Self(resource))
    }

    /// Returns the underlying resource.
    #[must_use]
    pub const fn resource(&self) -> &'a Resource {
        self.0
    }

    /// Returns the deployment name.
    #[must_use]
    pub fn name(&self) -> Option<&'a str> {
        self.0.get_str("name")
    }

    /// Returns the task that launched the deployment.
    #[must_use]
    pub fn launch_task(&self) -> Option<Task<'a>> {
        self.0.nested("launch_task").and_then(Task::new)
    }

    /// Returns the most recent task.
    #[must_use]
    pub fn latest_task(&self) -> Option<Task<'a>> {
        self.0.nested("latest_task").and_then(Task::new)
    }

    /// Returns the public IP address reported by the launch task.
    #[must_use]
    pub fn public_ip(&self) -> Option<&'a str> {
        self.launch_task()?
            .resource()
            .value("result")
            .ok()?
            .get("cloudLaunch")?
            .get("publicIP")?
            .as_str()
    }

    /// Returns the tasks endpoint of this deployment.
    #[must_use]
    pub fn tasks(&self) -> Option<Endpoint> {
        self.0.subroute_for(ResourceKind::Task)
    }

    /// Starts a health check task.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NoEndpoint`] if the deployment is detached,
    /// or whatever creating the task fails with.
    pub async fn run_health_check(&self) -> Result<Resource, ResourceError> {
        self.run_task(TaskAction::HealthCheck).await
    }

    /// Starts a restart task.
    ///
    /// # Errors
    ///
    /// Same as [`run_health_check`](Self::run_health_check).
    pub async fn run_restart(&self) -> Result<Resource, ResourceError> {
        self.run_task(TaskAction::Restart).await
    }

    /// Starts a delete task.
    ///
    /// # Errors
    ///
    /// Same as [`run_health_check`](Self::run_health_check).
    pub async fn run_delete(&self) -> Result<Resource, ResourceError> {
        self.run_task(TaskAction::Delete).await
    }

    async fn run_task(&self, action: TaskAction) -> Result<Resource, ResourceError> {
        let tasks = self.tasks().ok_or(ResourceError::NoEndpoint {
            operation: "tasks",
            resource: ResourceKind::Deployment.name(),
        })?;
        tracing::debug!("Running {} on deployment {:?}", action.as_str(), self.0.id());

        let mut params = Params::new();
        params.insert("action".to_string(), action.as_str().into());
        tasks.create(params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn resource(kind: ResourceKind, value: Value) -> Resource {
        Resource::from_value(kind, value).unwrap()
    }

    #[test]
    fn test_instance_status_requires_successful_health_check() {
        let pending = resource(
            ResourceKind::Task,
            json!({"action": "HEALTH_CHECK", "status": "PENDING", "result": {"instance_status": "running"}}),
        );
        assert_eq!(Task::new(&pending).unwrap().instance_status(), None);

        let restart = resource(
            ResourceKind::Task,
            json!({"action": "RESTART", "status": "SUCCESS", "result": {"instance_status": "running"}}),
        );
        assert_eq!(Task::new(&restart).unwrap().instance_status(), None);

        let done = resource(
            ResourceKind::Task,
            json!({"action": "HEALTH_CHECK", "status": "SUCCESS", "result": {"instance_status": "stopped"}}),
        );
        assert_eq!(Task::new(&done).unwrap().instance_status(), Some("stopped"));
    }

    #[test]
    fn test_public_ip_absent_without_cloudlaunch_result() {
        let deployment = resource(
            ResourceKind::Deployment,
            json!({"id": 1, "launch_task": {"action": "LAUNCH", "result": {}}}),
        );
        assert_eq!(Deployment::new(&deployment).unwrap().public_ip(), None);

        let deployment = resource(ResourceKind::Deployment, json!({"id": 1, "launch_task": null}));
        assert_eq!(Deployment::new(&deployment).unwrap().public_ip(), None);
    }

    #[test]
    fn test_view_rejects_other_kinds() {
        let task = resource(ResourceKind::Task, json!({"id": 1}));
        assert!(Deployment::new(&task).is_none());
        assert!(Task::new(&task).is_some());
    }

    #[tokio::test]
    async fn test_detached_deployment_cannot_run_tasks() {
        let deployment = resource(ResourceKind::Deployment, json!({"id": 1}));
        let deployment = Deployment::new(&deployment).unwrap();
        assert!(deployment.tasks().is_none());
        assert!(matches!(
            deployment.run_health_check().await,
            Err(ResourceError::NoEndpoint { operation: "tasks", .. })
        ));
    }
}
