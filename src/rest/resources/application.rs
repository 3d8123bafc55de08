//! Application, version and per-cloud config views.

use crate::rest::{Resource, ResourceKind};

use super::Cloud;

/// A launchable application.
#[derive(Clone, Copy, Debug)]
pub struct Application<'a>(&'a Resource);

impl<'a> Application<'a> {
    /// Views `resource` as an application, if it is one.
    #[must_use]
    pub fn new(resource: &'a Resource) -> Option<Self> {
        (resource.kind() == ResourceKind::Application).then_some(Self(resource))
    }

    /// Returns the underlying resource.
    #[must_use]
    pub const fn resource(&self) -> &'a Resource {
        self.0
    }

    /// Returns the application slug.
    #[must_use]
    pub fn slug(&self) -> Option<&'a str> {
        self.0.get_str("slug")
    }

    /// Returns the application name.
    #[must_use]
    pub fn name(&self) -> Option<&'a str> {
        self.0.get_str("name")
    }

    /// Returns the one-line summary.
    #[must_use]
    pub fn summary(&self) -> Option<&'a str> {
        self.0.get_str("summary")
    }

    /// Returns the application versions.
    #[must_use]
    pub fn versions(&self) -> Vec<ApplicationVersion<'a>> {
        self.0
            .nested_list("versions")
            .unwrap_or_default()
            .iter()
            .filter_map(ApplicationVersion::new)
            .collect()
    }
}

/// One version of an application.
#[derive(Clone, Copy, Debug)]
pub struct ApplicationVersion<'a>(&'a Resource);

impl<'a> ApplicationVersion<'a> {
    /// Views `resource` as an application version, if it is one.
    #[must_use]
    pub fn new(resource: &'a Resource) -> Option<Self> {
        (resource.kind() == ResourceKind::ApplicationVersion).then_some(Self(resource))
    }

    /// Returns the underlying resource.
    #[must_use]
    pub const fn resource(&self) -> &'a Resource {
        self.0
    }

    /// Returns the version string.
    #[must_use]
    pub fn version(&self) -> Option<&'a str> {
        self.0.get_str("version")
    }

    /// Returns the per-cloud configurations of this version.
    #[must_use]
    pub fn cloud_config(&self) -> Vec<ApplicationVersionCloudConfig<'a>> {
        let resources = match self.0.nested("cloud_config") {
            Some(single) => std::slice::from_ref(single),
            None => self.0.nested_list("cloud_config").unwrap_or_default(),
        };
        resources
            .iter()
            .filter_map(ApplicationVersionCloudConfig::new)
            .collect()
    }
}

/// Settings of an application version on one cloud.
#[derive(Clone, Copy, Debug)]
pub struct ApplicationVersionCloudConfig<'a>(&'a Resource);

impl<'a> ApplicationVersionCloudConfig<'a> {
    /// Views `resource` as a cloud config, if it is one.
    #[must_use]
    pub fn new(resource: &'a Resource) -> Option<Self> {
        (resource.kind() == ResourceKind::ApplicationVersionCloudConfig).then_some(Self(resource))
    }

    /// Returns the underlying resource.
    #[must_use]
    pub const fn resource(&self) -> &'a Resource {
        self.0
    }

    /// Returns the cloud this config applies to.
    #[must_use]
    pub fn cloud(&self) -> Option<Cloud<'a>> {
        self.0.nested("cloud").and_then(Cloud::new)
    }

    /// Returns the image launched on the cloud.
    #[must_use]
    pub fn image(&self) -> Option<&'a Resource> {
        self.0
            .nested("image")
            .filter(|image| image.kind() == ResourceKind::Image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_versions_and_cloud_configs_are_wrapped() {
        let resource = Resource::from_value(
            ResourceKind::Application,
            json!({
                "slug": "galaxy",
                "versions": [{
                    "id": 1,
                    "version": "19.01",
                    "cloud_config": [{
                        "id": 5,
                        "cloud": {"slug": "aws-us-east", "cloud_type": "aws"},
                        "image": {"id": 9, "image_id": "ami-123"}
                    }]
                }]
            }),
        )
        .unwrap();

        let app = Application::new(&resource).unwrap();
        let versions = app.versions();
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[0].version(), Some("19.01"));

        let configs = versions[0].cloud_config();
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].cloud().unwrap().cloud_type(), Some("aws"));
        assert_eq!(
            configs[0].image().unwrap().get_str("image_id"),
            Some("ami-123")
        );
    }

    #[test]
    fn test_application_without_versions() {
        let resource =
            Resource::from_value(ResourceKind::Application, json!({"slug": "x", "versions": null}))
                .unwrap();
        assert!(Application::new(&resource).unwrap().versions().is_empty());
    }
}
