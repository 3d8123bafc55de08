//! Cloud view.

use crate::credentials::CloudType;
use crate::rest::{Resource, ResourceKind};

/// A cloud configured in CloudLaunch.
#[derive(Clone, Copy, Debug)]
pub struct Cloud<'a>(&'a Resource);

impl<'a> Cloud<'a> {
    /// Views `resource` as a cloud, if it is one.
    #[must_use]
    pub fn new(resource: &'a Resource) -> Option<Self> {
        (resource.kind() == ResourceKind::Cloud).then_some(Self(resource))
    }

    /// Returns the underlying resource.
    #[must_use]
    pub const fn resource(&self) -> &'a Resource {
        self.0
    }

    /// Returns the cloud slug.
    #[must_use]
    pub fn slug(&self) -> Option<&'a str> {
        self.0.get_str("slug")
    }

    /// Returns the cloud name.
    #[must_use]
    pub fn name(&self) -> Option<&'a str> {
        self.0.get_str("name")
    }

    /// Returns the provider tag, for example `aws` or `openstack`.
    #[must_use]
    pub fn cloud_type(&self) -> Option<&'a str> {
        self.0.get_str("cloud_type")
    }

    /// Returns the provider, if the tag is one credentials can be loaded for.
    #[must_use]
    pub fn provider(&self) -> Option<CloudType> {
        self.cloud_type()?.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_provider_parses_cloud_type() {
        let resource = Resource::from_value(
            ResourceKind::Cloud,
            json!({"slug": "jetstream", "name": "Jetstream", "cloud_type": "openstack"}),
        )
        .unwrap();
        let cloud = Cloud::new(&resource).unwrap();
        assert_eq!(cloud.slug(), Some("jetstream"));
        assert_eq!(cloud.provider(), Some(CloudType::OpenStack));
    }

    #[test]
    fn test_unknown_cloud_type_has_no_provider() {
        let resource =
            Resource::from_value(ResourceKind::Cloud, json!({"slug": "x", "cloud_type": "nimbus"}))
                .unwrap();
        let cloud = Cloud::new(&resource).unwrap();
        assert_eq!(cloud.cloud_type(), Some("nimbus"));
        assert_eq!(cloud.provider(), None);
    }
}
