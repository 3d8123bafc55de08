//! Resource kinds and their static declarations.
//!
//! Every resource returned by the API has a [`ResourceKind`]. The kind
//! decides which field identifies the resource and which fields hold nested
//! resources that get wrapped on construction.

use std::fmt;

/// The type of a CloudLaunch resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// A launched application instance.
    Deployment,
    /// An action run against a deployment.
    Task,
    /// A launchable application.
    Application,
    /// One version of an application.
    ApplicationVersion,
    /// Per-cloud settings of an application version.
    ApplicationVersionCloudConfig,
    /// A configured cloud.
    Cloud,
    /// A machine image.
    Image,
    /// A region of a cloud.
    Region,
    /// A zone of a region.
    Zone,
    /// A VM type offered in a zone.
    VmType,
    /// The authenticated user.
    User,
    /// Stored cloud credentials of the user.
    Credentials,
    /// Anything else.
    Generic,
}

impl ResourceKind {
    /// Returns the name of the field that identifies resources of this kind.
    #[must_use]
    pub const fn id_field(&self) -> &'static str {
        match self {
            Self::Application | Self::Cloud => "slug",
            Self::Region => "region_id",
            Self::Zone => "zone_id",
            _ => "id",
        }
    }

    /// Returns the fields whose values are wrapped into nested resources.
    #[must_use]
    pub const fn data_mappings(&self) -> &'static [(&'static str, Self)] {
        match self {
            Self::Deployment => &[("launch_task", Self::Task), ("latest_task", Self::Task)],
            Self::Application => &[("versions", Self::ApplicationVersion)],
            Self::ApplicationVersion => &[("cloud_config", Self::ApplicationVersionCloudConfig)],
            Self::ApplicationVersionCloudConfig => &[("cloud", Self::Cloud), ("image", Self::Image)],
            _ => &[],
        }
    }

    /// Returns the kind mapped to `field`, if any.
    #[must_use]
    pub fn mapping_for(&self, field: &str) -> Option<Self> {
        self.data_mappings()
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, kind)| *kind)
    }

    /// Returns a human-readable name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Deployment => "Deployment",
            Self::Task => "Task",
            Self::Application => "Application",
            Self::ApplicationVersion => "ApplicationVersion",
            Self::ApplicationVersionCloudConfig => "ApplicationVersionCloudConfig",
            Self::Cloud => "Cloud",
            Self::Image => "Image",
            Self::Region => "Region",
            Self::Zone => "Zone",
            Self::VmType => "VmType",
            Self::User => "User",
            Self::Credentials => "Credentials",
            Self::Generic => "Resource",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_fields() {
        assert_eq!(ResourceKind::Deployment.id_field(), "id");
        assert_eq!(ResourceKind::Application.id_field(), "slug");
        assert_eq!(ResourceKind::Cloud.id_field(), "slug");
        assert_eq!(ResourceKind::Region.id_field(), "region_id");
        assert_eq!(ResourceKind::Zone.id_field(), "zone_id");
    }

    #[test]
    fn test_mapping_for() {
        assert_eq!(
            ResourceKind::Deployment.mapping_for("latest_task"),
            Some(ResourceKind::Task)
        );
        assert_eq!(ResourceKind::Deployment.mapping_for("name"), None);
        assert!(ResourceKind::Task.data_mappings().is_empty());
    }
}
