//! Cloud provider credentials forwarded to the CloudLaunch API.
//!
//! Some CloudLaunch operations (launching a deployment, listing VM types)
//! act on a cloud account on the user's behalf. The provider credentials
//! for that account travel with each request as HTTP headers.
//!
//! # Overview
//!
//! - [`CloudType`]: The four supported provider tags (`aws`, `gce`,
//!   `openstack`, `azure`)
//! - [`CloudCredentials`]: A credential bundle for one provider
//! - [`Secret`]: A string wrapper that masks its value in debug output
//!
//! # Soft failure
//!
//! Loading never fails hard. When a required field is missing, or the GCE
//! JSON blob cannot be read, the loaders return `None` so the caller can
//! continue without provider credentials; many commands do not need them.
//!
//! # Example
//!
//! ```rust
//! use cloudlaunch::credentials::CloudCredentials;
//! use serde_json::json;
//!
//! let creds = json!({"aws_access_key": "AKIA123", "aws_secret_key": "s3cr3t"});
//! let creds = CloudCredentials::load_from_dict("aws", creds.as_object().unwrap()).unwrap();
//!
//! let headers = creds.to_http_headers();
//! assert_eq!(headers["cl-aws-access-key"], "AKIA123");
//! assert_eq!(headers["cl-aws-secret-key"], "s3cr3t");
//! ```

mod aws;
mod azure;
mod gce;
mod openstack;

pub use aws::AwsCredentials;
pub use azure::AzureCredentials;
pub use gce::GceCredentials;
pub use openstack::OpenStackCredentials;

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// HTTP header name to value mapping produced by credentials.
pub type HttpHeaders = BTreeMap<String, String>;

/// Cloud provider kinds that CloudLaunch accepts credentials for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CloudType {
    /// Amazon Web Services.
    Aws,
    /// Google Compute Engine.
    Gce,
    /// OpenStack.
    OpenStack,
    /// Microsoft Azure.
    Azure,
}

impl CloudType {
    /// Every supported provider, in declaration order.
    pub const ALL: [Self; 4] = [Self::Aws, Self::Gce, Self::OpenStack, Self::Azure];

    /// Returns the provider tag used by the CloudLaunch API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Aws => "aws",
            Self::Gce => "gce",
            Self::OpenStack => "openstack",
            Self::Azure => "azure",
        }
    }
}

impl fmt::Display for CloudType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CloudType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|cloud_type| cloud_type.as_str() == s)
            .ok_or_else(|| format!("unknown cloud type '{s}'"))
    }
}

/// A string holding secret material.
///
/// Displays as `Secret(*****)` in debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wraps a secret value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the secret value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(*****)")
    }
}

/// A credential bundle for one cloud provider.
///
/// Bundles are never partially constructed: each provider defines a set of
/// required fields, and the loaders return `None` unless all of them are
/// present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CloudCredentials {
    /// AWS access key pair.
    Aws(AwsCredentials),
    /// GCE service account JSON.
    Gce(GceCredentials),
    /// OpenStack user credentials.
    OpenStack(OpenStackCredentials),
    /// Azure service principal.
    Azure(AzureCredentials),
}

impl CloudCredentials {
    /// Loads credentials for `cloud_type` from the process environment.
    ///
    /// Returns `None` for an unknown provider tag or when required
    /// environment variables are missing.
    #[must_use]
    pub fn load_from_environment(cloud_type: &str) -> Option<Self> {
        let cloud_type = parse_cloud_type(cloud_type)?;
        Self::load_from_lookup(cloud_type, |name| {
            std::env::var(name).ok().filter(|value| !value.is_empty())
        })
    }

    /// Loads credentials for `cloud_type` using `lookup` to resolve
    /// environment variable names.
    ///
    /// This is what [`load_from_environment`](Self::load_from_environment)
    /// uses with the real process environment.
    #[must_use]
    pub fn load_from_lookup<F>(cloud_type: CloudType, lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        match cloud_type {
            CloudType::Aws => AwsCredentials::from_lookup(&lookup).map(Self::Aws),
            CloudType::Gce => GceCredentials::from_lookup(&lookup).map(Self::Gce),
            CloudType::OpenStack => {
                OpenStackCredentials::from_lookup(&lookup).map(Self::OpenStack)
            }
            CloudType::Azure => AzureCredentials::from_lookup(&lookup).map(Self::Azure),
        }
    }

    /// Loads credentials for `cloud_type` from a JSON object.
    ///
    /// For AWS, OpenStack and Azure the keys are the lowercase environment
    /// variable names (`aws_access_key`, `os_username`,
    /// `azure_subscription_id`, ...). For GCE the object is the service
    /// account JSON itself.
    #[must_use]
    pub fn load_from_dict(cloud_type: &str, creds: &Map<String, Value>) -> Option<Self> {
        match parse_cloud_type(cloud_type)? {
            CloudType::Aws => AwsCredentials::from_map(creds).map(Self::Aws),
            CloudType::Gce => GceCredentials::from_map(creds).map(Self::Gce),
            CloudType::OpenStack => OpenStackCredentials::from_map(creds).map(Self::OpenStack),
            CloudType::Azure => AzureCredentials::from_map(creds).map(Self::Azure),
        }
    }

    /// Returns the provider these credentials belong to.
    #[must_use]
    pub const fn cloud_type(&self) -> CloudType {
        match self {
            Self::Aws(_) => CloudType::Aws,
            Self::Gce(_) => CloudType::Gce,
            Self::OpenStack(_) => CloudType::OpenStack,
            Self::Azure(_) => CloudType::Azure,
        }
    }

    /// Converts the credentials to HTTP header name/value pairs.
    #[must_use]
    pub fn to_http_headers(&self) -> HttpHeaders {
        match self {
            Self::Aws(creds) => creds.to_http_headers(),
            Self::Gce(creds) => creds.to_http_headers(),
            Self::OpenStack(creds) => creds.to_http_headers(),
            Self::Azure(creds) => creds.to_http_headers(),
        }
    }
}

fn parse_cloud_type(cloud_type: &str) -> Option<CloudType> {
    match cloud_type.parse() {
        Ok(cloud_type) => Some(cloud_type),
        Err(reason) => {
            tracing::debug!("No credentials loaded: {}", reason);
            None
        }
    }
}

/// Reads a non-empty string field from a credentials object.
fn string_field(creds: &Map<String, Value>, name: &str) -> Option<String> {
    creds
        .get(name)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}

/// Inserts `value` under `name` when present.
fn insert_optional(headers: &mut HttpHeaders, name: &str, value: Option<&String>) {
    if let Some(value) = value {
        headers.insert(name.to_string(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cloud_type_round_trips_through_str() {
        for cloud_type in CloudType::ALL {
            assert_eq!(cloud_type.as_str().parse::<CloudType>(), Ok(cloud_type));
        }
    }

    #[test]
    fn test_unknown_cloud_type_yields_no_credentials() {
        let creds = json!({"aws_access_key": "a", "aws_secret_key": "b"});
        assert!(CloudCredentials::load_from_dict("digitalocean", creds.as_object().unwrap()).is_none());
        assert!(CloudCredentials::load_from_environment("digitalocean").is_none());
    }

    #[test]
    fn test_cloud_type_reported_by_bundle() {
        let creds = json!({"os_username": "alice", "os_password": "pw"});
        let creds = CloudCredentials::load_from_dict("openstack", creds.as_object().unwrap()).unwrap();
        assert_eq!(creds.cloud_type(), CloudType::OpenStack);
    }

    #[test]
    fn test_secret_masks_value_in_debug() {
        let secret = Secret::new("hunter2");
        assert_eq!(format!("{secret:?}"), "Secret(*****)");
        assert_eq!(secret.expose(), "hunter2");
    }

    #[test]
    fn test_string_field_ignores_empty_and_non_string_values() {
        let creds = json!({"empty": "", "number": 12, "name": "x"});
        let creds = creds.as_object().unwrap();
        assert_eq!(string_field(creds, "empty"), None);
        assert_eq!(string_field(creds, "number"), None);
        assert_eq!(string_field(creds, "missing"), None);
        assert_eq!(string_field(creds, "name"), Some("x".to_string()));
    }
}
