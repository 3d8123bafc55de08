//! AWS access key credentials.

use serde_json::{Map, Value};

use super::{string_field, HttpHeaders, Secret};

const ENV_ACCESS_KEY: &str = "AWS_ACCESS_KEY";
const ENV_SECRET_KEY: &str = "AWS_SECRET_KEY";

const HEADER_ACCESS_KEY: &str = "cl-aws-access-key";
const HEADER_SECRET_KEY: &str = "cl-aws-secret-key";

/// An AWS access key pair. Both fields are required.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AwsCredentials {
    /// The access key id.
    pub access_key: String,
    /// The secret access key.
    pub secret_key: Secret,
}

impl AwsCredentials {
    pub(super) fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Option<Self> {
        Some(Self {
            access_key: lookup(ENV_ACCESS_KEY)?,
            secret_key: Secret::new(lookup(ENV_SECRET_KEY)?),
        })
    }

    pub(super) fn from_map(creds: &Map<String, Value>) -> Option<Self> {
        Some(Self {
            access_key: string_field(creds, "aws_access_key")?,
            secret_key: Secret::new(string_field(creds, "aws_secret_key")?),
        })
    }

    pub(super) fn to_http_headers(&self) -> HttpHeaders {
        HttpHeaders::from([
            (HEADER_ACCESS_KEY.to_string(), self.access_key.clone()),
            (
                HEADER_SECRET_KEY.to_string(),
                self.secret_key.expose().to_string(),
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_from_lookup_requires_both_keys() {
        let lookup = lookup_in(&[("AWS_ACCESS_KEY", "AKIA123")]);
        assert!(AwsCredentials::from_lookup(&lookup).is_none());

        let lookup = lookup_in(&[("AWS_ACCESS_KEY", "AKIA123"), ("AWS_SECRET_KEY", "s3cr3t")]);
        let creds = AwsCredentials::from_lookup(&lookup).unwrap();
        assert_eq!(creds.access_key, "AKIA123");
        assert_eq!(creds.secret_key.expose(), "s3cr3t");
    }

    #[test]
    fn test_headers_use_fixed_names() {
        let creds = AwsCredentials {
            access_key: "AKIA123".to_string(),
            secret_key: Secret::new("s3cr3t"),
        };
        let headers = creds.to_http_headers();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers["cl-aws-access-key"], "AKIA123");
        assert_eq!(headers["cl-aws-secret-key"], "s3cr3t");
    }

    #[test]
    fn test_debug_output_hides_secret_key() {
        let creds = AwsCredentials {
            access_key: "AKIA123".to_string(),
            secret_key: Secret::new("s3cr3t"),
        };
        assert!(!format!("{creds:?}").contains("s3cr3t"));
    }
}
