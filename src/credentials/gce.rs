//! GCE service account credentials.
//!
//! GCE credentials are a service account JSON document. The environment
//! variable `GCE_CREDENTIALS_JSON` may hold either the JSON text itself or a
//! path to a file containing it. The whole document is forwarded as a single
//! header value.

use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;

use super::HttpHeaders;

const ENV_CREDENTIALS_JSON: &str = "GCE_CREDENTIALS_JSON";
const HEADER_CREDENTIALS_JSON: &str = "cl-gce-credentials-json";

/// A GCE service account credentials document.
#[derive(Clone, PartialEq, Eq)]
pub struct GceCredentials {
    credentials: Map<String, Value>,
}

impl GceCredentials {
    /// Returns the service account document.
    #[must_use]
    pub const fn credentials(&self) -> &Map<String, Value> {
        &self.credentials
    }

    pub(super) fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Option<Self> {
        let value = lookup(ENV_CREDENTIALS_JSON)?;
        let credentials = parse_credentials(&value)?;
        Some(Self { credentials })
    }

    pub(super) fn from_map(creds: &Map<String, Value>) -> Option<Self> {
        if creds.is_empty() {
            return None;
        }
        Some(Self {
            credentials: creds.clone(),
        })
    }

    pub(super) fn to_http_headers(&self) -> HttpHeaders {
        HttpHeaders::from([(
            HEADER_CREDENTIALS_JSON.to_string(),
            Value::Object(self.credentials.clone()).to_string(),
        )])
    }
}

impl fmt::Debug for GceCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GceCredentials")
            .field("project_id", &self.credentials.get("project_id"))
            .finish_non_exhaustive()
    }
}

/// Reads `value` as inline JSON first, then as a path to a JSON file.
///
/// Failures are logged and reported as `None`.
fn parse_credentials(value: &str) -> Option<Map<String, Value>> {
    if let Some(credentials) = as_non_empty_object(serde_json::from_str(value).ok()) {
        return Some(credentials);
    }

    let path = Path::new(value);
    if !path.exists() {
        tracing::error!(
            "Unable to read {}: value is neither JSON nor an existing file path",
            ENV_CREDENTIALS_JSON
        );
        return None;
    }

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::error!(
                "Unable to read {} from {}: {}",
                ENV_CREDENTIALS_JSON,
                path.display(),
                e
            );
            return None;
        }
    };

    match serde_json::from_str(&contents) {
        Ok(parsed) => {
            let credentials = as_non_empty_object(Some(parsed));
            if credentials.is_none() {
                tracing::error!(
                    "Unable to read {} from {}: expected a JSON object",
                    ENV_CREDENTIALS_JSON,
                    path.display()
                );
            }
            credentials
        }
        Err(e) => {
            tracing::error!(
                "Unable to read {} from {}: {}",
                ENV_CREDENTIALS_JSON,
                path.display(),
                e
            );
            None
        }
    }
}

fn as_non_empty_object(value: Option<Value>) -> Option<Map<String, Value>> {
    match value {
        Some(Value::Object(map)) if !map.is_empty() => Some(map),
        _ => None,
    }
}
