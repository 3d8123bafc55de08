//! OpenStack user credentials.

use serde_json::{Map, Value};

use super::{insert_optional, string_field, HttpHeaders, Secret};

/// OpenStack credentials. Username and password are required; the project
/// and domain names are forwarded when present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenStackCredentials {
    /// `OS_USERNAME`.
    pub username: String,
    /// `OS_PASSWORD`.
    pub password: Secret,
    /// `OS_PROJECT_NAME`.
    pub project_name: Option<String>,
    /// `OS_PROJECT_DOMAIN_NAME`.
    pub project_domain_name: Option<String>,
    /// `OS_USER_DOMAIN_NAME`.
    pub user_domain_name: Option<String>,
}

impl OpenStackCredentials {
    pub(super) fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Option<Self> {
        Some(Self {
            username: lookup("OS_USERNAME")?,
            password: Secret::new(lookup("OS_PASSWORD")?),
            project_name: lookup("OS_PROJECT_NAME"),
            project_domain_name: lookup("OS_PROJECT_DOMAIN_NAME"),
            user_domain_name: lookup("OS_USER_DOMAIN_NAME"),
        })
    }

    pub(super) fn from_map(creds: &Map<String, Value>) -> Option<Self> {
        Some(Self {
            username: string_field(creds, "os_username")?,
            password: Secret::new(string_field(creds, "os_password")?),
            project_name: string_field(creds, "os_project_name"),
            project_domain_name: string_field(creds, "os_project_domain_name"),
            user_domain_name: string_field(creds, "os_user_domain_name"),
        })
    }

    pub(super) fn to_http_headers(&self) -> HttpHeaders {
        let mut headers = HttpHeaders::from([
            ("cl-os-username".to_string(), self.username.clone()),
            (
                "cl-os-password".to_string(),
                self.password.expose().to_string(),
            ),
        ]);
        insert_optional(&mut headers, "cl-os-project-name", self.project_name.as_ref());
        insert_optional(
            &mut headers,
            "cl-os-project-domain-name",
            self.project_domain_name.as_ref(),
        );
        insert_optional(
            &mut headers,
            "cl-os-user-domain-name",
            self.user_domain_name.as_ref(),
        );
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_map_requires_username_and_password() {
        let creds = json!({"os_username": "alice", "os_project_name": "demo"});
        assert!(OpenStackCredentials::from_map(creds.as_object().unwrap()).is_none());
    }

    #[test]
    fn test_optional_headers_only_when_present() {
        let creds = json!({
            "os_username": "alice",
            "os_password": "pw",
            "os_project_name": "demo"
        });
        let headers = OpenStackCredentials::from_map(creds.as_object().unwrap())
            .unwrap()
            .to_http_headers();

        assert_eq!(headers["cl-os-username"], "alice");
        assert_eq!(headers["cl-os-password"], "pw");
        assert_eq!(headers["cl-os-project-name"], "demo");
        assert!(!headers.contains_key("cl-os-project-domain-name"));
        assert!(!headers.contains_key("cl-os-user-domain-name"));
    }
}
