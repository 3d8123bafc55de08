//! Azure service principal credentials.

use serde_json::{Map, Value};

use super::{insert_optional, string_field, HttpHeaders, Secret};

/// Azure credentials. Subscription, client id, secret and tenant are
/// required; resource group, storage account and default VM username are
/// forwarded when present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AzureCredentials {
    /// `AZURE_SUBSCRIPTION_ID`.
    pub subscription_id: String,
    /// `AZURE_CLIENT_ID`.
    pub client_id: String,
    /// `AZURE_SECRET`.
    pub secret: Secret,
    /// `AZURE_TENANT`.
    pub tenant: String,
    /// `AZURE_RESOURCE_GROUP`.
    pub resource_group: Option<String>,
    /// `AZURE_STORAGE_ACCOUNT`.
    pub storage_account: Option<String>,
    /// `AZURE_VM_DEFAULT_USERNAME`.
    pub vm_default_username: Option<String>,
}

impl AzureCredentials {
    pub(super) fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Option<Self> {
        Some(Self {
            subscription_id: lookup("AZURE_SUBSCRIPTION_ID")?,
            client_id: lookup("AZURE_CLIENT_ID")?,
            secret: Secret::new(lookup("AZURE_SECRET")?),
            tenant: lookup("AZURE_TENANT")?,
            resource_group: lookup("AZURE_RESOURCE_GROUP"),
            storage_account: lookup("AZURE_STORAGE_ACCOUNT"),
            vm_default_username: lookup("AZURE_VM_DEFAULT_USERNAME"),
        })
    }

    pub(super) fn from_map(creds: &Map<String, Value>) -> Option<Self> {
        Some(Self {
            subscription_id: string_field(creds, "azure_subscription_id")?,
            client_id: string_field(creds, "azure_client_id")?,
            secret: Secret::new(string_field(creds, "azure_secret")?),
            tenant: string_field(creds, "azure_tenant")?,
            resource_group: string_field(creds, "azure_resource_group"),
            storage_account: string_field(creds, "azure_storage_account"),
            vm_default_username: string_field(creds, "azure_vm_default_username"),
        })
    }

    pub(super) fn to_http_headers(&self) -> HttpHeaders {
        let mut headers = HttpHeaders::from([
            (
                "cl-azure-subscription-id".to_string(),
                self.subscription_id.clone(),
            ),
            ("cl-azure-client-id".to_string(), self.client_id.clone()),
            (
                "cl-azure-secret".to_string(),
                self.secret.expose().to_string(),
            ),
            ("cl-azure-tenant".to_string(), self.tenant.clone()),
        ]);
        insert_optional(
            &mut headers,
            "cl-azure-resource-group",
            self.resource_group.as_ref(),
        );
        insert_optional(
            &mut headers,
            "cl-azure-storage-account",
            self.storage_account.as_ref(),
        );
        insert_optional(
            &mut headers,
            "cl-azure-vm-default-username",
            self.vm_default_username.as_ref(),
        );
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_creds() -> Map<String, Value> {
        json!({
            "azure_subscription_id": "sub",
            "azure_client_id": "client",
            "azure_secret": "secret",
            "azure_tenant": "tenant",
            "azure_resource_group": "rg"
        })
        .as_object()
        .unwrap()
        .clone()
    }

    #[test]
    fn test_tenant_is_read_from_the_map() {
        let creds = AzureCredentials::from_map(&full_creds()).unwrap();
        assert_eq!(creds.tenant, "tenant");
    }

    #[test]
    fn test_each_required_field_is_required() {
        for field in [
            "azure_subscription_id",
            "azure_client_id",
            "azure_secret",
            "azure_tenant",
        ] {
            let mut creds = full_creds();
            creds.remove(field);
            assert!(AzureCredentials::from_map(&creds).is_none(), "{field}");
        }
    }

    #[test]
    fn test_headers_include_optional_resource_group() {
        let headers = AzureCredentials::from_map(&full_creds())
            .unwrap()
            .to_http_headers();
        assert_eq!(headers.len(), 5);
        assert_eq!(headers["cl-azure-subscription-id"], "sub");
        assert_eq!(headers["cl-azure-resource-group"], "rg");
        assert!(!headers.contains_key("cl-azure-storage-account"));
    }
}
