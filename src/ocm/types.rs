use serde::{Deserialize, Serialize};

use crate::aws::AccessKey;

/// Cloud region as reported by the clusters management API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Region {
    id: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    enabled: bool,
    #[serde(default)]
    supports_multi_az: bool,
}

impl Region {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        enabled: bool,
        supports_multi_az: bool,
    ) -> Self {
        Region {
            id: id.into(),
            display_name: display_name.into(),
            enabled,
            supports_multi_az,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn supports_multi_az(&self) -> bool {
        self.supports_multi_az
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RegionList {
    #[serde(default)]
    pub items: Vec<Region>,
}

/// Customer Cloud Subscription: the cluster runs in the customer's own
/// account, with credentials the customer supplies.
#[derive(Debug, Clone)]
pub struct Ccs {
    pub enabled: bool,
    pub aws: AccessKey,
}

#[derive(Serialize)]
pub(crate) struct AwsCredentials<'a> {
    pub access_key_id: &'a str,
    pub secret_access_key: &'a str,
}

#[derive(Serialize)]
pub(crate) struct CloudProviderData<'a> {
    pub aws: AwsCredentials<'a>,
}

impl<'a> From<&'a Ccs> for CloudProviderData<'a> {
    fn from(ccs: &'a Ccs) -> Self {
        CloudProviderData {
            aws: AwsCredentials {
                access_key_id: &ccs.aws.access_key_id,
                secret_access_key: &ccs.aws.secret_access_key,
            },
        }
    }
}

/// Error body returned by OCM on non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_decodes_ocm_payload() {
        let region: Region = serde_json::from_str(
            r#"{
                "kind": "CloudRegion",
                "id": "us-east-1",
                "href": "/api/clusters_mgmt/v1/cloud_providers/aws/regions/us-east-1",
                "display_name": "US East, N. Virginia",
                "enabled": true,
                "supports_multi_az": true
            }"#,
        )
        .unwrap();

        assert_eq!(region.id(), "us-east-1");
        assert_eq!(region.display_name(), "US East, N. Virginia");
        assert!(region.enabled());
        assert!(region.supports_multi_az());
    }

    #[test]
    fn missing_flags_default_to_false() {
        let region: Region = serde_json::from_str(r#"{"id": "ap-east-1"}"#).unwrap();
        assert!(!region.enabled());
        assert!(!region.supports_multi_az());
    }

    #[test]
    fn list_without_items_is_empty() {
        let list: RegionList =
            serde_json::from_str(r#"{"kind": "CloudRegionList", "total": 0}"#).unwrap();
        assert!(list.items.is_empty());
    }

    #[test]
    fn provider_data_nests_aws_credentials() {
        let ccs = Ccs {
            enabled: true,
            aws: AccessKey {
                access_key_id: "AKIA".to_string(),
                secret_access_key: "secret".to_string(),
            },
        };

        let body = serde_json::to_value(CloudProviderData::from(&ccs)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"aws": {"access_key_id": "AKIA", "secret_access_key": "secret"}})
        );
    }
}
