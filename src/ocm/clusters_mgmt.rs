use tracing::debug;
use url::Url;

use super::types::{CloudProviderData, RegionList};
use super::{Ccs, OcmError, Region, check_status};

const API_PREFIX: &str = "api/clusters_mgmt/v1";

/// Clusters management sub-client of a [`super::Connection`].
#[derive(Debug, Clone, Copy)]
pub struct ClustersMgmtClient<'a> {
    http: &'a reqwest::Client,
    url: &'a Url,
}

impl<'a> ClustersMgmtClient<'a> {
    pub(super) fn new(http: &'a reqwest::Client, url: &'a Url) -> Self {
        ClustersMgmtClient { http, url }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.url.as_str().trim_end_matches('/'),
            API_PREFIX,
            path
        )
    }

    /// Regions of `provider`. With CCS enabled OCM checks the account behind
    /// the credentials and only answers with the regions it can use.
    pub async fn get_regions(&self, provider: &str, ccs: &Ccs) -> Result<Vec<Region>, OcmError> {
        let (endpoint, request) = if ccs.enabled {
            let endpoint =
                self.endpoint(&format!("cloud_providers/{}/available_regions/search", provider));
            let request = self
                .http
                .post(&endpoint)
                .json(&CloudProviderData::from(ccs));
            (endpoint, request)
        } else {
            let endpoint = self.endpoint(&format!("cloud_providers/{}/regions", provider));
            let request = self.http.get(&endpoint);
            (endpoint, request)
        };

        debug!(endpoint = %endpoint, "Listing regions");

        let response = request
            .query(&[("page", "1"), ("size", "-1")])
            .send()
            .await
            .map_err(|source| OcmError::Http {
                endpoint: endpoint.clone(),
                source,
            })?;
        let response = check_status(&endpoint, response).await?;

        let list = response
            .json::<RegionList>()
            .await
            .map_err(|source| OcmError::Decode { endpoint, source })?;

        Ok(list.items)
    }
}
