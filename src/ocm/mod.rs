//! Client for the OpenShift Cluster Manager (OCM) API.

mod clusters_mgmt;
mod connection;
mod token;
mod types;

pub use clusters_mgmt::ClustersMgmtClient;
pub use connection::{Connection, ConnectionBuilder};
pub use types::{Ccs, Region};

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum OcmError {
    #[error("Not logged in, run the 'rosa login' command")]
    NotLoggedIn,

    #[error("invalid OCM URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("access token is not a valid header value")]
    InvalidToken,

    #[error("can't refresh access token: {0}")]
    TokenRefresh(String),

    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },

    #[error("status {status}: {reason}")]
    Api { status: u16, reason: String },

    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        source: reqwest::Error,
    },

    #[error("can't save OCM config: {0}")]
    SaveConfig(#[source] ConfigError),
}

/// Turns a non-2xx response into [`OcmError::Api`], preferring the `reason`
/// field of an OCM error body over the raw text.
pub(crate) async fn check_status(
    endpoint: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, OcmError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.map_err(|source| OcmError::Http {
        endpoint: endpoint.to_string(),
        source,
    })?;
    let reason = serde_json::from_str::<types::ApiErrorBody>(&body)
        .ok()
        .and_then(|error| error.reason)
        .unwrap_or(body);

    Err(OcmError::Api {
        status: status.as_u16(),
        reason,
    })
}
