use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::debug;
use url::Url;

use super::types::TokenResponse;
use super::{ClustersMgmtClient, OcmError, check_status, token};
use crate::config::OcmConfig;

/// Authenticated session with the OCM API.
///
/// Must be released with [`Connection::close`], which persists tokens that
/// were refreshed while building it.
#[derive(Debug)]
pub struct Connection {
    http: reqwest::Client,
    url: Url,
    config: OcmConfig,
    tokens_refreshed: bool,
}

impl Connection {
    pub fn builder() -> ConnectionBuilder {
        ConnectionBuilder::default()
    }

    pub fn clusters_mgmt(&self) -> ClustersMgmtClient<'_> {
        ClustersMgmtClient::new(&self.http, &self.url)
    }

    pub async fn close(self) -> Result<(), OcmError> {
        if self.tokens_refreshed {
            self.config.save().map_err(OcmError::SaveConfig)?;
            debug!("Saved refreshed OCM tokens");
        }
        debug!(url = %self.url, "Closed OCM connection");
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct ConnectionBuilder {
    config: OcmConfig,
}

impl ConnectionBuilder {
    pub fn config(mut self, config: OcmConfig) -> Self {
        self.config = config;
        self
    }

    pub async fn build(self) -> Result<Connection, OcmError> {
        let mut config = self.config;
        let url = Url::parse(&config.url).map_err(|source| OcmError::InvalidUrl {
            url: config.url.clone(),
            source,
        })?;

        let mut tokens_refreshed = false;
        // Opaque or expired access tokens are only used when there is nothing to refresh with
        let access_token = match (config.access_token.clone(), config.refresh_token.clone()) {
            (Some(access_token), _) if token::is_current(&access_token) => access_token,
            (_, Some(refresh_token)) => {
                let refreshed = refresh_access_token(&config, &refresh_token).await?;
                let access_token = refreshed
                    .access_token
                    .ok_or_else(|| OcmError::TokenRefresh("response has no access token".into()))?;
                config.access_token = Some(access_token.clone());
                if let Some(refresh_token) = refreshed.refresh_token {
                    config.refresh_token = Some(refresh_token);
                }
                tokens_refreshed = true;
                access_token
            }
            (Some(access_token), None) => access_token,
            (None, None) => return Err(OcmError::NotLoggedIn),
        };

        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", access_token))
            .map_err(|_| OcmError::InvalidToken)?;
        authorization.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);

        let http = reqwest::Client::builder()
            .user_agent(concat!("rosa/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|source| OcmError::Http {
                endpoint: "client_init".into(),
                source,
            })?;

        debug!(url = %url, "Created OCM connection");

        Ok(Connection {
            http,
            url,
            config,
            tokens_refreshed,
        })
    }
}

async fn refresh_access_token(
    config: &OcmConfig,
    refresh_token: &str,
) -> Result<TokenResponse, OcmError> {
    debug!(token_url = %config.token_url, "Refreshing OCM access token");

    let response = reqwest::Client::new()
        .post(&config.token_url)
        .form(&[
            ("grant_type", "refresh_token"),
            ("client_id", config.client_id.as_str()),
            ("refresh_token", refresh_token),
        ])
        .send()
        .await
        .map_err(|source| OcmError::Http {
            endpoint: config.token_url.clone(),
            source,
        })?;

    let response = check_status(&config.token_url, response)
        .await
        .map_err(|err| OcmError::TokenRefresh(err.to_string()))?;

    response
        .json::<TokenResponse>()
        .await
        .map_err(|source| OcmError::Decode {
            endpoint: config.token_url.clone(),
            source,
        })
}
