//! HTTP client for the Service Now table API.
//!
//! Wraps `reqwest` with basic auth, the sites-view table URL and typed
//! decoding of the `{"result": [...]}` envelope.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use sitealert_core::SnowConfig;

use crate::error::SnowError;
use crate::fetch::SiteTransport;
use crate::types::{SnowPage, SnowQuery, SnowResponse, TOTAL_COUNT_HEADER};

/// Client for one Service Now table.
///
/// Use [`SnowClient::new`] for the configured instance or
/// [`SnowClient::with_base_url`] to point at a mock server in tests.
pub struct SnowClient {
    client: Client,
    username: String,
    password: String,
    table_url: Url,
}

impl SnowClient {
    /// Creates a client for `config.instance_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SnowError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`SnowError::InvalidBaseUrl`] if the instance URL does not parse.
    pub fn new(config: &SnowConfig) -> Result<Self, SnowError> {
        Self::with_base_url(config, &config.instance_url)
    }

    /// Creates a client against `base_url` instead of the configured
    /// instance (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SnowError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`SnowError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(config: &SnowConfig, base_url: &str) -> Result<Self, SnowError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.as_str())
            .build()?;

        let table_url = table_url(base_url, &config.table)?;

        Ok(Self {
            client,
            username: config.username.clone(),
            password: config.password.clone(),
            table_url,
        })
    }
}

#[async_trait]
impl SiteTransport for SnowClient {
    /// Sends one authenticated GET for `query`.
    ///
    /// # Errors
    ///
    /// - [`SnowError::Http`] on network or TLS failure.
    /// - [`SnowError::UnexpectedStatus`] on any non-2xx status.
    /// - [`SnowError::Deserialize`] if the body is not a result envelope.
    async fn get_page(&self, query: &SnowQuery) -> Result<SnowPage, SnowError> {
        let response = self
            .client
            .get(self.table_url.clone())
            .basic_auth(&self.username, Some(&self.password))
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&query.params())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SnowError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.table_url.to_string(),
            });
        }

        let total_count = response
            .headers()
            .get(TOTAL_COUNT_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok());

        let body = response.text().await?;
        let envelope: SnowResponse =
            serde_json::from_str(&body).map_err(|e| SnowError::Deserialize {
                context: format!("table response from {}", self.table_url),
                source: e,
            })?;

        Ok(SnowPage {
            rows: envelope.result,
            total_count,
        })
    }
}

/// Joins an instance URL and table name into the table API endpoint.
fn table_url(base_url: &str, table: &str) -> Result<Url, SnowError> {
    let raw = format!("{}/api/now/table/{table}", base_url.trim_end_matches('/'));
    Url::parse(&raw).map_err(|e| SnowError::InvalidBaseUrl {
        url: base_url.to_owned(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_url_joins_instance_and_table() {
        let url = table_url("https://hnseu.service-now.com", "u_hns_sites_view__no_cpe_").unwrap();
        assert_eq!(
            url.as_str(),
            "https://hnseu.service-now.com/api/now/table/u_hns_sites_view__no_cpe_"
        );
    }

    #[test]
    fn table_url_strips_trailing_slash() {
        let url = table_url("https://example.service-now.com/", "sites").unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.service-now.com/api/now/table/sites"
        );
    }

    #[test]
    fn table_url_rejects_garbage() {
        let err = table_url("not a url", "sites").unwrap_err();
        assert!(matches!(err, SnowError::InvalidBaseUrl { ref url, .. } if url == "not a url"));
    }
}
