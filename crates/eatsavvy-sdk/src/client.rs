//! HTTP client for the EatSavvy directory service.

use crate::config::ClientConfig;
use crate::error::{Result, SdkError};
use crate::service::DirectoryService;
use crate::wire::{decode_restaurants, EnrichRequest, ErrorBody, SearchRequest};
use async_trait::async_trait;
use eatsavvy_domain::{Restaurant, RestaurantId};
use reqwest::{RequestBuilder, Response};
use serde::Deserialize;
use tracing::debug;

/// Response of `GET /health`
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    /// `"ok"` when the service is healthy
    pub status: String,
}

/// EatSavvy directory client
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl DirectoryClient {
    /// Build a client from a validated configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| SdkError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    /// Client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Check that the service is reachable
    pub async fn health(&self) -> Result<HealthStatus> {
        let response = self.send(self.http.get(self.config.endpoint("health"))).await?;
        Ok(response.json().await?)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = self.authorize(request).send().await?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .ok()
            .or_else(|| (!text.trim().is_empty()).then(|| text.trim().to_string()))
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());

        debug!(status = status.as_u16(), %message, "Directory service returned an error");
        Err(SdkError::UnexpectedStatus {
            status: status.as_u16(),
            message,
        })
    }

    async fn fetch_restaurants(&self, request: RequestBuilder) -> Result<Vec<Restaurant>> {
        let response = self.send(request).await?;
        let body = response.bytes().await.map_err(|e| SdkError::Transport(e.to_string()))?;
        decode_restaurants(&body)
    }
}

#[async_trait]
impl DirectoryService for DirectoryClient {
    async fn list_all(&self) -> Result<Vec<Restaurant>> {
        debug!("Listing all restaurants");
        self.fetch_restaurants(self.http.get(self.config.endpoint("restaurant")))
            .await
    }

    async fn search(&self, query: &str) -> Result<Vec<Restaurant>> {
        debug!(query, "Searching restaurants");
        let request = self
            .http
            .post(self.config.endpoint("search"))
            .json(&SearchRequest { query });
        self.fetch_restaurants(request).await
    }

    async fn enrich(&self, ids: &[RestaurantId]) -> Result<Vec<Restaurant>> {
        debug!(count = ids.len(), "Requesting enrichment");
        let body = EnrichRequest {
            ids: ids.iter().map(RestaurantId::as_str).collect(),
        };
        let request = self.http.post(self.config.endpoint("enrich")).json(&body);
        self.fetch_restaurants(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_rejects_invalid_config() {
        let result = DirectoryClient::new(ClientConfig::new("ftp://nowhere"));
        assert!(matches!(result, Err(SdkError::Config(_))));
    }

    #[test]
    fn test_client_keeps_config() {
        let client = DirectoryClient::new(ClientConfig::new("http://localhost:9").with_api_key("k")).unwrap();
        assert_eq!(client.config().api_key.as_deref(), Some("k"));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_connection_error() {
        // Port 9 (discard) is never served in test environments
        let client = DirectoryClient::new(ClientConfig::new("http://127.0.0.1:9")).unwrap();
        let err = client.list_all().await.unwrap_err();
        assert!(matches!(err, SdkError::Connection(_) | SdkError::Transport(_)));
    }
}
