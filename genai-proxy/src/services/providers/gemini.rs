//! Gemini provider implementation.
//!
//! Posts the payload to `{base}/models/{model}:generateContent` with the API key
//! as the `key` query parameter and hands the status and JSON body back untouched.

use super::{ContentProvider, ProviderError, UpstreamResponse};
use crate::config::GeminiSettings;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::time::Duration;

/// Gemini REST client.
pub struct GeminiClient {
    base_url: String,
    client: Client,
}

impl GeminiClient {
    pub fn new(settings: &GeminiSettings) -> Result<Self, ProviderError> {
        let mut builder = Client::builder();
        if let Some(secs) = settings.request_timeout_secs.filter(|secs| *secs > 0) {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| ProviderError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Build the API URL for the given model and method. The key is added as a query
    /// parameter at send time so it never appears in this string.
    fn api_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, model, method)
    }
}

#[async_trait]
impl ContentProvider for GeminiClient {
    async fn generate_content(
        &self,
        model: &str,
        api_key: &SecretString,
        payload: &Value,
    ) -> Result<UpstreamResponse, ProviderError> {
        let url = self.api_url(model, "generateContent");

        tracing::debug!(model = %model, "Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key.expose_secret().as_str())])
            .json(payload)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.without_url().to_string()))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.without_url().to_string()))?;

        if status.is_success() {
            tracing::debug!(model = %model, status = %status, "Gemini API call succeeded");
        } else {
            tracing::warn!(model = %model, status = %status, body = %body, "Gemini API returned an error");
        }

        Ok(UpstreamResponse::new(status, body))
    }
}
