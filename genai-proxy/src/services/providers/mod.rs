//! Upstream provider abstraction.
//!
//! The proxy makes exactly one `generateContent` call per request through a
//! [`ContentProvider`], so tests can swap the Gemini client for a mock.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use axum::http::StatusCode;
use secrecy::SecretString;
use serde_json::Value;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse upstream response: {0}")]
    InvalidResponse(String),
}

/// Raw upstream outcome: any HTTP status, with its JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl UpstreamResponse {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Trait for generative content providers (e.g., Gemini).
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Send one `generateContent` request for `model`.
    ///
    /// Non-success statuses are returned as values, not errors; only transport and
    /// decoding failures produce [`ProviderError`].
    async fn generate_content(
        &self,
        model: &str,
        api_key: &SecretString,
        payload: &Value,
    ) -> Result<UpstreamResponse, ProviderError>;
}
