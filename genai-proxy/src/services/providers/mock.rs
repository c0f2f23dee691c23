//! Mock provider implementation for testing.

use super::{ContentProvider, ProviderError, UpstreamResponse};
use async_trait::async_trait;
use axum::http::StatusCode;
use secrecy::SecretString;
use serde_json::Value;
use std::sync::Mutex;

/// A recorded call to [`MockProvider::generate_content`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub model: String,
    pub payload: Value,
}

/// Returns a fixed outcome and records every call it receives.
pub struct MockProvider {
    outcome: Result<UpstreamResponse, String>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockProvider {
    pub fn responding(status: StatusCode, body: Value) -> Self {
        Self {
            outcome: Ok(UpstreamResponse::new(status, body)),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A provider whose every call fails with a network error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }
}

#[async_trait]
impl ContentProvider for MockProvider {
    async fn generate_content(
        &self,
        model: &str,
        _api_key: &SecretString,
        payload: &Value,
    ) -> Result<UpstreamResponse, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                model: model.to_string(),
                payload: payload.clone(),
            });
        }

        self.outcome.clone().map_err(ProviderError::Network)
    }
}
