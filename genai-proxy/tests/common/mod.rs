#![allow(dead_code)]

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use genai_proxy::config::ProxyConfig;
use genai_proxy::services::{CredentialSource, GeminiClient, StaticCredential};
use genai_proxy::startup::build_router;
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-api-key";
pub const IMAGE_MODEL: &str = "test-image-model";
pub const TEXT_MODEL: &str = "test-text-model";
pub const EDGE_MODEL: &str = "test-edge-model";
pub const ALLOWED_ORIGIN: &str = "https://redirectfilter.com";

/// Configuration pointing the proxy at `upstream_base`, with fixed models and origins.
pub fn test_config(upstream_base: &str) -> ProxyConfig {
    let mut config = ProxyConfig::load().expect("Failed to load configuration");
    config.common.port = 0;
    config.gemini.base_url = upstream_base.to_string();
    config.gemini.request_timeout_secs = Some(10);
    config.models.image_model = IMAGE_MODEL.to_string();
    config.models.text_model = TEXT_MODEL.to_string();
    config.models.edge_model = EDGE_MODEL.to_string();
    config.cors.allowed_origins = vec![
        ALLOWED_ORIGIN.to_string(),
        "https://www.redirectfilter.com".to_string(),
    ];
    config.expose_error_details = true;
    config
}

pub fn upstream_path(model: &str) -> String {
    format!("/models/{}:generateContent", model)
}

pub struct TestProxy {
    pub router: Router,
    pub upstream: MockServer,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("Response body is not JSON")
    }

    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl TestProxy {
    /// A proxy whose credential is set, in front of a fresh mock upstream.
    pub async fn spawn() -> Self {
        Self::spawn_with(StaticCredential::new(TEST_API_KEY), |_| {}).await
    }

    /// A proxy with no API key available.
    pub async fn without_credential() -> Self {
        Self::spawn_with(StaticCredential::missing(), |_| {}).await
    }

    pub async fn spawn_with<C>(credentials: C, customize: impl FnOnce(&mut ProxyConfig)) -> Self
    where
        C: CredentialSource + 'static,
    {
        let upstream = MockServer::start().await;

        let mut config = test_config(&upstream.uri());
        customize(&mut config);

        let provider =
            Arc::new(GeminiClient::new(&config.gemini).expect("Failed to build Gemini client"));
        let router = build_router(&config, provider, Arc::new(credentials));

        Self { router, upstream }
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        origin: Option<&str>,
        body: Body,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(origin) = origin {
            builder = builder.header(header::ORIGIN, origin);
        }

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .expect("Router failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> TestResponse {
        self.request(Method::POST, path, None, Body::from(body.to_string()))
            .await
    }

    /// Bodies the upstream mock received, parsed as JSON.
    pub async fn upstream_payloads(&self) -> Vec<Value> {
        self.upstream
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| serde_json::from_slice(&request.body).expect("Upstream body is not JSON"))
            .collect()
    }
}
