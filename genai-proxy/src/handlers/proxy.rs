//! The shared proxy handler: method gate, translation, one upstream call, normalization.
//!
//! `OPTIONS` never reaches this handler; the route's CORS middleware answers it.

use crate::endpoints::{EndpointProfile, ProxyMode};
use crate::error::ProxyError;
use crate::models::PortraitRequest;
use crate::services::normalize::{normalize_passthrough, normalize_portrait};
use crate::services::prompt::build_portrait_payload;
use crate::services::{ContentProvider, CredentialSource};
use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use secrecy::SecretString;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::Instrument;

/// Per-route state: which endpoint this is, and the collaborators it calls.
#[derive(Clone)]
pub struct ProxyState {
    pub profile: Arc<EndpointProfile>,
    pub provider: Arc<dyn ContentProvider>,
    pub credentials: Arc<dyn CredentialSource>,
    pub expose_error_details: bool,
}

pub async fn proxy_handler(
    State(state): State<ProxyState>,
    method: Method,
    body: Bytes,
) -> Response {
    if method != Method::POST {
        return method_not_allowed();
    }

    let span = tracing::info_span!(
        "proxy",
        endpoint = state.profile.name,
        model = %state.profile.model,
    );

    match forward(&state, &body).instrument(span).await {
        Ok(response) => response,
        Err(e) => {
            if e.status().is_server_error() {
                tracing::error!(endpoint = state.profile.name, error = %e, "Proxy request failed");
            } else {
                tracing::info!(endpoint = state.profile.name, error = %e, "Proxy request rejected");
            }
            e.render(state.profile.error_style, state.expose_error_details)
        }
    }
}

async fn forward(state: &ProxyState, body: &[u8]) -> Result<Response, ProxyError> {
    let profile = &state.profile;

    match &profile.mode {
        ProxyMode::Portrait(settings) => {
            let request = PortraitRequest::from_json(&parse_body(body)?)?;
            let api_key = require_api_key(state)?;

            let payload = serde_json::to_value(build_portrait_payload(&request, settings))
                .map_err(anyhow::Error::from)?;
            let upstream = state
                .provider
                .generate_content(&profile.model, &api_key, &payload)
                .await?;

            tracing::info!(style = %request.style, status = %upstream.status, "Portrait upstream call finished");
            normalize_portrait(upstream)
        }
        ProxyMode::Passthrough(policy) => {
            let api_key = require_api_key(state)?;
            let payload = parse_body(body)?;

            let upstream = state
                .provider
                .generate_content(&profile.model, &api_key, &payload)
                .await?;

            tracing::info!(status = %upstream.status, "Passthrough upstream call finished");
            Ok(normalize_passthrough(upstream, *policy))
        }
    }
}

fn parse_body(body: &[u8]) -> Result<Value, ProxyError> {
    serde_json::from_slice(body).map_err(|e| ProxyError::InvalidJson(e.to_string()))
}

fn require_api_key(state: &ProxyState) -> Result<SecretString, ProxyError> {
    state
        .credentials
        .api_key()
        .ok_or(ProxyError::MissingCredential)
}

fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method Not Allowed" })),
    )
        .into_response()
}
