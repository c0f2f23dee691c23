//! Turns an upstream outcome into the caller-facing response.

use crate::endpoints::UpstreamErrorPolicy;
use crate::error::ProxyError;
use crate::models::gemini::first_inline_data;
use crate::services::providers::UpstreamResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortraitResponse {
    pub ok: bool,
    pub image_data_url: String,
}

/// Portrait mode: republish the first inline image as a `data:` URL.
///
/// Upstream failures keep their status with the body wrapped as `{ "error": <body> }`.
pub fn normalize_portrait(upstream: UpstreamResponse) -> Result<Response, ProxyError> {
    if !upstream.is_success() {
        return Ok((upstream.status, Json(json!({ "error": upstream.body }))).into_response());
    }

    let Some(image) = first_inline_data(&upstream.body) else {
        tracing::warn!(
            finish_reason = ?upstream.body.pointer("/candidates/0/finishReason"),
            "Upstream response has no inline image in its first candidate"
        );
        return Err(ProxyError::NoImage);
    };

    Ok((
        StatusCode::OK,
        Json(PortraitResponse {
            ok: true,
            image_data_url: image.to_data_url(),
        }),
    )
        .into_response())
}

/// Passthrough modes: relay the upstream body unchanged.
pub fn normalize_passthrough(upstream: UpstreamResponse, policy: UpstreamErrorPolicy) -> Response {
    let status = match policy {
        UpstreamErrorPolicy::Propagate if !upstream.is_success() => upstream.status,
        UpstreamErrorPolicy::Propagate | UpstreamErrorPolicy::AlwaysOk => StatusCode::OK,
    };

    (status, Json(upstream.body)).into_response()
}
