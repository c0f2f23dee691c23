//! The three proxy endpoints, expressed as configuration of one shared handler.

use crate::config::{PortraitSettings, ProxyConfig};
use crate::error::ErrorStyle;
use axum::http::StatusCode;
use service_core::middleware::cors::CorsPolicy;

pub const PORTRAIT_PATH: &str = "/api/gemini";
pub const PASSTHROUGH_PATH: &str = "/api";
pub const EDGE_PASSTHROUGH_PATH: &str = "/api/edge";

const PORTRAIT_ALLOW_METHODS: &str = "POST, OPTIONS";
const PORTRAIT_ALLOW_HEADERS: &str = "Content-Type";
const PORTRAIT_MAX_AGE_SECS: u32 = 86400;

const PASSTHROUGH_ALLOW_METHODS: &str = "GET,OPTIONS,PATCH,DELETE,POST,PUT";
const PASSTHROUGH_ALLOW_HEADERS: &str = "X-CSRF-Token, X-Requested-With, Accept, Accept-Version, Content-Length, Content-MD5, Content-Type, Date, X-Api-Version";

/// What happens to a non-success upstream status in passthrough mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamErrorPolicy {
    /// Reply with the upstream status.
    Propagate,
    /// Reply 200 whatever the upstream said; the body still carries its error.
    AlwaysOk,
}

#[derive(Debug, Clone)]
pub enum ProxyMode {
    /// `{ imageBase64, style }` in, `{ ok, imageDataUrl }` out.
    Portrait(PortraitSettings),
    /// Body forwarded verbatim, upstream body relayed verbatim.
    Passthrough(UpstreamErrorPolicy),
}

#[derive(Debug, Clone)]
pub struct EndpointProfile {
    pub name: &'static str,
    pub path: &'static str,
    pub model: String,
    pub mode: ProxyMode,
    pub cors: CorsPolicy,
    pub error_style: ErrorStyle,
}

impl EndpointProfile {
    /// Style-templated portrait generation on an image-capable model.
    pub fn portrait(config: &ProxyConfig) -> Self {
        Self {
            name: "portrait",
            path: PORTRAIT_PATH,
            model: config.models.image_model.clone(),
            mode: ProxyMode::Portrait(config.portrait.clone()),
            cors: CorsPolicy::permissive(PORTRAIT_ALLOW_METHODS, PORTRAIT_ALLOW_HEADERS)
                .with_allowed_origins(&config.cors.allowed_origins)
                .max_age(PORTRAIT_MAX_AGE_SECS)
                .preflight_status(StatusCode::NO_CONTENT),
            error_style: ErrorStyle::Tagged,
        }
    }

    /// Verbatim relay that mirrors the upstream status.
    pub fn passthrough(config: &ProxyConfig) -> Self {
        Self {
            name: "passthrough",
            path: PASSTHROUGH_PATH,
            model: config.models.text_model.clone(),
            mode: ProxyMode::Passthrough(UpstreamErrorPolicy::Propagate),
            cors: CorsPolicy::permissive(PASSTHROUGH_ALLOW_METHODS, PASSTHROUGH_ALLOW_HEADERS)
                .allow_credentials(),
            error_style: ErrorStyle::Plain,
        }
    }

    /// Verbatim relay that always answers 200.
    pub fn edge_passthrough(config: &ProxyConfig) -> Self {
        Self {
            name: "edge-passthrough",
            path: EDGE_PASSTHROUGH_PATH,
            model: config.models.edge_model.clone(),
            mode: ProxyMode::Passthrough(UpstreamErrorPolicy::AlwaysOk),
            cors: CorsPolicy::permissive(PASSTHROUGH_ALLOW_METHODS, PASSTHROUGH_ALLOW_HEADERS),
            error_style: ErrorStyle::Plain,
        }
    }

    pub fn all(config: &ProxyConfig) -> Vec<Self> {
        vec![
            Self::portrait(config),
            Self::passthrough(config),
            Self::edge_passthrough(config),
        ]
    }
}
