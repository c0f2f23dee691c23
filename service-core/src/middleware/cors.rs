//! Cross-origin headers and preflight handling for browser-facing routes.
//!
//! Unlike `tower_http::cors::CorsLayer`, an origin outside the allow-list does not lose
//! its CORS headers: it falls back to the `*` wildcard. Every response passing through
//! the middleware is stamped, including error responses produced further in.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Per-route CORS settings.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allowed_origins: Vec<HeaderValue>,
    allow_methods: HeaderValue,
    allow_headers: HeaderValue,
    max_age: Option<HeaderValue>,
    allow_credentials: bool,
    preflight_status: StatusCode,
}

impl CorsPolicy {
    /// A policy answering every origin with `*`. Preflights get `200 OK` until
    /// [`CorsPolicy::preflight_status`] says otherwise.
    pub fn permissive(allow_methods: &'static str, allow_headers: &'static str) -> Self {
        Self {
            allowed_origins: Vec::new(),
            allow_methods: HeaderValue::from_static(allow_methods),
            allow_headers: HeaderValue::from_static(allow_headers),
            max_age: None,
            allow_credentials: false,
            preflight_status: StatusCode::OK,
        }
    }

    /// Origins echoed back verbatim. Entries that are not valid header values are dropped.
    pub fn with_allowed_origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_origins = origins
            .into_iter()
            .filter_map(|origin| {
                let origin = origin.as_ref().trim();
                match HeaderValue::from_str(origin) {
                    Ok(value) if !origin.is_empty() => Some(value),
                    Ok(_) => None,
                    Err(e) => {
                        tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                        None
                    }
                }
            })
            .collect();
        self
    }

    pub fn max_age(mut self, seconds: u32) -> Self {
        self.max_age = Some(HeaderValue::from(seconds));
        self
    }

    pub fn allow_credentials(mut self) -> Self {
        self.allow_credentials = true;
        self
    }

    pub fn preflight_status(mut self, status: StatusCode) -> Self {
        self.preflight_status = status;
        self
    }

    pub fn allowed_origins(&self) -> &[HeaderValue] {
        &self.allowed_origins
    }

    /// The `Access-Control-Allow-Origin` value for a request carrying `origin`.
    pub fn resolve_origin(&self, origin: Option<&HeaderValue>) -> HeaderValue {
        match origin {
            Some(origin) if self.allowed_origins.contains(origin) => origin.clone(),
            _ => HeaderValue::from_static("*"),
        }
    }

    /// Stamp the CORS headers onto an outgoing response.
    pub fn apply(&self, origin: Option<&HeaderValue>, headers: &mut HeaderMap) {
        if self.allow_credentials {
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static("true"),
            );
        }
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            self.resolve_origin(origin),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            self.allow_methods.clone(),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            self.allow_headers.clone(),
        );
        if let Some(max_age) = &self.max_age {
            headers.insert(header::ACCESS_CONTROL_MAX_AGE, max_age.clone());
        }
    }
}

/// Answers `OPTIONS` with an empty preflight response and stamps CORS headers on everything else.
///
/// Install with `axum::middleware::from_fn_with_state(Arc::new(policy), cors_middleware)`.
pub async fn cors_middleware(
    State(policy): State<Arc<CorsPolicy>>,
    req: Request,
    next: Next,
) -> Response {
    let origin = req.headers().get(header::ORIGIN).cloned();

    let mut response = if req.method() == Method::OPTIONS {
        tracing::debug!(origin = ?origin, "Answering CORS preflight");
        policy.preflight_status.into_response()
    } else {
        next.run(req).await
    };

    policy.apply(origin.as_ref(), response.headers_mut());
    response
}
