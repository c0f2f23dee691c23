//! Request pipeline errors and their per-endpoint JSON rendering.

use crate::services::providers::ProviderError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Environment variable holding the upstream API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Message used in place of internal details when they are not exposed.
const REDACTED_DETAIL: &str = "Internal error";

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),

    #[error("Missing {0}")]
    MissingField(&'static str),

    #[error("{} not set", API_KEY_ENV)]
    MissingCredential,

    #[error("Gemini returned no image")]
    NoImage,

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// How an endpoint shapes its 500 bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStyle {
    /// `{ "error": "Proxy Error", "message": <detail> }`, credential errors name the variable.
    Tagged,
    /// `{ "error": <detail> }`, credential errors use a generic configuration message.
    Plain,
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::InvalidJson(_) | ProxyError::MissingField(_) => StatusCode::BAD_REQUEST,
            ProxyError::MissingCredential
            | ProxyError::NoImage
            | ProxyError::Provider(_)
            | ProxyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Render the error the way the endpoint using `style` reports it.
    pub fn render(self, style: ErrorStyle, expose_details: bool) -> Response {
        let status = self.status();

        let body = match (&self, style) {
            (ProxyError::InvalidJson(_) | ProxyError::MissingField(_) | ProxyError::NoImage, _) => {
                json!({ "error": self.to_string() })
            }
            (ProxyError::MissingCredential, ErrorStyle::Tagged) => {
                json!({ "error": self.to_string() })
            }
            (ProxyError::MissingCredential, ErrorStyle::Plain) => {
                json!({ "error": "Server Configuration Error: API Key Missing" })
            }
            (ProxyError::Provider(_) | ProxyError::Internal(_), style) => {
                let detail = if expose_details {
                    self.to_string()
                } else {
                    REDACTED_DETAIL.to_string()
                };
                match style {
                    ErrorStyle::Tagged => json!({ "error": "Proxy Error", "message": detail }),
                    ErrorStyle::Plain => json!({ "error": detail }),
                }
            }
        };

        (status, Json(body)).into_response()
    }
}
