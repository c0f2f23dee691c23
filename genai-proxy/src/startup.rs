//! Application startup and lifecycle management.
//!
//! One router serves `/health` plus the three proxy endpoints. Each endpoint route
//! carries its own CORS middleware and handler state.

use crate::config::ProxyConfig;
use crate::endpoints::EndpointProfile;
use crate::error::API_KEY_ENV;
use crate::handlers::{self, ProxyState};
use crate::services::{ContentProvider, CredentialSource, EnvCredential, GeminiClient};
use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    middleware::{from_fn, from_fn_with_state},
    routing::{any, get},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::cors::cors_middleware;
use service_core::middleware::tracing::{request_id_middleware, REQUEST_ID_HEADER};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Build the HTTP router around the given upstream provider and credential source.
pub fn build_router(
    config: &ProxyConfig,
    provider: Arc<dyn ContentProvider>,
    credentials: Arc<dyn CredentialSource>,
) -> Router {
    let mut router = Router::new().route("/health", get(handlers::health_check));

    for profile in EndpointProfile::all(config) {
        let path = profile.path;
        let cors = Arc::new(profile.cors.clone());

        tracing::info!(
            endpoint = profile.name,
            path = path,
            model = %profile.model,
            "Registered proxy endpoint"
        );

        let state = ProxyState {
            profile: Arc::new(profile),
            provider: provider.clone(),
            credentials: credentials.clone(),
            expose_error_details: config.expose_error_details,
        };

        router = router.route(
            path,
            any(handlers::proxy_handler)
                .layer(from_fn_with_state(cors, cors_middleware))
                .with_state(state),
        );
    }

    router
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(config.limits.max_body_bytes))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: ProxyConfig) -> Result<Self, AppError> {
        let provider: Arc<dyn ContentProvider> = Arc::new(
            GeminiClient::new(&config.gemini).map_err(|e| {
                tracing::error!("Failed to create Gemini client: {}", e);
                AppError::Startup(anyhow::Error::new(e))
            })?,
        );
        let credentials: Arc<dyn CredentialSource> = Arc::new(EnvCredential::new(API_KEY_ENV));

        tracing::info!(
            base_url = %config.gemini.base_url,
            timeout_secs = ?config.gemini.request_timeout_secs,
            "Initialized Gemini client"
        );

        let router = build_router(&config, provider, credentials);

        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("genai-proxy listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}
