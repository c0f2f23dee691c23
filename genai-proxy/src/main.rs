use genai_proxy::config::ProxyConfig;
use genai_proxy::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let config = ProxyConfig::load();

    let log_level = config
        .as_ref()
        .map(|c| c.common.log_level.as_str())
        .unwrap_or("info");
    let otlp_endpoint = std::env::var("OTLP_ENDPOINT").ok();
    init_tracing("genai-proxy", log_level, otlp_endpoint.as_deref());

    let config = config.map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    app.run_until_stopped().await
}
