use std::path::PathBuf;

use kakaomap_server::config;
use kakaomap_server::kakao::KakaoClient;
use kakaomap_server::mcp::{self, KakaoMapServer};
use kakaomap_server::telemetry;
use kakaomap_server::tools::{self, ToolHandlerContext, ToolRegistry};

#[tokio::main]
async fn main() {
    telemetry::init_tracing();

    tracing::info!("Kakao Map MCP server starting");

    // Load configuration; fail loudly on misconfiguration.
    let config_dir = std::env::var("KAKAOMAP_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"));

    let runtime_config = match config::load_config(&config_dir) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration, refusing to start");
            std::process::exit(1);
        }
    };
    let settings = &runtime_config.settings;

    let kakao = match KakaoClient::new(&settings.kakao, &runtime_config.api_key) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create mapping API client");
            std::process::exit(1);
        }
    };

    let mut registry = ToolRegistry::new(ToolHandlerContext { kakao });
    if let Err(e) = tools::register_tools(&mut registry, &settings.tools) {
        tracing::error!(error = %e, "Failed to register tools");
        std::process::exit(1);
    }

    // Metrics are optional; a bind failure does not stop tool serving.
    if let Some(port) = settings.telemetry.metrics_port {
        if let Err(e) = telemetry::spawn_metrics_server(port).await {
            tracing::warn!(error = %e, port, "Metrics endpoint disabled");
        }
    }

    let server = KakaoMapServer::new(settings.server.clone(), registry);

    tracing::info!(name = %settings.server.name, "Serving MCP on stdio");

    if let Err(e) = mcp::run_stdio(server).await {
        tracing::error!(error = %e, "MCP session failed");
        std::process::exit(1);
    }

    tracing::info!("Kakao Map MCP server stopped");
}
