//! Service binary — starts the z/OS REST files and jobs server.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use zos_restfiles::config::ServiceConfig;
use zos_restfiles::handlers::build_router;
use zos_restfiles::state::AppState;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("zos_restfiles=info,zos_native=info,warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = std::env::args().collect();

    let mut config = if let Some(config_path) = get_arg(&args, "--config") {
        ServiceConfig::from_file(&config_path).unwrap_or_else(|e| {
            tracing::warn!(
                path = %config_path,
                error = %e,
                "Failed to load config, using defaults"
            );
            ServiceConfig::default()
        })
    } else {
        ServiceConfig::default()
    };
    config.apply_env();

    let bind_addr = config.bind_addr();
    let state = AppState::new(config);
    tracing::info!(
        bind_addr = %bind_addr,
        user = %state.config.backend.user,
        max_body_bytes = state.config.limits.max_body_bytes,
        "REST files service starting"
    );
    let router = build_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, router).await.expect("Server error");
}

/// Get the value of a CLI argument (e.g., --config path).
fn get_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1).cloned())
}
