use perpcorr_server::{config::ServerConfig, init_logging, router, state::AppState};
use std::net::SocketAddr;
use tracing::info;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    init_logging();

    let config = ServerConfig::from_env();
    info!(?config, "loaded configuration");

    let addr: SocketAddr = format!("{}:{}", config.bind, config.port)
        .parse()
        .expect("invalid bind address");

    let state = AppState::new(config).expect("invalid upstream url");
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");
    info!(%addr, "perpcorr server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received, stopping gracefully");
}
