mod config;
mod errors;
mod models;
mod server;
mod state;

use crate::state::AppState;

#[tokio::main]
async fn main() {
    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("range_calc starting");

    // Load config
    let cfg = match config::AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("config error: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        trading_days = models::range::TRADING_DAYS_PER_YEAR,
        holding_days = models::range::HOLDING_PERIOD_DAYS,
        dashboard = %cfg.dashboard_dir.display(),
        "calculator configured"
    );

    let addr = cfg.bind_addr();
    let app = server::router(AppState::new(cfg));

    if let Err(e) = serve(&addr, app).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

async fn serve(addr: &str, app: axum::Router) -> errors::CalcResult<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| errors::CalcError::Server(format!("bind {addr}: {e}")))?;

    tracing::info!("server listening on {addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
