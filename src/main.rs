use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use nba_charts::api::{router, ApiState};
use nba_charts::config::Config;
use nba_charts::error::Result;
use nba_charts::scrape;
use nba_charts::teams::Registry;

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> Result<()> {
    let registry = Arc::new(Registry::new());
    let client = scrape::http_client()?;
    info!("Registry loaded: {} teams", registry.len());

    let state = ApiState { cfg: cfg.clone(), registry, client };
    let app = router(state);
    let bind_addr = format!("0.0.0.0:{}", cfg.api_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("HTTP API listening on {bind_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
