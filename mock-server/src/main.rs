use std::env;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,mock_server=debug";

/// Filter precedence: `RUST_LOG`, then `MOCK_SERVER_LOG`, then the built-in default.
fn filter_from_env() -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    env::var("MOCK_SERVER_LOG")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_target(true)
        .with_env_filter(filter_from_env())
        .init();

    let settings = mock_server::Settings::from_env()?;
    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, redirect = settings.redirect, "listening");
    mock_server::run_with(listener, settings).await?;
    Ok(())
}
