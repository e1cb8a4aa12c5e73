use std::{
    net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr},
    time::Duration,
};

use anyhow::Context;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod config;

pub use config::Config;

const DEFAULT_LOG_FILTER: &str = "agentnet=info,tower_http=warn";
const HEALTHCHECK_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Docker HEALTHCHECK entry point: hit /ping and exit immediately.
    if std::env::args().nth(1).as_deref() == Some("--healthcheck") {
        return healthcheck().await;
    }

    let config = Config::from_env()?;

    let filter = log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok(), &config)?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let addr = config.listen_addr()?;
    info!(%addr, version = env!("CARGO_PKG_VERSION"), "agentnet starting");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    info!(%addr, "listening");

    axum::serve(listener, api::router())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}

/// Pick the log filter: `RUST_LOG`, then the config's `log_level`, then
/// [`DEFAULT_LOG_FILTER`]. A directive that does not parse is a startup error.
fn log_filter(rust_log: Option<String>, config: &Config) -> anyhow::Result<EnvFilter> {
    if let Some(directive) = rust_log.filter(|v| !v.trim().is_empty()) {
        return EnvFilter::try_new(&directive)
            .with_context(|| format!("invalid {} `{directive}`", EnvFilter::DEFAULT_ENV));
    }
    match config.server.log_level.as_deref() {
        Some(level) => {
            EnvFilter::try_new(level).with_context(|| format!("invalid log_level `{level}`"))
        }
        None => Ok(EnvFilter::new(DEFAULT_LOG_FILTER)),
    }
}

/// Lightweight healthcheck: GET /ping and exit 0 on 2xx, 1 otherwise.
/// Invoked via `agentnet --healthcheck` from Docker HEALTHCHECK.
async fn healthcheck() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let url = ping_url(config.listen_addr()?);

    if check_ping(&url, HEALTHCHECK_TIMEOUT).await? {
        std::process::exit(0);
    } else {
        std::process::exit(1);
    }
}

/// `true` when `url` answers 2xx within `timeout`.
async fn check_ping(url: &str, timeout: Duration) -> anyhow::Result<bool> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("building healthcheck client")?;
    let resp = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("GET {url}"))?;
    Ok(resp.status().is_success())
}

/// URL the healthcheck requests. Wildcard binds are reached over loopback.
fn ping_url(listen: SocketAddr) -> String {
    let host = match listen.ip() {
        IpAddr::V4(ip) if ip.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
        IpAddr::V6(ip) if ip.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
        ip => ip,
    };
    format!("http://{}/ping", SocketAddr::new(host, listen.port()))
}
