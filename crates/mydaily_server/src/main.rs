//! Server entry point.

use anyhow::{anyhow, Context};
use clap::Parser;
use log::info;
use mydaily_core::{init_logging, SqliteStore};
use mydaily_server::{build_router, cors_layer, Settings};
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "mydaily_server", version, about = "MyDaily HTTP backend")]
struct Args {
    /// TOML settings file; `mydaily.toml` is read when present otherwise.
    #[arg(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let settings = Settings::load(args.config.as_deref()).context("failed to load settings")?;
    init_logging(&settings.log.level, settings.log.dir.as_deref())
        .map_err(|err| anyhow!("failed to init logging: {err}"))?;

    let store = SqliteStore::open(&settings.database.path)
        .with_context(|| format!("failed to open store `{}`", settings.database.path))?;
    let app = build_router(Arc::new(store)).layer(cors_layer(&settings));

    let addr = settings.server.bind_addr().map_err(|err| anyhow!(err))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(
        "event=server_start module=server status=ok addr={addr} environment={:?}",
        settings.server.environment
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated with an error")?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // Without a signal handler the server runs until killed.
        std::future::pending::<()>().await;
    }
}
