//! Standalone album storefront server.

use std::net::SocketAddr;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use store_api::StoreServer;

#[derive(Parser, Debug)]
#[command(name = "store-api")]
#[command(about = "Album storefront used as a benchmark target")]
struct Args {
    /// Listen address
    #[arg(short, long, env = "STORE_LISTEN", default_value = "127.0.0.1:5000")]
    listen: SocketAddr,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let server = StoreServer::start(args.listen).await?;
    info!(address = %server.local_addr(), "Store API ready");

    tokio::signal::ctrl_c().await?;
    info!("Received shutdown signal");
    server.shutdown();

    Ok(())
}
