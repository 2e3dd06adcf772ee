use anyhow::Result;
use axum::Router;
use clap::Parser;
use sortwise_core::CatalogSources;
use sortwise_server::build_app;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Items table (CSV)
    #[arg(long, default_value = "./data/wastes.csv")]
    data: String,
    /// Bin configuration (JSON)
    #[arg(long, default_value = "./data/bins.config.json")]
    bins: String,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let app: Router = build_app(CatalogSources::new(&args.data, &args.bins))?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
