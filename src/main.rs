mod constants;
mod dataset;
mod error;
mod formatters;
mod models;
mod service;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::constants::{DEFAULT_HOST, DEFAULT_MEASUREMENTS_PATH, DEFAULT_PORT, DEFAULT_STATIONS_PATH};
use crate::dataset::WeatherDataset;
use crate::service::Weather;

#[derive(Parser, Debug)]
#[command(name = "honolulu-weather-api")]
#[command(about = "Serve historical Hawaii precipitation and temperature observations as JSON")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// Address to bind
    #[arg(long, env = "HAWAII_API_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "HAWAII_API_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Daily measurements CSV (station,date,prcp,tobs)
    #[arg(long, env = "HAWAII_MEASUREMENTS", default_value = DEFAULT_MEASUREMENTS_PATH)]
    measurements: PathBuf,

    /// Station metadata CSV (station,name,latitude,longitude,elevation)
    #[arg(long, env = "HAWAII_STATIONS", default_value = DEFAULT_STATIONS_PATH)]
    stations: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.debug {
        "honolulu_weather_api=debug"
    } else {
        "honolulu_weather_api=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Honolulu weather API");

    let dataset = WeatherDataset::load(&args.measurements, &args.stations)
        .context("Failed to load weather dataset")?;
    let app = Weather::new(dataset).router();

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Received Ctrl+C, shutting down");
}
