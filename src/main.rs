use crate::backend::BookingBackend;
use crate::booking_manager::BookingManager;
use crate::configuration::Configuration;
use crate::csv_store::CsvStore;
use crate::http::start_server;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod backend;
mod booking_manager;
mod configuration;
mod csv_store;
mod errors;
mod export;
mod http;
mod query;
#[cfg(test)]
mod testutils;
mod types;

/// Single-facility lab booking service.
#[derive(Debug, Parser)]
#[command(name = "lab-booking-manager")]
struct Args {
    /// Port to listen on.
    #[arg(long)]
    port: Option<u16>,
    /// Path of the CSV file holding the booking records.
    #[arg(long)]
    bookings_file: Option<PathBuf>,
}

#[derive(Clone)]
pub struct AppState<B: BookingBackend> {
    pub booking_manager: BookingManager<B>,
    pub configuration: Configuration,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let configuration = Configuration::load(args.port, args.bookings_file);

    let store = CsvStore::new(configuration.bookings_file.clone());
    if let Err(err) = store.ensure_initialized() {
        tracing::error!(error = %err, "failed to initialize booking storage");
        std::process::exit(1);
    }
    tracing::info!(path = %store.path().display(), "booking storage ready");

    let state = AppState {
        booking_manager: BookingManager::new(store),
        configuration,
    };
    start_server(state).await;
}
