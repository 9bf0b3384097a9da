use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::RwLock;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use election_board::api::MarketClient;
use election_board::config::Config;
use election_board::reference::ReferenceData;
use election_board::workers::{BoardRefresherWorker, SharedBoard};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "election_board=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting election-board");

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded");

    // Load reference data
    let reference = ReferenceData::load_from_file(&config.reference_data_path).with_context(|| {
        format!(
            "Failed to load reference data from {}",
            config.reference_data_path.display()
        )
    })?;
    let reference = Arc::new(reference);

    if reference.region_slugs().is_empty() {
        warn!("No region has a market slug configured, every region will be empty");
    }

    // Initialize API client
    let client = MarketClient::new(&config.manifold_api_url);
    info!("API client initialized");

    // Shared state
    let board: SharedBoard = Arc::new(RwLock::new(None));

    let refresher = BoardRefresherWorker::new(
        client,
        Arc::clone(&reference),
        Arc::clone(&board),
        config.headline_slug.clone(),
        config.max_answers,
        config.board_refresh_interval,
    );

    let refresher_handle = tokio::spawn(async move {
        refresher.run().await;
    });

    info!("Board refresher started");

    // Wait for shutdown signal
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        result = refresher_handle => {
            error!("Board refresher exited unexpectedly: {:?}", result);
        }
    }

    if let Some(board) = board.read().await.as_ref() {
        info!(
            "Last board: {:.1}% Democratic at {}",
            board.democratic_ratio * 100.0,
            board.generated_at
        );
    }

    info!("Shutting down election-board");
    Ok(())
}
