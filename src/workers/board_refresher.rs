use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use tokio::sync::RwLock;
use tokio::time;
use tracing::{error, info, warn};

use crate::api::MarketClient;
use crate::matching::PartyResolver;
use crate::models::RegionTable;
use crate::reference::ReferenceData;
use crate::view::{ElectionBoard, Palette};

/// Latest board, shared with readers
pub type SharedBoard = Arc<RwLock<Option<ElectionBoard>>>;

/// Worker that periodically fetches region markets and rebuilds the board
pub struct BoardRefresherWorker {
    client: MarketClient,
    reference: Arc<ReferenceData>,
    regions: RegionTable,
    resolver: PartyResolver,
    palette: Palette,
    headline_slug: Option<String>,
    max_answers: Option<usize>,
    board: SharedBoard,
    refresh_interval: Duration,
}

impl BoardRefresherWorker {
    /// Create a new board refresher worker
    pub fn new(
        client: MarketClient,
        reference: Arc<ReferenceData>,
        board: SharedBoard,
        headline_slug: Option<String>,
        max_answers: Option<usize>,
        refresh_interval_secs: u64,
    ) -> Self {
        Self {
            client,
            regions: reference.region_table(),
            resolver: reference.party_resolver(),
            reference,
            palette: Palette::default(),
            headline_slug,
            max_answers,
            board,
            refresh_interval: Duration::from_secs(refresh_interval_secs),
        }
    }

    /// Run the worker loop
    pub async fn run(&self) {
        info!(
            "Board refresher started (interval: {:?})",
            self.refresh_interval
        );

        // Run initial refresh immediately
        self.refresh().await;

        let mut interval = time::interval(self.refresh_interval);
        interval.tick().await; // Skip first tick (already ran)

        loop {
            interval.tick().await;
            self.refresh().await;
        }
    }

    /// Perform a single refresh
    async fn refresh(&self) {
        match self.build_board().await {
            Ok(board) => {
                info!(
                    "Board refreshed: {:.1}% Democratic ({:.0} - {:.0} expected EV), {} regions without data",
                    board.democratic_ratio * 100.0,
                    board.tally.democratic,
                    board.tally.republican,
                    board.regions_without_data()
                );
                *self.board.write().await = Some(board);
            }
            Err(e) => {
                error!("Failed to refresh board: {:#}", e);
                warn!("Will retry on next interval");
            }
        }
    }

    async fn build_board(&self) -> Result<ElectionBoard> {
        let mut contracts = self.client.fetch_region_contracts(&self.regions).await;
        for contract in contracts.values_mut().flatten() {
            self.resolver.tag_contract(contract);
        }

        let board = ElectionBoard::build(&contracts, &self.reference, &self.palette, Utc::now());

        let Some(slug) = self.headline_slug.as_deref() else {
            return Ok(board);
        };

        let mut headline = self.client.fetch_contract(slug).await?;
        self.resolver.tag_contract(&mut headline);

        Ok(board.with_headline(&headline, self.max_answers))
    }
}
