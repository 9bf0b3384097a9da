use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Market API base URL
    pub manifold_api_url: String,

    /// Interval in seconds between board refreshes
    pub board_refresh_interval: u64,

    /// Path to the election reference data JSON
    pub reference_data_path: PathBuf,

    /// Slug of the headline (national) contract, if any
    pub headline_slug: Option<String>,

    /// Maximum answers shown for the headline contract
    pub max_answers: Option<usize>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            manifold_api_url: env::var("MANIFOLD_API_URL")
                .unwrap_or_else(|_| "https://api.manifold.markets".to_string()),

            board_refresh_interval: env::var("BOARD_REFRESH_INTERVAL")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .context("BOARD_REFRESH_INTERVAL must be a valid number")?,

            reference_data_path: env::var("REFERENCE_DATA_PATH")
                .unwrap_or_else(|_| "data/election_reference.json".to_string())
                .into(),

            headline_slug: env::var("HEADLINE_SLUG").ok().filter(|s| !s.is_empty()),

            max_answers: parse_max_answers(env::var("MAX_ANSWERS").ok().as_deref())?,
        })
    }
}

/// Unset means the default of 4; "0" or "all" means unlimited
fn parse_max_answers(value: Option<&str>) -> Result<Option<usize>> {
    match value.map(str::trim) {
        None | Some("") => Ok(Some(4)),
        Some("0") | Some("all") => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .context("MAX_ANSWERS must be a valid number"),
    }
}
