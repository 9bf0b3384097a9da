use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::models::{Answer, AnswerResolution, Contract, Mechanism, Party, RegionContracts, RegionTable};

/// Client for the public market API
pub struct MarketClient {
    client: Client,
    base_url: String,
}

/// Full market response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarketResponse {
    id: String,
    slug: String,
    question: String,
    mechanism: String,
    probability: Option<f64>,
    #[serde(default)]
    answers: Vec<AnswerResponse>,
    resolution: Option<String>,
    resolutions: Option<HashMap<String, f64>>,
    #[serde(default)]
    should_answers_sum_to_one: bool,
}

/// Answer within a multi-answer market
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnswerResponse {
    id: String,
    text: String,
    probability: Option<f64>,
    created_time: Option<i64>,
    index: Option<u32>,
    resolution: Option<String>,
    resolution_probability: Option<f64>,
    subsidy_pool: Option<f64>,
}

impl MarketClient {
    /// Create a new market client
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch a single contract by slug
    pub async fn fetch_contract(&self, slug: &str) -> Result<Contract> {
        let url = format!("{}/v0/slug/{}", self.base_url, urlencoding::encode(slug));
        debug!("Fetching contract from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .with_context(|| format!("Failed to fetch contract {}", slug))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("Market API error for {}: {} - {}", slug, status, text);
        }

        let market: MarketResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to parse contract {}", slug))?;

        Ok(convert_market(market))
    }

    /// Fetch every region that has a market slug; failed regions map to `None`
    pub async fn fetch_region_contracts(&self, regions: &RegionTable) -> RegionContracts {
        let mut contracts = RegionContracts::new();

        for region in regions.iter() {
            let contract = match region.slug.as_deref() {
                Some(slug) => match self.fetch_contract(slug).await {
                    Ok(contract) => Some(contract),
                    Err(e) => {
                        warn!("Failed to fetch region {}: {:#}", region.key, e);
                        None
                    }
                },
                None => None,
            };
            contracts.insert(region.key.clone(), contract);
        }

        let fetched = contracts.values().filter(|c| c.is_some()).count();
        info!("Fetched {}/{} region contracts", fetched, contracts.len());

        contracts
    }
}

/// Convert API market response to our model
fn convert_market(market: MarketResponse) -> Contract {
    let mechanism = match market.mechanism.as_str() {
        "cpmm-1" => Mechanism::Binary,
        "cpmm-multi-1" => Mechanism::MultiAnswer,
        _ => Mechanism::Other,
    };

    let answers = market.answers.into_iter().map(convert_answer).collect();

    Contract {
        id: market.id,
        slug: market.slug,
        question: market.question,
        mechanism,
        probability: market.probability,
        answers,
        resolution: market.resolution,
        resolutions: market.resolutions,
        should_answers_sum_to_one: market.should_answers_sum_to_one,
    }
}

fn convert_answer(answer: AnswerResponse) -> Answer {
    let resolution = answer.resolution.as_deref().and_then(|r| match r {
        "YES" => Some(AnswerResolution::Yes),
        "NO" => Some(AnswerResolution::No),
        "MKT" => Some(AnswerResolution::Mkt),
        "CANCEL" => Some(AnswerResolution::Cancel),
        other => {
            warn!("Unknown answer resolution {} on {}", other, answer.id);
            None
        }
    });

    let created_time = answer
        .created_time
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .unwrap_or_default();

    Answer {
        id: answer.id,
        text: answer.text.trim().to_string(),
        prob: answer.probability.unwrap_or(0.0),
        created_time,
        resolution,
        resolution_probability: answer.resolution_probability,
        index: answer.index,
        subsidy_pool: answer.subsidy_pool,
        party: Party::Other,
    }
}
