use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use election_board::models::{Contract, RegionContracts};
use election_board::reference::ReferenceData;
use election_board::view::{AnswerSort, ElectionBoard, Palette};

const DEFAULT_REFERENCE: &str = "data/election_reference.json";
const DEFAULT_MAX_ANSWERS: usize = 4;

const USAGE: &str = "\
Usage: board_snapshot --input <snapshot.json> [--reference <path>] [--max-answers <n>] [--sort <order>]

  --sort    alphabetical | prob-asc | prob-desc (headline table order)

The snapshot is a JSON object in the crate's own snake_case model shape, not a
raw market API response (see demos/snapshot.json):

  {
    \"regions\": { \"GA\": <contract>, \"TX\": null, ... },
    \"headline\": <contract>                        (optional)
  }

  contract: id, slug, question, mechanism (\"cpmm-1\" | \"cpmm-multi-1\"),
            probability?, answers[], resolution?, resolutions?,
            should_answers_sum_to_one?
  answer:   id, text, prob, created_time (RFC 3339), resolution?
            (YES | NO | MKT | CANCEL), resolution_probability?, index?,
            subsidy_pool?
";

/// Snapshot file: region contracts plus an optional headline contract
#[derive(Debug, Deserialize)]
struct Snapshot {
    regions: RegionContracts,
    #[serde(default)]
    headline: Option<Contract>,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "board_snapshot=info,election_board=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse arguments
    let args: Vec<String> = env::args().collect();
    let input = arg_value(&args, "--input", "-i")
        .map(PathBuf::from)
        .context(USAGE)?;
    let reference_path = arg_value(&args, "--reference", "-r")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_REFERENCE));
    let max_answers = arg_value(&args, "--max-answers", "-n")
        .map(|v| v.parse::<usize>())
        .transpose()
        .context("--max-answers must be a valid number")?
        .unwrap_or(DEFAULT_MAX_ANSWERS);
    let sort = arg_value(&args, "--sort", "-s")
        .map(parse_sort)
        .transpose()?;

    let reference = ReferenceData::load_from_file(&reference_path).with_context(|| {
        format!("Failed to load reference data from {}", reference_path.display())
    })?;
    let mut snapshot = load_snapshot(&input)?;

    info!(
        "Loaded snapshot with {} regions ({} with contracts)",
        snapshot.regions.len(),
        snapshot.regions.values().filter(|c| c.is_some()).count()
    );

    // Tag answers with their party once, before any aggregation
    let resolver = reference.party_resolver();
    for contract in snapshot.regions.values_mut().flatten() {
        resolver.tag_contract(contract);
    }

    let mut board = ElectionBoard::build(&snapshot.regions, &reference, &Palette::default(), Utc::now());

    if let Some(mut headline) = snapshot.headline.take() {
        resolver.tag_contract(&mut headline);
        board = board.with_headline(&headline, Some(max_answers));
    }
    if let Some(sort) = sort {
        board = board.sort_headline(sort);
    }

    info!(
        "Board built: {:.1}% Democratic across {} regions",
        board.democratic_ratio * 100.0,
        board.regions.len()
    );

    println!("{}", serde_json::to_string_pretty(&board)?);

    Ok(())
}

/// Value following `long` or `short` in the argument list
fn arg_value<'a>(args: &'a [String], long: &str, short: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == long || arg == short)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_sort(value: &str) -> Result<AnswerSort> {
    serde_json::from_value(serde_json::Value::String(value.to_string()))
        .with_context(|| format!("Unknown sort order: {}", value))
}

fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;

    parse_snapshot(&content)
}

fn parse_snapshot(content: &str) -> Result<Snapshot> {
    serde_json::from_str(content).context("Failed to parse snapshot JSON (run without --input for the schema)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_snapshot_parses() {
        let snapshot = parse_snapshot(include_str!("../../demos/snapshot.json")).unwrap();

        assert_eq!(snapshot.regions.len(), 5);
        assert!(snapshot.regions["TX"].is_none());
        assert!(snapshot.headline.is_some());
    }

    #[test]
    fn test_raw_api_shape_is_rejected() {
        let raw = r#"{"regions": {"GA": {"id": "ga", "slug": "ga", "question": "Q?",
            "mechanism": "cpmm-multi-1",
            "answers": [{"id": "a", "text": "Democratic Party", "prob": 0.5, "createdTime": 1704067200000}]}}}"#;

        assert!(parse_snapshot(raw).is_err());
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!(parse_sort("prob-desc").unwrap(), AnswerSort::ProbDesc);
        assert_eq!(parse_sort("alphabetical").unwrap(), AnswerSort::Alphabetical);
        assert!(parse_sort("random").is_err());
    }
}
