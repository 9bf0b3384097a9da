use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ReferenceError;
use crate::matching::{PartyAliasEntry, PartyResolver};
use crate::models::{OtherCaucus, Party, RegionInfo, RegionTable};

/// Static election reference data, loaded once at startup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceData {
    /// Candidate and party aliases
    #[serde(default)]
    pub parties: Vec<PartyAliasEntry>,

    /// Region metadata in display order
    pub regions: Vec<RegionInfo>,

    /// Regions whose "Other" answer caucuses with a major party
    #[serde(default)]
    pub other_caucus: OtherCaucus,
}

impl ReferenceData {
    /// Load and validate reference data from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, ReferenceError> {
        let content = std::fs::read_to_string(path).map_err(ReferenceError::Read)?;
        let data = Self::from_json(&content)?;

        info!(
            "Loaded reference data: {} regions, {} caucus overrides",
            data.regions.len(),
            data.other_caucus.len()
        );

        Ok(data)
    }

    /// Parse and validate reference data from a JSON string
    pub fn from_json(content: &str) -> Result<Self, ReferenceError> {
        let data: ReferenceData = serde_json::from_str(content).map_err(ReferenceError::Parse)?;
        data.validate()?;
        Ok(data)
    }

    fn validate(&self) -> Result<(), ReferenceError> {
        let mut seen = HashSet::with_capacity(self.regions.len());
        for region in &self.regions {
            if !seen.insert(region.key.as_str()) {
                return Err(ReferenceError::DuplicateRegion(region.key.clone()));
            }
        }

        for (key, party) in &self.other_caucus {
            if !seen.contains(key.as_str()) {
                return Err(ReferenceError::UnknownCaucusRegion(key.clone()));
            }
            if *party == Party::Other {
                return Err(ReferenceError::InvalidCaucusSide(key.clone()));
            }
        }

        Ok(())
    }

    pub fn region_table(&self) -> RegionTable {
        RegionTable::new(self.regions.clone())
    }

    pub fn party_resolver(&self) -> PartyResolver {
        PartyResolver::from_entries(&self.parties)
    }

    /// Region key -> market slug, for regions that have a market
    pub fn region_slugs(&self) -> HashMap<&str, &str> {
        self.regions
            .iter()
            .filter_map(|r| r.slug.as_deref().map(|slug| (r.key.as_str(), slug)))
            .collect()
    }
}
