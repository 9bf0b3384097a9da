use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::party::Party;

/// Static metadata for one region (US state or district)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionInfo {
    /// Region key, e.g. "GA"
    pub key: String,

    /// Full name, e.g. "Georgia"
    pub name: String,

    /// Electoral college votes
    pub electoral_votes: u32,

    /// Slug of the region's market, if one exists
    #[serde(default)]
    pub slug: Option<String>,
}

/// Region key -> side the region's "Other" answer caucuses with
pub type OtherCaucus = HashMap<String, Party>;

/// Ordered region metadata, indexed by key
#[derive(Debug, Clone, Default)]
pub struct RegionTable {
    regions: Vec<RegionInfo>,
    by_key: HashMap<String, usize>,
}

impl RegionTable {
    /// Build a table; later duplicates are ignored by `get` lookups
    pub fn new(regions: Vec<RegionInfo>) -> Self {
        let mut by_key = HashMap::with_capacity(regions.len());
        for (i, region) in regions.iter().enumerate() {
            by_key.entry(region.key.clone()).or_insert(i);
        }
        Self { regions, by_key }
    }

    pub fn get(&self, key: &str) -> Option<&RegionInfo> {
        self.by_key.get(key).map(|&i| &self.regions[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegionInfo> {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn total_electoral_votes(&self) -> u32 {
        self.regions.iter().map(|r| r.electoral_votes).sum()
    }
}
