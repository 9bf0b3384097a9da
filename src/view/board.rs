use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Contract, Party, RegionContracts, RegionTable};
use crate::reference::ReferenceData;

use super::color::{color_for, mixed_color, party_color, MixedPalette, Palette, Rgb};
use super::electoral::{
    contract_ratio, electoral_ratio, electoral_tally, head_to_head, sort_by_differential, ElectoralTally,
};
use super::ranking::{rank_answers, sort_answers, AnswerSort, RankedAnswerList};
use super::title::{display_title, TitleTemplate};

/// One region of the electoral board, in differential order
#[derive(Debug, Clone, Serialize)]
pub struct RegionView {
    pub key: String,
    pub name: String,
    pub electoral_votes: u32,
    /// Subject extracted from the market question, or the raw question
    pub title: Option<String>,
    pub diff: f64,
    /// Whether the region has a usable head-to-head market
    pub has_data: bool,
    /// Democratic share of the two-party probability (0 without data)
    pub democratic_ratio: f64,
    pub color: Rgb,
    /// Two-sided map color (light blend for close races)
    pub map_color: Rgb,
}

/// View-model for the election dashboard
#[derive(Debug, Clone, Serialize)]
pub struct ElectionBoard {
    pub generated_at: DateTime<Utc>,
    /// Democratic share of expected electoral votes (needle position)
    pub democratic_ratio: f64,
    pub tally: ElectoralTally,
    pub regions: Vec<RegionView>,
    /// Ranked answers of the headline contract, if one was supplied
    pub headline: Option<RankedAnswerList>,
    /// Party card color of each displayed headline answer, in display order
    pub headline_colors: Vec<Rgb>,
}

impl ElectionBoard {
    /// Build the board from a snapshot of region contracts
    pub fn build(
        contracts: &RegionContracts,
        reference: &ReferenceData,
        palette: &Palette,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let regions = reference.region_table();
        let tally = electoral_tally(contracts, &regions);

        let mixed = MixedPalette::default();

        let views = sort_by_differential(contracts, Some(&reference.other_caucus))
            .into_iter()
            .map(|standing| {
                region_view(standing.key, standing.contract, standing.diff, &regions, palette, &mixed)
            })
            .collect();

        Self {
            generated_at,
            democratic_ratio: electoral_ratio(contracts, &regions, Party::Democratic, Party::Republican),
            tally,
            regions: views,
            headline: None,
            headline_colors: Vec::new(),
        }
    }

    /// Attach the ranked answers of a headline contract
    pub fn with_headline(mut self, contract: &Contract, max_answers: Option<usize>) -> Self {
        let ranked = rank_answers(
            &contract.answers,
            contract.resolutions.as_ref(),
            contract.should_answers_sum_to_one,
            max_answers,
        );
        self.set_headline(ranked);
        self
    }

    /// Reorder the displayed headline answers for a table view
    pub fn sort_headline(mut self, sort: AnswerSort) -> Self {
        if let Some(mut ranked) = self.headline.take() {
            ranked.displayed = sort_answers(&ranked.displayed, sort);
            self.set_headline(ranked);
        }
        self
    }

    /// Regions with no usable market yet
    pub fn regions_without_data(&self) -> usize {
        self.regions.iter().filter(|r| !r.has_data).count()
    }

    fn set_headline(&mut self, ranked: RankedAnswerList) {
        self.headline_colors = ranked.displayed.iter().map(|a| party_color(a.party)).collect();
        self.headline = Some(ranked);
    }
}

fn region_view(
    key: &str,
    contract: Option<&Contract>,
    diff: f64,
    regions: &RegionTable,
    palette: &Palette,
    mixed: &MixedPalette,
) -> RegionView {
    let info = regions.get(key);
    let has_data = contract.and_then(head_to_head).is_some();
    let democratic_ratio = contract_ratio(contract, Party::Democratic, Party::Republican);

    // Regions without data stay neutral; otherwise warm means a Republican lean
    let (color, map_color) = if has_data {
        (
            color_for(Some(democratic_ratio), false, palette),
            mixed_color(1.0 - democratic_ratio, mixed),
        )
    } else {
        (palette.neutral, palette.neutral)
    };

    RegionView {
        key: key.to_string(),
        name: info.map(|r| r.name.clone()).unwrap_or_else(|| key.to_string()),
        electoral_votes: info.map(|r| r.electoral_votes).unwrap_or(0),
        title: contract.map(|c| display_title(&c.question, TitleTemplate::PresidencyInState)),
        diff,
        has_data,
        democratic_ratio,
        color,
        map_color,
    }
}
