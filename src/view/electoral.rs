use serde::Serialize;

use crate::models::{Contract, OtherCaucus, Party, RegionContracts, RegionTable};

/// Probabilities of the two major sides (and everything else) in one race
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeadToHead {
    pub democratic: f64,
    pub republican: f64,
    /// Sum over answers that are neither major party
    pub other: f64,
}

impl HeadToHead {
    pub fn get(&self, party: Party) -> f64 {
        match party {
            Party::Democratic => self.democratic,
            Party::Republican => self.republican,
            Party::Other => self.other,
        }
    }
}

/// A region in differential order
#[derive(Debug, Clone, Copy)]
pub struct RegionStanding<'a> {
    pub key: &'a str,
    pub contract: Option<&'a Contract>,
    /// Democratic minus Republican probability, after caucus adjustment
    pub diff: f64,
}

/// Expected electoral votes per side
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ElectoralTally {
    pub democratic: f64,
    pub republican: f64,
}

/// Share of side A among two opposing probabilities; 0 when either is missing
pub fn ratio(prob_a: Option<f64>, prob_b: Option<f64>) -> f64 {
    match (prob_a, prob_b) {
        (Some(a), Some(b)) if a + b > 0.0 => a / (a + b),
        _ => 0.0,
    }
}

/// Both major sides of a multi-answer race, if the contract has them
pub fn head_to_head(contract: &Contract) -> Option<HeadToHead> {
    if !contract.is_multi_answer() {
        return None;
    }

    let mut democratic = None;
    let mut republican = None;
    let mut other = 0.0;

    for answer in &contract.answers {
        let prob = answer.display_probability();
        match answer.party {
            Party::Democratic if democratic.is_none() => democratic = Some(prob),
            Party::Republican if republican.is_none() => republican = Some(prob),
            // Repeated major-party answers count with the rest
            _ => other += prob,
        }
    }

    Some(HeadToHead {
        democratic: democratic?,
        republican: republican?,
        other,
    })
}

/// Share of `side_a` against `side_b` in one region; 0 without usable data
pub fn contract_ratio(contract: Option<&Contract>, side_a: Party, side_b: Party) -> f64 {
    match contract.and_then(head_to_head) {
        Some(h2h) => ratio(Some(h2h.get(side_a)), Some(h2h.get(side_b))),
        None => 0.0,
    }
}

/// Expected electoral votes: each region contributes its votes times each side's probability
pub fn electoral_tally(contracts: &RegionContracts, regions: &RegionTable) -> ElectoralTally {
    let mut tally = ElectoralTally::default();

    for (key, contract) in contracts {
        let Some(region) = regions.get(key) else {
            continue;
        };
        let Some(h2h) = contract.as_ref().and_then(head_to_head) else {
            continue;
        };

        let votes = f64::from(region.electoral_votes);
        tally.democratic += votes * h2h.democratic;
        tally.republican += votes * h2h.republican;
    }

    tally
}

/// Aggregate share of `side_a` in the electoral college; 0 when nothing is usable
pub fn electoral_ratio(
    contracts: &RegionContracts,
    regions: &RegionTable,
    side_a: Party,
    side_b: Party,
) -> f64 {
    let tally = electoral_tally(contracts, regions);
    let side = |party: Party| match party {
        Party::Democratic => Some(tally.democratic),
        Party::Republican => Some(tally.republican),
        Party::Other => None,
    };

    ratio(side(side_a), side(side_b))
}

/// Signed Democratic lead in one region, with the "Other" answer moved to the
/// side it caucuses with
pub fn differential(key: &str, contract: Option<&Contract>, adjustments: Option<&OtherCaucus>) -> f64 {
    let Some(h2h) = contract.and_then(head_to_head) else {
        return 0.0;
    };

    let caucus = adjustments.and_then(|a| a.get(key)).copied();
    let (dem_adjust, rep_adjust) = match caucus {
        Some(Party::Democratic) => (h2h.other, 0.0),
        Some(Party::Republican) => (0.0, h2h.other),
        Some(Party::Other) | None => (0.0, 0.0),
    };

    (h2h.democratic + dem_adjust) - (h2h.republican + rep_adjust)
}

/// Regions ordered by Democratic lead, most Democratic first.
///
/// Regions without a usable contract have a differential of 0; ties keep the
/// map's key order.
pub fn sort_by_differential<'a>(
    contracts: &'a RegionContracts,
    adjustments: Option<&OtherCaucus>,
) -> Vec<RegionStanding<'a>> {
    let mut standings: Vec<RegionStanding<'a>> = contracts
        .iter()
        .map(|(key, contract)| RegionStanding {
            key: key.as_str(),
            contract: contract.as_ref(),
            diff: differential(key, contract.as_ref(), adjustments),
        })
        .collect();

    standings.sort_by(|a, b| b.diff.total_cmp(&a.diff));
    standings
}
