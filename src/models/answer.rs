use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::party::Party;

/// Terminal resolution recorded on a single answer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum AnswerResolution {
    Yes,
    No,
    /// Resolved to the market probability (or an explicit one)
    Mkt,
    Cancel,
}

/// One selectable outcome within a multi-answer market
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// Answer identifier, unique within its contract
    pub id: String,

    /// Display text (e.g., "Democratic Party", "Kamala Harris")
    pub text: String,

    /// Current probability (0.0 - 1.0)
    pub prob: f64,

    /// When the answer was added
    pub created_time: DateTime<Utc>,

    /// Terminal resolution, if the answer has resolved
    #[serde(default)]
    pub resolution: Option<AnswerResolution>,

    /// Probability the answer resolved to when resolution is MKT
    #[serde(default)]
    pub resolution_probability: Option<f64>,

    /// Creation order within the contract
    #[serde(default)]
    pub index: Option<u32>,

    /// Subsidy pool amount for independent binary answers
    #[serde(default)]
    pub subsidy_pool: Option<f64>,

    /// Side this answer represents, assigned once at ingestion
    #[serde(default)]
    pub party: Party,
}

impl Answer {
    /// Probability to display, taking a terminal resolution into account
    pub fn display_probability(&self) -> f64 {
        match self.resolution {
            Some(AnswerResolution::Yes) => 1.0,
            Some(AnswerResolution::No) => 0.0,
            Some(AnswerResolution::Mkt) => self.resolution_probability.unwrap_or(self.prob),
            Some(AnswerResolution::Cancel) | None => self.prob,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolution.is_some()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::TimeZone;

    use super::*;

    pub fn answer(id: &str, prob: f64) -> Answer {
        Answer {
            id: id.to_string(),
            text: id.to_string(),
            prob,
            created_time: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            resolution: None,
            resolution_probability: None,
            index: None,
            subsidy_pool: None,
            party: Party::Other,
        }
    }

    pub fn party_answer(id: &str, party: Party, prob: f64) -> Answer {
        Answer {
            party,
            ..answer(id, prob)
        }
    }
}
