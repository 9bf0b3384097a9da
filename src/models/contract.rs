use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::answer::Answer;

/// Market mechanism, as tagged by the backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Mechanism {
    /// Single YES/NO market
    #[serde(rename = "cpmm-1")]
    Binary,
    /// Market with several answers
    #[serde(rename = "cpmm-multi-1")]
    MultiAnswer,
    #[serde(other)]
    Other,
}

/// A market snapshot (binary or multi-answer)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    /// Contract identifier
    pub id: String,

    /// URL slug
    pub slug: String,

    /// Market question/title
    pub question: String,

    pub mechanism: Mechanism,

    /// Current YES probability for binary markets
    #[serde(default)]
    pub probability: Option<f64>,

    /// Answers for multi-answer markets
    #[serde(default)]
    pub answers: Vec<Answer>,

    /// Contract-level resolution (an answer id, "MKT", "CANCEL", ...)
    #[serde(default)]
    pub resolution: Option<String>,

    /// Percentage allocated to each answer id on resolution
    #[serde(default)]
    pub resolutions: Option<HashMap<String, f64>>,

    /// Whether answer probabilities sum to one
    #[serde(default)]
    pub should_answers_sum_to_one: bool,
}

impl Contract {
    /// Probability an answer resolved to, or `None` while the contract is open
    pub fn resolved_probability(&self, answer_id: &str) -> Option<f64> {
        let resolution = self.resolution.as_deref()?;

        if resolution == answer_id {
            return Some(1.0);
        }

        let percent = self
            .resolutions
            .as_ref()
            .and_then(|r| r.get(answer_id))
            .copied()
            .unwrap_or(0.0);

        Some(percent / 100.0)
    }

    pub fn is_multi_answer(&self) -> bool {
        self.mechanism == Mechanism::MultiAnswer
    }
}

/// Region key (e.g., "GA") -> contract, `None` while no market exists
pub type RegionContracts = BTreeMap<String, Option<Contract>>;

#[cfg(test)]
mod tests {
    use super::*;

    fn contract() -> Contract {
        Contract {
            id: "c1".to_string(),
            slug: "which-party-wins-georgia".to_string(),
            question: "Which party will win the US Presidency in Georgia?".to_string(),
            mechanism: Mechanism::MultiAnswer,
            probability: None,
            answers: Vec::new(),
            resolution: None,
            resolutions: None,
            should_answers_sum_to_one: true,
        }
    }

    #[test]
    fn test_resolved_probability() {
        let mut c = contract();
        assert_eq!(c.resolved_probability("dem"), None);

        c.resolution = Some("dem".to_string());
        assert_eq!(c.resolved_probability("dem"), Some(1.0));
        assert_eq!(c.resolved_probability("rep"), Some(0.0));

        c.resolution = Some("MKT".to_string());
        c.resolutions = Some(HashMap::from([("rep".to_string(), 70.0)]));
        assert_eq!(c.resolved_probability("rep"), Some(0.7));
        assert_eq!(c.resolved_probability("dem"), Some(0.0));
    }

    #[test]
    fn test_mechanism_wire_tags() {
        let m: Mechanism = serde_json::from_str("\"cpmm-multi-1\"").unwrap();
        assert_eq!(m, Mechanism::MultiAnswer);
        let m: Mechanism = serde_json::from_str("\"dpm-2\"").unwrap();
        assert_eq!(m, Mechanism::Other);
    }
}
