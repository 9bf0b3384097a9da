use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::{Contract, Party};

/// Resolves answer texts (party or candidate names) to a side
#[derive(Debug, Clone)]
pub struct PartyResolver {
    /// Map of lowercase alias -> party
    aliases: HashMap<String, Party>,
}

/// Alias configuration for one party
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyAliasEntry {
    pub party: Party,
    /// Names that should resolve to this party (candidates, abbreviations, ...)
    pub aliases: Vec<String>,
}

impl PartyResolver {
    /// Create a resolver that knows only the two major party names
    pub fn new() -> Self {
        let mut resolver = Self {
            aliases: HashMap::new(),
        };
        resolver.add_alias("Democratic Party", Party::Democratic);
        resolver.add_alias("Republican Party", Party::Republican);
        resolver
    }

    /// Create a resolver from configured alias entries, on top of the defaults
    pub fn from_entries(entries: &[PartyAliasEntry]) -> Self {
        let mut resolver = Self::new();

        for entry in entries {
            for alias in &entry.aliases {
                resolver.add_alias(alias, entry.party);
            }
        }

        info!("Loaded {} party alias mappings", resolver.aliases.len());
        resolver
    }

    /// Resolve a name to its party; unknown names are `Party::Other`
    pub fn resolve(&self, name: &str) -> Party {
        let lower = name.trim().to_lowercase();

        self.aliases.get(&lower).copied().unwrap_or(Party::Other)
    }

    /// Assign a party to every answer of the contract that is still untagged
    pub fn tag_contract(&self, contract: &mut Contract) {
        for answer in contract
            .answers
            .iter_mut()
            .filter(|a| a.party == Party::Other)
        {
            answer.party = self.resolve(&answer.text);
        }

        debug!(
            "Tagged {} answers for contract {}",
            contract.answers.len(),
            contract.slug
        );
    }

    /// Add a new alias mapping
    pub fn add_alias(&mut self, alias: &str, party: Party) {
        self.aliases.insert(alias.trim().to_lowercase(), party);
    }
}

impl Default for PartyResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::answer::fixtures::answer;
    use crate::models::Mechanism;

    #[test]
    fn test_resolve() {
        let mut resolver = PartyResolver::new();
        resolver.add_alias("Harris", Party::Democratic);
        resolver.add_alias("Trump", Party::Republican);

        assert_eq!(resolver.resolve("Democratic Party"), Party::Democratic);
        assert_eq!(resolver.resolve("  harris "), Party::Democratic);
        assert_eq!(resolver.resolve("TRUMP"), Party::Republican);
        assert_eq!(resolver.resolve("Other"), Party::Other); // Unknown stays other
    }

    #[test]
    fn test_tag_contract_keeps_existing_tags() {
        let resolver = PartyResolver::new();
        let mut dem = answer("d", 0.5);
        dem.text = "Democratic Party".to_string();
        let mut independent = answer("i", 0.1);
        independent.text = "Angus King".to_string();
        independent.party = Party::Democratic;

        let mut contract = Contract {
            id: "c".to_string(),
            slug: "maine".to_string(),
            question: "q".to_string(),
            mechanism: Mechanism::MultiAnswer,
            probability: None,
            answers: vec![dem, independent],
            resolution: None,
            resolutions: None,
            should_answers_sum_to_one: true,
        };

        resolver.tag_contract(&mut contract);

        assert_eq!(contract.answers[0].party, Party::Democratic);
        assert_eq!(contract.answers[1].party, Party::Democratic);
    }
}
