use serde::{Deserialize, Serialize};

/// Side of a two-party contest an answer stands for
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Party {
    Democratic,
    Republican,
    /// Third parties, independents and anything unrecognized
    #[default]
    Other,
}

impl Party {
    pub fn as_str(&self) -> &'static str {
        match self {
            Party::Democratic => "democratic",
            Party::Republican => "republican",
            Party::Other => "other",
        }
    }
}
