use thiserror::Error;

/// Errors parsing configured colors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid hex color '{0}': expected #rrggbb")]
    InvalidHex(String),
}

/// Errors loading or validating the election reference data
#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("failed to read reference data: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to parse reference data: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("duplicate region key: {0}")]
    DuplicateRegion(String),

    #[error("caucus entry for unknown region: {0}")]
    UnknownCaucusRegion(String),

    #[error("region {0} cannot caucus with \"other\"")]
    InvalidCaucusSide(String),
}
