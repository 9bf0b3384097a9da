pub mod party_resolver;

pub use party_resolver::{PartyAliasEntry, PartyResolver};
