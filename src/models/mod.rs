pub mod answer;
pub mod contract;
pub mod party;
pub mod region;

pub use answer::{Answer, AnswerResolution};
pub use contract::{Contract, Mechanism, RegionContracts};
pub use party::Party;
pub use region::{OtherCaucus, RegionInfo, RegionTable};
