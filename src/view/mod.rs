//! Pure view-model computations over market snapshots.

pub mod board;
pub mod color;
pub mod electoral;
pub mod ranking;
pub mod title;

pub use board::{ElectionBoard, RegionView};
pub use color::{color_for, mixed_color, party_color, MixedPalette, Palette, Rgb};
pub use electoral::{
    contract_ratio, electoral_ratio, electoral_tally, head_to_head, ratio, sort_by_differential,
    ElectoralTally, HeadToHead, RegionStanding,
};
pub use ranking::{rank_answers, rank_answers_by, sort_answers, AnswerSort, RankedAnswerList, Tiebreak};
pub use title::{display_title, extract_subject, TitleTemplate};
