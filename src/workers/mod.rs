pub mod board_refresher;

pub use board_refresher::{BoardRefresherWorker, SharedBoard};
