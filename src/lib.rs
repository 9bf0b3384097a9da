pub mod api;
pub mod config;
pub mod error;
pub mod matching;
pub mod models;
pub mod reference;
pub mod view;
pub mod workers;
