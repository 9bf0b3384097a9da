pub mod manifold;

pub use manifold::MarketClient;
