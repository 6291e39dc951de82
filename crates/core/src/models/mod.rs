pub mod asset;
pub mod change;
pub mod period;
pub mod series;
pub mod settings;
pub mod watchlist;
