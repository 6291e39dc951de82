pub mod asset_classifier;
pub mod baseline_policy;
pub mod change_service;
pub mod lookback;
pub mod series_service;
