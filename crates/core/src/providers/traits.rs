use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::asset::AssetCategory;
use crate::models::series::Observation;

/// Source of daily price history for the series store.
///
/// The engine never talks to a market-data API directly; whoever embeds it
/// supplies implementations of this trait (an HTTP client, a database, a
/// fixture). Several providers may serve the same category, in which case the
/// registry order decides who is asked first.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait SeriesProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Which asset categories this provider can serve.
    fn supported_categories(&self) -> Vec<AssetCategory>;

    /// Daily bars for `ticker` within `[from, to]`. Order does not matter;
    /// the store sorts and deduplicates.
    async fn fetch_history(
        &self,
        ticker: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Observation>, CoreError>;
}
