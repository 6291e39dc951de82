use chrono::NaiveDate;
use log::{debug, warn};
use serde::Serialize;

use crate::errors::CoreError;
use crate::models::series::{PriceSeries, SeriesStore};
use crate::providers::registry::SeriesProviderRegistry;
use crate::services::asset_classifier::AssetClassifier;

/// A symbol whose history could not be refreshed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshFailure {
    pub symbol: String,
    pub message: String,
}

/// Outcome of one refresh pass, per symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RefreshSummary {
    pub refreshed: Vec<String>,
    pub failed: Vec<RefreshFailure>,
}

impl RefreshSummary {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Fills the series store from registered providers.
///
/// Fallback strategy:
/// - Providers are tried in registration order for the symbol's category.
/// - A provider error or an empty answer moves on to the next provider.
/// - A symbol nobody can serve is recorded as failed and left untouched in
///   the store; the rest of the batch carries on.
#[derive(Debug, Clone, Default)]
pub struct SeriesService {
    classifier: AssetClassifier,
}

impl SeriesService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh `symbols` with bars in `[from, to]`. On success the symbol's
    /// series is replaced as a whole.
    pub async fn refresh<S: AsRef<str>>(
        &self,
        registry: &SeriesProviderRegistry,
        store: &mut SeriesStore,
        symbols: &[S],
        from: NaiveDate,
        to: NaiveDate,
    ) -> RefreshSummary {
        let mut summary = RefreshSummary::default();

        for symbol in symbols {
            let symbol = symbol.as_ref();
            match self.fetch_series(registry, symbol, from, to).await {
                Ok(series) => {
                    debug!("refreshed {symbol}: {} bars", series.len());
                    store.set_series(symbol, series);
                    summary.refreshed.push(symbol.to_string());
                }
                Err(e) => {
                    warn!("failed to refresh {symbol}: {e}");
                    summary.failed.push(RefreshFailure {
                        symbol: symbol.to_string(),
                        message: e.to_string(),
                    });
                }
            }
        }

        summary
    }

    /// Fetch one symbol's history with automatic provider fallback.
    pub async fn fetch_series(
        &self,
        registry: &SeriesProviderRegistry,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<PriceSeries, CoreError> {
        let category = self.classifier.classify(symbol);
        // Unknown symbols are passed through as their own ticker.
        let ticker = self.classifier.ticker_for(symbol).unwrap_or(symbol);

        let providers = registry.get_providers_for(category);
        if providers.is_empty() {
            return Err(CoreError::NoProvider(category.to_string()));
        }

        let mut last_error = None;
        for provider in &providers {
            match provider.fetch_history(ticker, from, to).await {
                Ok(observations) if observations.is_empty() => {
                    last_error = Some(CoreError::Api {
                        provider: provider.name().to_string(),
                        message: format!("No data returned for {ticker}"),
                    });
                }
                Ok(observations) => match PriceSeries::new(observations) {
                    Ok(series) => return Ok(series),
                    Err(e) => {
                        last_error = Some(CoreError::Api {
                            provider: provider.name().to_string(),
                            message: format!("Invalid data for {ticker}: {e}"),
                        });
                    }
                },
                Err(e) => {
                    debug!("{} failed for {ticker}: {e}", provider.name());
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| CoreError::NoProvider(category.to_string())))
    }
}
