pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use chrono::{DateTime, Months, NaiveDate, Utc};
use models::{
    change::{ChangeRecord, ChangeReport},
    period::{PeriodSelector, StatusMode},
    series::{Observation, SeriesStore},
    settings::Settings,
    watchlist::Watchlist,
};
use providers::{registry::SeriesProviderRegistry, traits::SeriesProvider};
use services::{
    baseline_policy::BaselinePolicy,
    change_service::ChangeService,
    series_service::{RefreshSummary, SeriesService},
};

use errors::CoreError;

/// Main entry point for the Price Pulse core library.
///
/// Owns the settings, the in-memory series store and the provider registry.
/// Every computation takes the current instant explicitly; the library never
/// reads the wall clock.
#[must_use]
pub struct PricePulse {
    settings: Settings,
    store: SeriesStore,
    registry: SeriesProviderRegistry,
    change_service: ChangeService,
    series_service: SeriesService,
}

impl std::fmt::Debug for PricePulse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PricePulse")
            .field("settings", &self.settings)
            .field("symbols", &self.store.symbol_count())
            .field("observations", &self.store.total_observations())
            .field("providers", &self.registry.provider_names())
            .finish()
    }
}

impl PricePulse {
    /// Create an engine with an empty store. Fails on invalid settings.
    pub fn new(settings: Settings) -> Result<Self, CoreError> {
        Self::with_store(settings, SeriesStore::new())
    }

    /// Create an engine over an already-populated store.
    pub fn with_store(settings: Settings, store: SeriesStore) -> Result<Self, CoreError> {
        settings.validate()?;
        let policy = BaselinePolicy::new(settings.cycle_days);
        Ok(Self {
            settings,
            store,
            registry: SeriesProviderRegistry::new(),
            change_service: ChangeService::new(policy),
            series_service: SeriesService::new(),
        })
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn store(&self) -> &SeriesStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SeriesStore {
        &mut self.store
    }

    /// "Today" in the configured reporting timezone.
    pub fn reporting_date(&self, now: DateTime<Utc>) -> Result<NaiveDate, CoreError> {
        self.settings.reporting_date(now)
    }

    // ── Change Computation ──────────────────────────────────────────

    /// Change records for `symbols`, in input order. Unresolvable symbols are
    /// omitted.
    pub fn compute<S: AsRef<str>>(
        &self,
        symbols: &[S],
        period: PeriodSelector,
        status: StatusMode,
        now: DateTime<Utc>,
    ) -> Result<Vec<ChangeRecord>, CoreError> {
        let today = self.reporting_date(now)?;
        Ok(self
            .change_service
            .compute(symbols, period, status, &self.store, today))
    }

    /// Like [`compute`](Self::compute), plus skipped symbols and header dates.
    pub fn report<S: AsRef<str>>(
        &self,
        symbols: &[S],
        period: PeriodSelector,
        status: StatusMode,
        now: DateTime<Utc>,
    ) -> Result<ChangeReport, CoreError> {
        let today = self.reporting_date(now)?;
        Ok(self
            .change_service
            .report(symbols, period, status, &self.store, today))
    }

    /// Report over one of the preset watchlists.
    pub fn report_watchlist(
        &self,
        watchlist: Watchlist,
        period: PeriodSelector,
        status: StatusMode,
        now: DateTime<Utc>,
    ) -> Result<ChangeReport, CoreError> {
        self.report(watchlist.symbols(), period, status, now)
    }

    /// Daily/Weekly/Monthly/Yearly reports at once (a single report for ATH).
    pub fn comprehensive_report<S: AsRef<str>>(
        &self,
        symbols: &[S],
        status: StatusMode,
        now: DateTime<Utc>,
    ) -> Result<Vec<ChangeReport>, CoreError> {
        let today = self.reporting_date(now)?;
        Ok(self
            .change_service
            .comprehensive(symbols, status, &self.store, today))
    }

    // ── Store Population ────────────────────────────────────────────

    /// Register a provider; earlier registrations take priority.
    pub fn register_provider(&mut self, provider: Box<dyn SeriesProvider>) {
        self.registry.register(provider);
    }

    /// Re-fetch `symbols` from the registered providers, covering
    /// `history_years` up to the reporting date.
    pub async fn refresh<S: AsRef<str>>(
        &mut self,
        symbols: &[S],
        now: DateTime<Utc>,
    ) -> Result<RefreshSummary, CoreError> {
        let to = self.reporting_date(now)?;
        let from = to
            .checked_sub_months(Months::new(self.settings.history_years.saturating_mul(12)))
            .unwrap_or(NaiveDate::MIN);
        Ok(self
            .series_service
            .refresh(&self.registry, &mut self.store, symbols, from, to)
            .await)
    }

    /// Insert or replace one bar (manual entry, tests, offline import).
    pub fn set_observation(&mut self, symbol: &str, obs: Observation) -> Result<(), CoreError> {
        self.store.upsert_observation(symbol, obs)
    }

    // ── Snapshots ───────────────────────────────────────────────────

    /// Replace the store with the contents of a JSON snapshot.
    pub fn load_store_from_json(&mut self, json: &str) -> Result<(), CoreError> {
        self.store = SeriesStore::from_json(json)?;
        Ok(())
    }

    pub fn export_store_to_json(&self) -> Result<String, CoreError> {
        self.store.to_json()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_store_from_file(&mut self, path: impl AsRef<std::path::Path>) -> Result<(), CoreError> {
        self.store = SeriesStore::load_from_file(path)?;
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_store_to_file(&self, path: impl AsRef<std::path::Path>) -> Result<(), CoreError> {
        self.store.save_to_file(path)
    }
}
