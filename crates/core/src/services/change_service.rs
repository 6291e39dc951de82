use chrono::NaiveDate;
use log::debug;

use crate::models::change::{BaselineSource, ChangeRecord, ChangeReport, SkipReason, SymbolOutcome};
use crate::models::period::{PeriodSelector, StatusMode};
use crate::models::series::{Observation, SeriesStore};
use crate::services::asset_classifier::AssetClassifier;
use crate::services::baseline_policy::{BaselinePolicy, BaselineTarget, DatePlan};
use crate::services::lookback::LookbackResolver;

/// Computes period-over-period change per symbol.
///
/// Pure: the output depends only on (symbols, period, status, store, today).
/// A symbol that cannot be resolved is skipped with a [`SkipReason`]; it never
/// affects the other symbols of the batch.
#[derive(Debug, Clone, Default)]
pub struct ChangeService {
    policy: BaselinePolicy,
    classifier: AssetClassifier,
}

impl ChangeService {
    pub fn new(policy: BaselinePolicy) -> Self {
        Self {
            policy,
            classifier: AssetClassifier::new(),
        }
    }

    /// Change records for every resolvable symbol, in input order.
    pub fn compute<S: AsRef<str>>(
        &self,
        symbols: &[S],
        period: PeriodSelector,
        status: StatusMode,
        store: &SeriesStore,
        today: NaiveDate,
    ) -> Vec<ChangeRecord> {
        self.compute_outcomes(symbols, period, status, store, today)
            .into_iter()
            .filter_map(|outcome| outcome.result.ok())
            .collect()
    }

    /// Per-symbol results, successes and skips alike, in input order.
    pub fn compute_outcomes<S: AsRef<str>>(
        &self,
        symbols: &[S],
        period: PeriodSelector,
        status: StatusMode,
        store: &SeriesStore,
        today: NaiveDate,
    ) -> Vec<SymbolOutcome> {
        symbols
            .iter()
            .map(|symbol| {
                let symbol = symbol.as_ref();
                let result = self.compute_symbol(symbol, period, status, store, today);
                if let Err(reason) = &result {
                    debug!("skipping {symbol} ({status}/{period}): {reason}");
                }
                SymbolOutcome {
                    symbol: symbol.to_string(),
                    result,
                }
            })
            .collect()
    }

    /// One report: records, skipped symbols and the header dates.
    pub fn report<S: AsRef<str>>(
        &self,
        symbols: &[S],
        period: PeriodSelector,
        status: StatusMode,
        store: &SeriesStore,
        today: NaiveDate,
    ) -> ChangeReport {
        let outcomes = self.compute_outcomes(symbols, period, status, store, today);
        ChangeReport::from_outcomes(period, status, today, outcomes)
    }

    /// Daily, Weekly, Monthly and Yearly reports side by side. ATH has no
    /// period, so it yields a single report for `All`.
    pub fn comprehensive<S: AsRef<str>>(
        &self,
        symbols: &[S],
        status: StatusMode,
        store: &SeriesStore,
        today: NaiveDate,
    ) -> Vec<ChangeReport> {
        if status == StatusMode::Ath {
            return vec![self.report(symbols, PeriodSelector::All, status, store, today)];
        }
        PeriodSelector::COMPREHENSIVE
            .iter()
            .map(|&period| self.report(symbols, period, status, store, today))
            .collect()
    }

    /// Resolve current and baseline for one symbol and derive its change.
    pub fn compute_symbol(
        &self,
        symbol: &str,
        period: PeriodSelector,
        status: StatusMode,
        store: &SeriesStore,
        today: NaiveDate,
    ) -> Result<ChangeRecord, SkipReason> {
        let series = store
            .get(symbol)
            .filter(|s| !s.is_empty())
            .ok_or(SkipReason::SymbolUnavailable)?;

        let plan = self.policy.resolve_dates(today, period, status, series)?;
        let current = *plan.current;

        let (baseline_price, baseline_date, source) = match plan.baseline {
            BaselineTarget::AllTimeHigh => match series.max_high() {
                Some(peak) => (peak, current.date, BaselineSource::AllTimeHigh),
                None => (current.close, current.date, BaselineSource::CurrentFallback),
            },
            _ => {
                let (obs, source) = Self::resolve_baseline(&plan);
                (obs.close, obs.date, source)
            }
        };

        let usable = baseline_price.is_finite() && baseline_price > 0.0;
        let (baseline_price, baseline_date, source) = if usable {
            (baseline_price, baseline_date, source)
        } else {
            debug!("{symbol}: unusable baseline {baseline_price}, comparing against current");
            (current.close, current.date, BaselineSource::CurrentFallback)
        };

        if source == BaselineSource::EarliestFallback {
            debug!(
                "{symbol}: baseline target predates history, using earliest bar {baseline_date}"
            );
        }

        Ok(ChangeRecord {
            symbol: symbol.to_string(),
            category: self.classifier.classify(symbol),
            current_price: current.close,
            current_date: current.date,
            baseline_price,
            baseline_date,
            change_pct: percent_change(current.close, baseline_price),
            baseline_source: source,
        })
    }

    /// Date-indexed baseline lookup with the earliest-observation fallback.
    /// Degrades to the current bar itself when nothing else exists.
    fn resolve_baseline(plan: &DatePlan<'_>) -> (Observation, BaselineSource) {
        let history = plan.history;
        let resolved = match plan.baseline {
            BaselineTarget::OnOrBefore(target) => LookbackResolver::resolve(history, target)
                .map(|obs| (*obs, BaselineSource::Lookback))
                .or_else(|| {
                    LookbackResolver::earliest(history)
                        .map(|obs| (*obs, BaselineSource::EarliestFallback))
                }),
            BaselineTarget::Earliest => {
                LookbackResolver::earliest(history).map(|obs| (*obs, BaselineSource::Inception))
            }
            BaselineTarget::AllTimeHigh => None,
        };
        resolved.unwrap_or((*plan.current, BaselineSource::CurrentFallback))
    }
}

/// (current − baseline) / baseline × 100; 0 when the baseline is not positive.
pub fn percent_change(current: f64, baseline: f64) -> f64 {
    if baseline.is_finite() && baseline > 0.0 {
        (current - baseline) / baseline * 100.0
    } else {
        0.0
    }
}
