use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::asset::AssetCategory;
use super::period::{PeriodSelector, StatusMode};

/// How the baseline of a [`ChangeRecord`] was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaselineSource {
    /// Most recent observation on or before the policy's target date.
    Lookback,
    /// Earliest retained observation, as the `All` period defines it.
    Inception,
    /// Highest high of the retained history.
    AllTimeHigh,
    /// Target date predates the history; the earliest observation stands in.
    /// The reported change may understate the true change.
    EarliestFallback,
    /// No usable baseline at all; baseline := current, change = 0%.
    CurrentFallback,
}

impl BaselineSource {
    /// True when the baseline is a stand-in rather than what was asked for.
    pub fn is_degraded(&self) -> bool {
        matches!(
            self,
            BaselineSource::EarliestFallback | BaselineSource::CurrentFallback
        )
    }
}

/// Period-over-period change of one symbol. Recomputed on every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub symbol: String,

    pub category: AssetCategory,

    pub current_price: f64,

    pub current_date: NaiveDate,

    pub baseline_price: f64,

    /// For ATH this equals `current_date`: the comparison is price vs. peak.
    pub baseline_date: NaiveDate,

    /// (current − baseline) / baseline × 100, unclamped.
    pub change_pct: f64,

    pub baseline_source: BaselineSource,
}

/// Why a symbol produced no record. Never aborts the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SkipReason {
    #[error("no price series available")]
    SymbolUnavailable,

    #[error("only {remaining} completed observation(s) before the reporting date")]
    CompletedModeUnderflow { remaining: usize },
}

/// Per-symbol result before the batch filters down to successes.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolOutcome {
    pub symbol: String,
    pub result: Result<ChangeRecord, SkipReason>,
}

/// A symbol left out of a report, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSymbol {
    pub symbol: String,
    pub reason: SkipReason,
}

/// One batch of change records plus the dates a report header shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeReport {
    pub period: PeriodSelector,

    pub status: StatusMode,

    /// "Today" in the reporting timezone.
    pub reporting_date: NaiveDate,

    /// Latest current date among the records, if any.
    pub as_of: Option<NaiveDate>,

    /// Latest baseline date among the records, if any.
    pub baseline_as_of: Option<NaiveDate>,

    /// Records in input symbol order.
    pub records: Vec<ChangeRecord>,

    pub skipped: Vec<SkippedSymbol>,
}

impl ChangeReport {
    /// Assemble a report from per-symbol outcomes, preserving their order.
    pub fn from_outcomes(
        period: PeriodSelector,
        status: StatusMode,
        reporting_date: NaiveDate,
        outcomes: Vec<SymbolOutcome>,
    ) -> Self {
        let mut records = Vec::new();
        let mut skipped = Vec::new();
        for outcome in outcomes {
            match outcome.result {
                Ok(record) => records.push(record),
                Err(reason) => skipped.push(SkippedSymbol {
                    symbol: outcome.symbol,
                    reason,
                }),
            }
        }

        let as_of = records.iter().map(|r| r.current_date).max();
        let baseline_as_of = records.iter().map(|r| r.baseline_date).max();

        Self {
            period,
            status,
            reporting_date,
            as_of,
            baseline_as_of,
            records,
            skipped,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose baseline is a stand-in (see [`BaselineSource::is_degraded`]).
    pub fn degraded(&self) -> impl Iterator<Item = &ChangeRecord> {
        self.records
            .iter()
            .filter(|r| r.baseline_source.is_degraded())
    }
}
