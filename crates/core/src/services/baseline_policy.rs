use chrono::{Datelike, Days, NaiveDate};

use crate::models::change::SkipReason;
use crate::models::period::{PeriodSelector, StatusMode};
use crate::models::series::{Observation, PriceSeries};
use crate::models::settings::CycleDays;

/// Which observation may count as "current".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentRule {
    /// The latest observation, whatever its date.
    Latest,
    /// The latest observation dated strictly before the given day.
    StrictlyBefore(NaiveDate),
}

/// What the baseline lookup is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaselineTarget {
    /// Most recent observation on or before this date.
    OnOrBefore(NaiveDate),
    /// The earliest retained observation.
    Earliest,
    /// The highest high of the retained history.
    AllTimeHigh,
}

/// Resolved inputs for one symbol's change computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatePlan<'a> {
    /// The part of the series eligible under the current rule.
    pub history: &'a [Observation],
    pub current: &'a Observation,
    pub baseline: BaselineTarget,
}

/// Turns (today, period, status) into a current-observation rule and a
/// baseline target.
///
/// Two rule sets never mix:
/// - **Cycle**: baseline target = current date − N calendar days, a sliding
///   window whose length ignores weekends and holidays.
/// - **Calendar-aligned** (Live, Completed): baseline = last trading day of the
///   previous day/week/month/year relative to the current observation.
///
/// ATH bypasses both and compares against the highest high.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaselinePolicy {
    cycle_days: CycleDays,
}

impl BaselinePolicy {
    pub fn new(cycle_days: CycleDays) -> Self {
        Self { cycle_days }
    }

    /// Completed excludes today's bar (it may still be forming); every other
    /// mode takes the latest bar as is.
    pub fn current_rule(&self, today: NaiveDate, status: StatusMode) -> CurrentRule {
        match status {
            StatusMode::Completed => CurrentRule::StrictlyBefore(today),
            StatusMode::Live | StatusMode::Cycle | StatusMode::Ath => CurrentRule::Latest,
        }
    }

    /// Baseline target relative to `anchor`, the resolved current date.
    pub fn baseline_target(
        &self,
        anchor: NaiveDate,
        period: PeriodSelector,
        status: StatusMode,
    ) -> BaselineTarget {
        match status {
            StatusMode::Ath => BaselineTarget::AllTimeHigh,
            StatusMode::Cycle => match self.cycle_days.for_period(period) {
                Some(days) => anchor
                    .checked_sub_days(Days::new(days))
                    .map_or(BaselineTarget::Earliest, BaselineTarget::OnOrBefore),
                None => BaselineTarget::Earliest,
            },
            StatusMode::Live | StatusMode::Completed => Self::calendar_target(anchor, period),
        }
    }

    /// Last day of the calendar unit preceding the one `anchor` falls in.
    fn calendar_target(anchor: NaiveDate, period: PeriodSelector) -> BaselineTarget {
        let unit_start = match period {
            PeriodSelector::Daily => Some(anchor),
            PeriodSelector::Weekly => anchor.checked_sub_days(Days::new(u64::from(
                anchor.weekday().num_days_from_monday(),
            ))),
            PeriodSelector::Monthly => anchor.with_day(1),
            PeriodSelector::Yearly => NaiveDate::from_ymd_opt(anchor.year(), 1, 1),
            PeriodSelector::All => return BaselineTarget::Earliest,
        };
        unit_start
            .and_then(|start| start.pred_opt())
            .map_or(BaselineTarget::Earliest, BaselineTarget::OnOrBefore)
    }

    /// Pick the current observation and the baseline target for a series.
    ///
    /// Fails only with `CompletedModeUnderflow` (fewer than two bars before
    /// today under Completed) or `SymbolUnavailable` (empty series).
    pub fn resolve_dates<'a>(
        &self,
        today: NaiveDate,
        period: PeriodSelector,
        status: StatusMode,
        series: &'a PriceSeries,
    ) -> Result<DatePlan<'a>, SkipReason> {
        let history = match self.current_rule(today, status) {
            CurrentRule::Latest => series.observations(),
            CurrentRule::StrictlyBefore(cutoff) => {
                let completed = series.before(cutoff);
                if !series.is_empty() && completed.len() < 2 {
                    return Err(SkipReason::CompletedModeUnderflow {
                        remaining: completed.len(),
                    });
                }
                completed
            }
        };

        let current = history.last().ok_or(SkipReason::SymbolUnavailable)?;
        let baseline = self.baseline_target(current.date, period, status);

        Ok(DatePlan {
            history,
            current,
            baseline,
        })
    }
}
