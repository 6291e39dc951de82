use chrono::NaiveDate;

use crate::models::series::Observation;

/// "What was the price on or before date X" over an ascending, date-unique
/// slice of observations.
///
/// Weekends and holidays are handled transparently: the target date itself
/// never needs to have data.
#[derive(Debug, Clone, Copy, Default)]
pub struct LookbackResolver;

impl LookbackResolver {
    /// Observation with the greatest date ≤ `target`, or `None` when
    /// `target` precedes the first observation. O(log n).
    pub fn resolve(observations: &[Observation], target: NaiveDate) -> Option<&Observation> {
        let idx = observations.partition_point(|o| o.date <= target);
        idx.checked_sub(1).map(|i| &observations[i])
    }

    /// First observation of the slice; the fallback when a target predates it.
    pub fn earliest(observations: &[Observation]) -> Option<&Observation> {
        observations.first()
    }
}
