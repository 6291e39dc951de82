use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::period::PeriodSelector;

/// Default reporting offset: UTC+9 (KST).
pub const DEFAULT_UTC_OFFSET_SECONDS: i32 = 9 * 3600;

/// Years of history requested from providers; ATH looks at all of it.
pub const DEFAULT_HISTORY_YEARS: u32 = 10;

/// Engine configuration. Every field has a default, so a partial JSON
/// document (or `{}`) is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Offset east of UTC used to turn "now" into the reporting date.
    pub utc_offset_seconds: i32,

    /// Window lengths for `StatusMode::Cycle`.
    pub cycle_days: CycleDays,

    /// How far back a provider refresh reaches.
    pub history_years: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            utc_offset_seconds: DEFAULT_UTC_OFFSET_SECONDS,
            cycle_days: CycleDays::default(),
            history_years: DEFAULT_HISTORY_YEARS,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize settings: {e}")))
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        self.reporting_offset()?;
        if self.history_years == 0 {
            return Err(CoreError::InvalidSettings(
                "history_years must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn reporting_offset(&self) -> Result<FixedOffset, CoreError> {
        FixedOffset::east_opt(self.utc_offset_seconds).ok_or_else(|| {
            CoreError::InvalidSettings(format!(
                "utc_offset_seconds out of range: {}",
                self.utc_offset_seconds
            ))
        })
    }

    /// Calendar date of `now` in the reporting timezone.
    pub fn reporting_date(&self, now: DateTime<Utc>) -> Result<NaiveDate, CoreError> {
        let offset = self.reporting_offset()?;
        Ok(now.with_timezone(&offset).date_naive())
    }
}

/// Rolling-window lengths in calendar days, keyed by period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleDays {
    pub daily: u64,
    pub weekly: u64,
    pub monthly: u64,
    pub yearly: u64,
}

impl Default for CycleDays {
    fn default() -> Self {
        Self {
            daily: 1,
            weekly: 7,
            monthly: 30,
            yearly: 365,
        }
    }
}

impl CycleDays {
    /// `None` for `All`, which has no fixed window.
    pub fn for_period(&self, period: PeriodSelector) -> Option<u64> {
        match period {
            PeriodSelector::Daily => Some(self.daily),
            PeriodSelector::Weekly => Some(self.weekly),
            PeriodSelector::Monthly => Some(self.monthly),
            PeriodSelector::Yearly => Some(self.yearly),
            PeriodSelector::All => None,
        }
    }
}
