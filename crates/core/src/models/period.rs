use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::CoreError;

/// Nominal distance between the current and the baseline observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodSelector {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    /// Since the earliest retained observation.
    All,
}

impl PeriodSelector {
    /// The four periods rendered side by side in a comprehensive report.
    pub const COMPREHENSIVE: [PeriodSelector; 4] = [
        PeriodSelector::Daily,
        PeriodSelector::Weekly,
        PeriodSelector::Monthly,
        PeriodSelector::Yearly,
    ];
}

impl std::fmt::Display for PeriodSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PeriodSelector::Daily => write!(f, "Daily"),
            PeriodSelector::Weekly => write!(f, "Weekly"),
            PeriodSelector::Monthly => write!(f, "Monthly"),
            PeriodSelector::Yearly => write!(f, "Yearly"),
            PeriodSelector::All => write!(f, "All"),
        }
    }
}

impl FromStr for PeriodSelector {
    type Err = CoreError;

    /// Case-insensitive. Anything else is a caller defect and fails fast.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(PeriodSelector::Daily),
            "weekly" => Ok(PeriodSelector::Weekly),
            "monthly" => Ok(PeriodSelector::Monthly),
            "yearly" => Ok(PeriodSelector::Yearly),
            "all" => Ok(PeriodSelector::All),
            _ => Err(CoreError::UnknownPeriod(s.to_string())),
        }
    }
}

/// How "current" and "baseline" are derived from the reporting date.
///
/// The four modes are independent strategies, not states: each request picks
/// exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusMode {
    /// Latest observation vs. last trading day of the previous calendar unit.
    Live,
    /// Like `Live`, but today's possibly still-forming bar is excluded.
    Completed,
    /// Latest observation vs. a fixed day-count window (1/7/30/365).
    Cycle,
    /// Latest close vs. the highest high ever observed. Period-independent.
    Ath,
}

impl std::fmt::Display for StatusMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusMode::Live => write!(f, "Live"),
            StatusMode::Completed => write!(f, "Completed"),
            StatusMode::Cycle => write!(f, "Cycle"),
            StatusMode::Ath => write!(f, "ATH"),
        }
    }
}

impl FromStr for StatusMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(StatusMode::Live),
            "completed" | "closed" => Ok(StatusMode::Completed),
            "cycle" => Ok(StatusMode::Cycle),
            "ath" => Ok(StatusMode::Ath),
            _ => Err(CoreError::UnknownStatus(s.to_string())),
        }
    }
}
