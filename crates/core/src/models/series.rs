use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::CoreError;

/// One daily bar of a symbol: the closing price and the intraday high.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub close: f64,
    pub high: f64,
}

impl Observation {
    pub fn new(date: NaiveDate, close: f64, high: f64) -> Self {
        Self { date, close, high }
    }

    /// Bar without a separate high (high == close).
    pub fn close_only(date: NaiveDate, close: f64) -> Self {
        Self::new(date, close, close)
    }

    /// Close must be finite and strictly positive, high must be finite.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.close.is_finite() || self.close <= 0.0 {
            return Err(CoreError::InvalidObservation(format!(
                "close on {} must be finite and positive, got {}",
                self.date, self.close
            )));
        }
        if !self.high.is_finite() {
            return Err(CoreError::InvalidObservation(format!(
                "high on {} must be finite, got {}",
                self.date, self.high
            )));
        }
        Ok(())
    }
}

/// Time-ordered history of one symbol.
///
/// Always sorted ascending by date with at most one observation per date,
/// so every lookup below can use binary search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Observation>", into = "Vec<Observation>")]
pub struct PriceSeries {
    observations: Vec<Observation>,
}

impl PriceSeries {
    /// Build a series from unordered observations.
    ///
    /// Input is sorted by date; when a date appears more than once the
    /// observation supplied last wins.
    pub fn new(mut observations: Vec<Observation>) -> Result<Self, CoreError> {
        for obs in &observations {
            obs.validate()?;
        }
        observations.sort_by_key(|o| o.date); // stable: later duplicates stay later

        let mut deduped: Vec<Observation> = Vec::with_capacity(observations.len());
        for obs in observations {
            match deduped.last_mut() {
                Some(last) if last.date == obs.date => *last = obs,
                _ => deduped.push(obs),
            }
        }
        Ok(Self {
            observations: deduped,
        })
    }

    /// Insert or replace the observation for `obs.date`.
    pub fn upsert(&mut self, obs: Observation) -> Result<(), CoreError> {
        obs.validate()?;
        match self.observations.binary_search_by_key(&obs.date, |o| o.date) {
            Ok(idx) => self.observations[idx] = obs,
            Err(idx) => self.observations.insert(idx, obs),
        }
        Ok(())
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn first(&self) -> Option<&Observation> {
        self.observations.first()
    }

    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Exact-date lookup.
    pub fn get(&self, date: NaiveDate) -> Option<&Observation> {
        self.observations
            .binary_search_by_key(&date, |o| o.date)
            .ok()
            .map(|idx| &self.observations[idx])
    }

    /// Every observation dated strictly before `date`.
    pub fn before(&self, date: NaiveDate) -> &[Observation] {
        let end = self.observations.partition_point(|o| o.date < date);
        &self.observations[..end]
    }

    /// Observations within `[from, to]`, both inclusive.
    pub fn range(&self, from: NaiveDate, to: NaiveDate) -> &[Observation] {
        let start = self.observations.partition_point(|o| o.date < from);
        let end = self.observations.partition_point(|o| o.date <= to);
        if start >= end {
            return &[];
        }
        &self.observations[start..end]
    }

    /// Highest price reached across the whole retained history.
    ///
    /// A bar's peak is `max(high, close)`: feeds that omit or under-report the
    /// high never leave the peak below a recorded close.
    pub fn max_high(&self) -> Option<f64> {
        self.observations
            .iter()
            .map(|o| o.high.max(o.close))
            .fold(None, |acc, h| match acc {
                Some(m) if m >= h => Some(m),
                _ => Some(h),
            })
    }

    /// Drop observations older than `before`. Returns the number removed.
    pub fn prune_before(&mut self, before: NaiveDate) -> usize {
        let split = self.observations.partition_point(|o| o.date < before);
        self.observations.drain(..split);
        split
    }
}

impl TryFrom<Vec<Observation>> for PriceSeries {
    type Error = CoreError;

    fn try_from(observations: Vec<Observation>) -> Result<Self, Self::Error> {
        Self::new(observations)
    }
}

impl From<PriceSeries> for Vec<Observation> {
    fn from(series: PriceSeries) -> Self {
        series.observations
    }
}

/// In-memory price histories keyed by display symbol.
///
/// Filled once per refresh cycle (by a provider refresh or a JSON snapshot)
/// and read-only while a report is computed. Keys are matched exactly:
/// "S&P 500" and "s&p 500" are different symbols.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesStore {
    entries: BTreeMap<String, PriceSeries>,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a symbol's history with the given observations.
    pub fn insert_series(
        &mut self,
        symbol: impl Into<String>,
        observations: Vec<Observation>,
    ) -> Result<(), CoreError> {
        let series = PriceSeries::new(observations)?;
        self.entries.insert(symbol.into(), series);
        Ok(())
    }

    pub fn set_series(&mut self, symbol: impl Into<String>, series: PriceSeries) {
        self.entries.insert(symbol.into(), series);
    }

    /// Insert or replace a single bar, creating the series if needed.
    pub fn upsert_observation(&mut self, symbol: &str, obs: Observation) -> Result<(), CoreError> {
        obs.validate()?;
        self.entries.entry(symbol.to_string()).or_default().upsert(obs)
    }

    pub fn get(&self, symbol: &str) -> Option<&PriceSeries> {
        self.entries.get(symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.entries.contains_key(symbol)
    }

    pub fn remove(&mut self, symbol: &str) -> Option<PriceSeries> {
        self.entries.remove(symbol)
    }

    /// Stored symbols in lexical order.
    pub fn symbols(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn symbol_count(&self) -> usize {
        self.entries.len()
    }

    pub fn total_observations(&self) -> usize {
        self.entries.values().map(PriceSeries::len).sum()
    }

    /// Drop observations older than `before` across all symbols; symbols left
    /// without data are removed. Returns the number of observations removed.
    pub fn prune_before(&mut self, before: NaiveDate) -> usize {
        let removed = self
            .entries
            .values_mut()
            .map(|series| series.prune_before(before))
            .sum();
        self.entries.retain(|_, series| !series.is_empty());
        removed
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // ── Snapshots ───────────────────────────────────────────────────

    /// Serialize as `{ "<symbol>": [ { "date", "close", "high" }, … ] }`.
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize series store: {e}")))
    }

    /// Parse a snapshot; every series is sorted, deduplicated and validated.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(&self, path: impl AsRef<std::path::Path>) -> Result<(), CoreError> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
