use chrono::{NaiveDate, TimeZone, Utc};
use price_pulse_core::errors::CoreError;
use price_pulse_core::models::asset::AssetCategory;
use price_pulse_core::models::change::{
    BaselineSource, ChangeRecord, ChangeReport, SkipReason, SymbolOutcome,
};
use price_pulse_core::models::period::{PeriodSelector, StatusMode};
use price_pulse_core::models::series::{Observation, PriceSeries, SeriesStore};
use price_pulse_core::models::settings::{CycleDays, Settings};
use price_pulse_core::models::watchlist::Watchlist;
use price_pulse_core::services::asset_classifier::AssetClassifier;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn obs(date: NaiveDate, close: f64) -> Observation {
    Observation::close_only(date, close)
}

// ═══════════════════════════════════════════════════════════════════
//  AssetCategory
// ═══════════════════════════════════════════════════════════════════

mod asset_category {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(AssetCategory::Commodity.to_string(), "Commodity");
        assert_eq!(AssetCategory::Crypto.to_string(), "Crypto");
        assert_eq!(AssetCategory::DomesticEquity.to_string(), "Domestic Equity");
        assert_eq!(AssetCategory::ForeignEquity.to_string(), "Foreign Equity");
        assert_eq!(AssetCategory::Other.to_string(), "Other");
    }

    #[test]
    fn default_is_other() {
        assert_eq!(AssetCategory::default(), AssetCategory::Other);
    }

    #[test]
    fn serde_uses_variant_names() {
        let json = serde_json::to_string(&AssetCategory::DomesticEquity).unwrap();
        assert_eq!(json, "\"DomesticEquity\"");
        let back: AssetCategory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AssetCategory::DomesticEquity);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  PeriodSelector / StatusMode
// ═══════════════════════════════════════════════════════════════════

mod period_and_status {
    use super::*;

    #[test]
    fn parse_period_case_insensitive() {
        assert_eq!("daily".parse::<PeriodSelector>().unwrap(), PeriodSelector::Daily);
        assert_eq!("Weekly".parse::<PeriodSelector>().unwrap(), PeriodSelector::Weekly);
        assert_eq!(" MONTHLY ".parse::<PeriodSelector>().unwrap(), PeriodSelector::Monthly);
        assert_eq!("yearly".parse::<PeriodSelector>().unwrap(), PeriodSelector::Yearly);
        assert_eq!("all".parse::<PeriodSelector>().unwrap(), PeriodSelector::All);
    }

    #[test]
    fn unknown_period_fails_fast() {
        let err = "quarterly".parse::<PeriodSelector>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownPeriod(ref s) if s == "quarterly"));
    }

    #[test]
    fn parse_status() {
        assert_eq!("live".parse::<StatusMode>().unwrap(), StatusMode::Live);
        assert_eq!("Completed".parse::<StatusMode>().unwrap(), StatusMode::Completed);
        assert_eq!("closed".parse::<StatusMode>().unwrap(), StatusMode::Completed);
        assert_eq!("cycle".parse::<StatusMode>().unwrap(), StatusMode::Cycle);
        assert_eq!("ATH".parse::<StatusMode>().unwrap(), StatusMode::Ath);
    }

    #[test]
    fn unknown_status_fails_fast() {
        let err = "premarket".parse::<StatusMode>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownStatus(_)));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for p in [
            PeriodSelector::Daily,
            PeriodSelector::Weekly,
            PeriodSelector::Monthly,
            PeriodSelector::Yearly,
            PeriodSelector::All,
        ] {
            assert_eq!(p.to_string().parse::<PeriodSelector>().unwrap(), p);
        }
        for s in [
            StatusMode::Live,
            StatusMode::Completed,
            StatusMode::Cycle,
            StatusMode::Ath,
        ] {
            assert_eq!(s.to_string().parse::<StatusMode>().unwrap(), s);
        }
    }

    #[test]
    fn comprehensive_periods_exclude_all() {
        assert_eq!(PeriodSelector::COMPREHENSIVE.len(), 4);
        assert!(!PeriodSelector::COMPREHENSIVE.contains(&PeriodSelector::All));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Observation
// ═══════════════════════════════════════════════════════════════════

mod observation {
    use super::*;

    #[test]
    fn valid() {
        assert!(Observation::new(d(2025, 1, 2), 100.0, 105.0).validate().is_ok());
    }

    #[test]
    fn close_only_copies_close_into_high() {
        let o = obs(d(2025, 1, 2), 42.5);
        assert_eq!(o.high, 42.5);
    }

    #[test]
    fn rejects_zero_negative_and_non_finite_close() {
        for close in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = Observation::new(d(2025, 1, 2), close, 1.0).validate().unwrap_err();
            assert!(matches!(err, CoreError::InvalidObservation(_)), "{close}");
        }
    }

    #[test]
    fn rejects_non_finite_high() {
        let err = Observation::new(d(2025, 1, 2), 1.0, f64::NAN).validate().unwrap_err();
        assert!(matches!(err, CoreError::InvalidObservation(_)));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  PriceSeries
// ═══════════════════════════════════════════════════════════════════

mod price_series {
    use super::*;

    #[test]
    fn sorts_input() {
        let series = PriceSeries::new(vec![
            obs(d(2025, 1, 3), 3.0),
            obs(d(2025, 1, 1), 1.0),
            obs(d(2025, 1, 2), 2.0),
        ])
        .unwrap();
        let dates: Vec<_> = series.observations().iter().map(|o| o.date).collect();
        assert_eq!(dates, vec![d(2025, 1, 1), d(2025, 1, 2), d(2025, 1, 3)]);
    }

    #[test]
    fn duplicate_date_last_supplied_wins() {
        let series = PriceSeries::new(vec![
            obs(d(2025, 1, 2), 1.0),
            obs(d(2025, 1, 1), 5.0),
            obs(d(2025, 1, 2), 2.0),
        ])
        .unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.get(d(2025, 1, 2)).unwrap().close, 2.0);
    }

    #[test]
    fn rejects_invalid_observation() {
        let result = PriceSeries::new(vec![obs(d(2025, 1, 1), 1.0), obs(d(2025, 1, 2), 0.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn upsert_inserts_in_order_and_replaces() {
        let mut series =
            PriceSeries::new(vec![obs(d(2025, 1, 1), 1.0), obs(d(2025, 1, 3), 3.0)]).unwrap();
        series.upsert(obs(d(2025, 1, 2), 2.0)).unwrap();
        series.upsert(obs(d(2025, 1, 3), 30.0)).unwrap();
        let closes: Vec<_> = series.observations().iter().map(|o| o.close).collect();
        assert_eq!(closes, vec![1.0, 2.0, 30.0]);
    }

    #[test]
    fn before_is_strict() {
        let series = PriceSeries::new(vec![
            obs(d(2025, 1, 1), 1.0),
            obs(d(2025, 1, 2), 2.0),
            obs(d(2025, 1, 3), 3.0),
        ])
        .unwrap();
        assert_eq!(series.before(d(2025, 1, 3)).len(), 2);
        assert_eq!(series.before(d(2025, 1, 1)).len(), 0);
        assert_eq!(series.before(d(2026, 1, 1)).len(), 3);
    }

    #[test]
    fn range_is_inclusive() {
        let series = PriceSeries::new(vec![
            obs(d(2025, 1, 1), 1.0),
            obs(d(2025, 1, 2), 2.0),
            obs(d(2025, 1, 3), 3.0),
        ])
        .unwrap();
        assert_eq!(series.range(d(2025, 1, 2), d(2025, 1, 3)).len(), 2);
        assert!(series.range(d(2025, 1, 3), d(2025, 1, 2)).is_empty());
        assert!(series.range(d(2024, 1, 1), d(2024, 12, 31)).is_empty());
    }

    #[test]
    fn max_high() {
        let series = PriceSeries::new(vec![
            Observation::new(d(2025, 1, 1), 9.0, 10.0),
            Observation::new(d(2025, 1, 2), 14.0, 15.0),
            Observation::new(d(2025, 1, 3), 11.0, 12.0),
        ])
        .unwrap();
        assert_eq!(series.max_high(), Some(15.0));
        assert_eq!(PriceSeries::default().max_high(), None);
    }

    #[test]
    fn max_high_never_below_a_close() {
        let series = PriceSeries::new(vec![
            Observation::new(d(2025, 1, 1), 100.0, 90.0),
            Observation::new(d(2025, 1, 2), 120.0, 95.0),
        ])
        .unwrap();
        assert_eq!(series.max_high(), Some(120.0));
    }

    #[test]
    fn prune_before() {
        let mut series = PriceSeries::new(vec![
            obs(d(2025, 1, 1), 1.0),
            obs(d(2025, 1, 2), 2.0),
            obs(d(2025, 1, 3), 3.0),
        ])
        .unwrap();
        assert_eq!(series.prune_before(d(2025, 1, 2)), 1);
        assert_eq!(series.first().unwrap().date, d(2025, 1, 2));
    }

    #[test]
    fn deserialize_sorts_and_validates() {
        let json = r#"[
            {"date":"2025-01-02","close":2.0,"high":2.5},
            {"date":"2025-01-01","close":1.0,"high":1.5}
        ]"#;
        let series: PriceSeries = serde_json::from_str(json).unwrap();
        assert_eq!(series.first().unwrap().date, d(2025, 1, 1));

        let bad = r#"[{"date":"2025-01-01","close":-1.0,"high":1.0}]"#;
        assert!(serde_json::from_str::<PriceSeries>(bad).is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  SeriesStore
// ═══════════════════════════════════════════════════════════════════

mod series_store {
    use super::*;

    fn sample_store() -> SeriesStore {
        let mut store = SeriesStore::new();
        store
            .insert_series("BTC", vec![obs(d(2025, 1, 1), 90_000.0), obs(d(2025, 1, 2), 95_000.0)])
            .unwrap();
        store.insert_series("Gold", vec![obs(d(2025, 1, 2), 2_650.0)]).unwrap();
        store
    }

    #[test]
    fn insert_and_get() {
        let store = sample_store();
        assert_eq!(store.get("BTC").unwrap().len(), 2);
        assert!(store.get("ETH").is_none());
        assert!(store.contains("Gold"));
    }

    #[test]
    fn symbols_are_case_sensitive() {
        let store = sample_store();
        assert!(store.get("btc").is_none());
    }

    #[test]
    fn counts() {
        let store = sample_store();
        assert_eq!(store.symbol_count(), 2);
        assert_eq!(store.total_observations(), 3);
        assert_eq!(store.symbols(), vec!["BTC", "Gold"]);
    }

    #[test]
    fn upsert_observation_creates_series() {
        let mut store = SeriesStore::new();
        store.upsert_observation("ETH", obs(d(2025, 1, 1), 3_300.0)).unwrap();
        assert_eq!(store.get("ETH").unwrap().len(), 1);
    }

    #[test]
    fn upsert_invalid_does_not_create_series() {
        let mut store = SeriesStore::new();
        assert!(store.upsert_observation("ETH", obs(d(2025, 1, 1), 0.0)).is_err());
        assert!(!store.contains("ETH"));
    }

    #[test]
    fn prune_removes_emptied_symbols() {
        let mut store = sample_store();
        let removed = store.prune_before(d(2025, 1, 2));
        assert_eq!(removed, 1);
        assert_eq!(store.total_observations(), 2);

        let removed = store.prune_before(d(2026, 1, 1));
        assert_eq!(removed, 2);
        assert_eq!(store.symbol_count(), 0);
    }

    #[test]
    fn json_snapshot_round_trip() {
        let store = sample_store();
        let json = store.to_json().unwrap();
        let back = SeriesStore::from_json(&json).unwrap();
        assert_eq!(store, back);
    }

    #[test]
    fn json_snapshot_format() {
        let json = r#"{ "S&P 500": [ { "date": "2025-01-02", "close": 5868.55, "high": 5900.1 } ] }"#;
        let store = SeriesStore::from_json(json).unwrap();
        let o = store.get("S&P 500").unwrap().last().unwrap();
        assert_eq!(o.date, d(2025, 1, 2));
        assert_eq!(o.high, 5900.1);
    }

    #[test]
    fn malformed_json_is_deserialization_error() {
        let err = SeriesStore::from_json("{ not json").unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn remove_and_clear() {
        let mut store = sample_store();
        assert!(store.remove("BTC").is_some());
        assert!(store.remove("BTC").is_none());
        store.clear();
        assert_eq!(store.symbol_count(), 0);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Settings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.utc_offset_seconds, 9 * 3600);
        assert_eq!(s.cycle_days, CycleDays::default());
        assert_eq!(s.history_years, 10);
        assert_eq!(
            (s.cycle_days.daily, s.cycle_days.weekly, s.cycle_days.monthly, s.cycle_days.yearly),
            (1, 7, 30, 365)
        );
    }

    #[test]
    fn empty_json_is_default() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let s = Settings::from_json(r#"{ "utc_offset_seconds": 0, "cycle_days": { "weekly": 5 } }"#)
            .unwrap();
        assert_eq!(s.utc_offset_seconds, 0);
        assert_eq!(s.cycle_days.weekly, 5);
        assert_eq!(s.cycle_days.yearly, 365);
        assert_eq!(s.history_years, 10);
    }

    #[test]
    fn json_round_trip() {
        let s = Settings {
            utc_offset_seconds: -5 * 3600,
            history_years: 3,
            ..Settings::default()
        };
        let back = Settings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(s, back);
    }

    #[test]
    fn out_of_range_offset_is_invalid() {
        let err = Settings::from_json(r#"{ "utc_offset_seconds": 999999 }"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidSettings(_)));
    }

    #[test]
    fn zero_history_years_is_invalid() {
        let err = Settings::from_json(r#"{ "history_years": 0 }"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidSettings(_)));
    }

    #[test]
    fn reporting_date_uses_offset() {
        let s = Settings::default();
        let before_midnight_kst = Utc.with_ymd_and_hms(2025, 1, 1, 14, 59, 0).unwrap();
        let after_midnight_kst = Utc.with_ymd_and_hms(2025, 1, 1, 15, 0, 0).unwrap();
        assert_eq!(s.reporting_date(before_midnight_kst).unwrap(), d(2025, 1, 1));
        assert_eq!(s.reporting_date(after_midnight_kst).unwrap(), d(2025, 1, 2));
    }

    #[test]
    fn cycle_days_for_period() {
        let c = CycleDays::default();
        assert_eq!(c.for_period(PeriodSelector::Weekly), Some(7));
        assert_eq!(c.for_period(PeriodSelector::All), None);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  ChangeReport / BaselineSource
// ═══════════════════════════════════════════════════════════════════

mod change_report {
    use super::*;

    fn record(symbol: &str, current: NaiveDate, baseline: NaiveDate, source: BaselineSource) -> ChangeRecord {
        ChangeRecord {
            symbol: symbol.into(),
            category: AssetCategory::Other,
            current_price: 110.0,
            current_date: current,
            baseline_price: 100.0,
            baseline_date: baseline,
            change_pct: 10.0,
            baseline_source: source,
        }
    }

    #[test]
    fn degraded_sources() {
        assert!(!BaselineSource::Lookback.is_degraded());
        assert!(!BaselineSource::Inception.is_degraded());
        assert!(!BaselineSource::AllTimeHigh.is_degraded());
        assert!(BaselineSource::EarliestFallback.is_degraded());
        assert!(BaselineSource::CurrentFallback.is_degraded());
    }

    #[test]
    fn from_outcomes_splits_and_keeps_order() {
        let outcomes = vec![
            SymbolOutcome {
                symbol: "A".into(),
                result: Ok(record("A", d(2025, 1, 2), d(2025, 1, 1), BaselineSource::Lookback)),
            },
            SymbolOutcome {
                symbol: "B".into(),
                result: Err(SkipReason::SymbolUnavailable),
            },
            SymbolOutcome {
                symbol: "C".into(),
                result: Ok(record(
                    "C",
                    d(2025, 1, 3),
                    d(2024, 12, 1),
                    BaselineSource::EarliestFallback,
                )),
            },
        ];
        let report = ChangeReport::from_outcomes(
            PeriodSelector::Daily,
            StatusMode::Live,
            d(2025, 1, 3),
            outcomes,
        );

        let symbols: Vec<_> = report.records.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["A", "C"]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].symbol, "B");
        assert_eq!(report.as_of, Some(d(2025, 1, 3)));
        assert_eq!(report.baseline_as_of, Some(d(2025, 1, 1)));
        assert_eq!(report.degraded().count(), 1);
    }

    #[test]
    fn empty_report_has_no_dates() {
        let report = ChangeReport::from_outcomes(
            PeriodSelector::Weekly,
            StatusMode::Cycle,
            d(2025, 1, 3),
            Vec::new(),
        );
        assert!(report.is_empty());
        assert_eq!(report.as_of, None);
        assert_eq!(report.baseline_as_of, None);
    }

    #[test]
    fn record_serializes_for_presentation() {
        let r = record("BTC", d(2025, 1, 2), d(2025, 1, 1), BaselineSource::Lookback);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["symbol"], "BTC");
        assert_eq!(json["current_date"], "2025-01-02");
        assert_eq!(json["baseline_source"], "Lookback");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Watchlist
// ═══════════════════════════════════════════════════════════════════

mod watchlist {
    use super::*;

    #[test]
    fn sizes() {
        assert_eq!(Watchlist::GlobalTop.symbols().len(), 13);
        assert_eq!(Watchlist::KeyIndicators.symbols().len(), 10);
        assert_eq!(Watchlist::MyPortfolio.symbols().len(), 12);
    }

    #[test]
    fn every_symbol_is_in_the_universe() {
        let classifier = AssetClassifier::new();
        for list in Watchlist::ALL {
            for symbol in list.symbols() {
                assert!(classifier.is_known(symbol), "{list}: {symbol}");
            }
        }
    }

    #[test]
    fn display() {
        assert_eq!(Watchlist::GlobalTop.to_string(), "Global Top");
        assert_eq!(Watchlist::KeyIndicators.to_string(), "Key Indicators");
        assert_eq!(Watchlist::MyPortfolio.to_string(), "My Portfolio");
    }
}
