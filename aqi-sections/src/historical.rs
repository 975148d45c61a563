//! Historical records over a chosen date range, with summary statistics.

use crate::error::{Result, SectionError};
use crate::{LoadState, Services};
use aqi_api::{AqiApi, HistoricalQuery};
use aqi_core::dates::local_date;
use aqi_core::models::{CitySelection, HistoricalRecord};
use aqi_core::sequence::RequestSequence;
use aqi_data::export::{historical_csv, historical_file_name};
use aqi_data::sample::sample_historical;
use aqi_data::stats::{summarize, HistoricalSummary};
use chrono::{Duration, NaiveDate};
use fastrand::Rng;
use std::cell::{Cell, RefCell};

/// Length of the default range ending today.
pub const DEFAULT_RANGE_DAYS: i64 = 30;
pub const HISTORICAL_RECORD_LIMIT: u32 = 1000;
pub const INVALID_RANGE: &str = "Start date must be before end date";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoricalState {
    pub city: Option<CitySelection>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub records: Vec<HistoricalRecord>,
    pub summary: Option<HistoricalSummary>,
    pub load_state: LoadState,
    pub synthetic: bool,
}

impl HistoricalState {
    /// Loaded records dated within `start..=end`.
    pub fn records_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<HistoricalRecord> {
        self.records
            .iter()
            .filter(|record| {
                record
                    .timestamp()
                    .and_then(local_date)
                    .is_some_and(|date| date >= start && date <= end)
            })
            .cloned()
            .collect()
    }
}

pub struct HistoricalController<A, G, D> {
    services: Services<A, G, D>,
    state: RefCell<HistoricalState>,
    requests: RequestSequence,
    rng: RefCell<Rng>,
    stale: Cell<bool>,
}

impl<A: AqiApi, G, D> HistoricalController<A, G, D> {
    pub fn new(services: Services<A, G, D>) -> Self {
        Self::with_rng(services, Rng::new())
    }

    pub fn with_rng(services: Services<A, G, D>, rng: Rng) -> Self {
        let end = services.clock.today();
        let state = HistoricalState {
            city: None,
            start: end - Duration::days(DEFAULT_RANGE_DAYS),
            end,
            records: Vec::new(),
            summary: None,
            load_state: LoadState::Uninitialized,
            synthetic: false,
        };
        Self {
            services,
            state: RefCell::new(state),
            requests: RequestSequence::new(),
            rng: RefCell::new(rng),
            stale: Cell::new(false),
        }
    }

    pub fn snapshot(&self) -> HistoricalState {
        self.state.borrow().clone()
    }

    pub fn records(&self) -> Vec<HistoricalRecord> {
        self.state.borrow().records.clone()
    }

    pub fn set_city(&self, city: CitySelection) {
        let mut state = self.state.borrow_mut();
        if state.city.as_ref() != Some(&city) {
            state.city = Some(city);
            self.stale.set(true);
        }
    }

    pub fn is_stale(&self) -> bool {
        self.stale.get()
    }

    /// Switch to `city` and reload the current range for it.
    pub async fn select_city(&self, city: CitySelection) -> Result<usize> {
        self.set_city(city);
        self.load().await
    }

    pub fn set_start(&self, start: NaiveDate) {
        self.state.borrow_mut().start = start;
    }

    pub fn set_end(&self, end: NaiveDate) {
        self.state.borrow_mut().end = end;
    }

    /// Load the selected range. A start date after the end date is reported
    /// and rejected before anything is requested, leaving the state as is. Returns the number of records shown.
    pub async fn load(&self) -> Result<usize> {
        self.stale.set(false);
        let (city, start, end) = {
            let state = self.state.borrow();
            (state.city.clone(), state.start, state.end)
        };
        let Some(city) = city else {
            self.state.borrow_mut().load_state = LoadState::Empty;
            return Ok(0);
        };
        if start > end {
            self.services.notifier.error(INVALID_RANGE);
            return Err(SectionError::Validation(INVALID_RANGE.to_string()));
        }

        let ticket = self.requests.issue();
        self.state.borrow_mut().load_state = LoadState::Loading;
        let query = HistoricalQuery::for_range(&city, start, end).with_limit(HISTORICAL_RECORD_LIMIT);
        let outcome = self.services.api.historical(&query).await;
        if !self.requests.is_current(ticket) {
            log::debug!("Discarding stale historical data for {}", city);
            return Ok(0);
        }

        let (records, synthetic) = match outcome {
            Ok(records) if !records.is_empty() => (records, false),
            Ok(_) => (self.sample(&city, start, end), true),
            Err(e) => {
                log::error!("Error loading historical data: {}", e);
                (self.sample(&city, start, end), true)
            }
        };
        let count = records.len();
        {
            let mut state = self.state.borrow_mut();
            state.summary = summarize(&records);
            state.records = records;
            state.synthetic = synthetic;
            state.load_state = LoadState::Loaded;
        }
        if synthetic {
            self.services.notifier.success("Showing sample historical data");
        } else {
            self.services
                .notifier
                .success(&format!("Loaded {} historical records", count));
        }
        Ok(count)
    }

    fn sample(&self, city: &CitySelection, start: NaiveDate, end: NaiveDate) -> Vec<HistoricalRecord> {
        log::info!("Using sample historical data for {}", city);
        sample_historical(&mut self.rng.borrow_mut(), city, start, end)
    }

    pub fn export_csv(&self) -> Result<(String, String)> {
        let state = self.state.borrow();
        let csv = historical_csv(&state.records)?;
        let city = state.city.as_ref().map_or("", |c| c.city.as_str());
        Ok((historical_file_name(city, state.start, state.end), csv))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::{ApiCall, ScriptedApi};
    use crate::testing::harness;
    use aqi_api::ApiError;
    use aqi_data::stats::TrendDirection;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, d).unwrap()
    }

    fn record(date: &str, aqi: u32) -> HistoricalRecord {
        HistoricalRecord {
            date: Some(date.to_string()),
            city: "Delhi".to_string(),
            state: "Delhi".to_string(),
            aqi_value: Some(aqi),
            pm25: Some(f64::from(aqi) * 0.6),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_default_range_is_trailing_thirty_days() {
        let h = harness(ScriptedApi::new());
        let historical = HistoricalController::new(h.services.clone());
        let state = historical.snapshot();
        assert_eq!(state.end, NaiveDate::from_ymd_opt(2024, 5, 10).unwrap());
        assert_eq!(state.start, NaiveDate::from_ymd_opt(2024, 4, 10).unwrap());
    }

    #[tokio::test]
    async fn test_loaded_records_are_summarized() {
        let api = ScriptedApi::new();
        api.push_historical(Ok(vec![
            record("2024-04-01", 80),
            record("2024-04-02", 150),
            record("2024-04-03", 220),
        ]));
        let h = harness(api);
        let historical = HistoricalController::new(h.services.clone());
        historical.set_city(CitySelection::new("Delhi", "Delhi"));
        historical.set_start(day(1));
        historical.set_end(day(3));

        assert_eq!(historical.load().await.unwrap(), 3);
        let state = historical.snapshot();
        assert!(!state.synthetic);
        let summary = state.summary.as_ref().unwrap();
        assert_eq!(summary.average, 150);
        assert_eq!(summary.direction(), TrendDirection::Worsening);
        assert_eq!(h.notifier.successes(), vec!["Loaded 3 historical records".to_string()]);

        let subset = state.records_in_range(day(2), day(3));
        assert_eq!(subset.len(), 2);

        let ApiCall::Historical(query) = &h.api.calls()[0] else {
            panic!("expected a historical query");
        };
        assert_eq!(query.limit, Some(HISTORICAL_RECORD_LIMIT));
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_sample() {
        let api = ScriptedApi::new();
        api.push_historical(Err(ApiError::Network("down".to_string())));
        let h = harness(api);
        let historical = HistoricalController::with_rng(h.services.clone(), Rng::with_seed(9));
        historical.set_city(CitySelection::new("Delhi", "Delhi"));
        historical.set_start(day(1));
        historical.set_end(day(10));

        assert_eq!(historical.load().await.unwrap(), 10);
        let state = historical.snapshot();
        assert!(state.synthetic);
        assert!(state.summary.is_some());
        assert_eq!(h.notifier.successes(), vec!["Showing sample historical data".to_string()]);

        let (name, csv) = historical.export_csv().unwrap();
        assert_eq!(name, "aqi_historical_Delhi_2024-04-01_2024-04-10.csv");
        assert_eq!(csv.lines().count(), 11);
    }

    #[tokio::test]
    async fn test_reversed_range_is_rejected_without_request() {
        let h = harness(ScriptedApi::new());
        let historical = HistoricalController::new(h.services.clone());
        historical.set_city(CitySelection::new("Delhi", "Delhi"));
        historical.set_start(day(20));
        historical.set_end(day(10));
        let before = historical.snapshot();

        let err = historical.load().await.unwrap_err();
        assert!(matches!(err, SectionError::Validation(_)));
        assert!(h.api.calls().is_empty());
        assert_eq!(h.notifier.errors(), vec![INVALID_RANGE.to_string()]);
        assert_eq!(historical.snapshot(), before);
    }

    #[tokio::test]
    async fn test_city_change_reloads() {
        let api = ScriptedApi::new();
        api.push_historical(Ok(vec![record("2024-04-01", 80)]));
        let h = harness(api);
        let historical = HistoricalController::new(h.services.clone());

        let shown = historical
            .select_city(CitySelection::new("Delhi", "Delhi"))
            .await
            .unwrap();
        assert_eq!(shown, 1);
        let cities: Vec<Option<String>> = h
            .api
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                ApiCall::Historical(q) => Some(q.city),
                _ => None,
            })
            .collect();
        assert_eq!(cities, vec![Some("Delhi".to_string())]);
        assert!(historical.snapshot().load_state.is_loaded());
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let api = ScriptedApi::new();
        api.push_slow_historical(4, Ok(vec![record("2024-04-01", 400)]));
        api.push_historical(Ok(vec![record("2024-04-02", 60), record("2024-04-03", 70)]));
        let h = harness(api);
        let historical = HistoricalController::new(h.services.clone());
        historical.set_city(CitySelection::new("Delhi", "Delhi"));
        historical.set_start(day(1));
        historical.set_end(day(3));

        let (slow, fast) = tokio::join!(historical.load(), historical.load());
        assert_eq!(slow.unwrap(), 0);
        assert_eq!(fast.unwrap(), 2);
        assert_eq!(historical.records().len(), 2);
    }
}
