//! In-memory stand-ins for the backend and browser services, used by the
//! tests. Enabled by the `testing` feature.

use crate::error::GeolocationError;
use crate::platform::{Delay, GeoOptions, Geolocator};
use aqi_api::{
    AqiApi, ApiError, ForecastQuery, ForecastTarget, HistoricalQuery, RealtimeQuery, Result,
};
use aqi_core::models::{AqiReading, Coordinates, ForecastEntry, HistoricalRecord};
use aqi_core::recommendation::HealthRecommendation;
use serde_json::{json, Value};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::poll_fn;
use std::task::Poll;
use std::time::Duration;

/// Give other futures on the same task a chance to run.
pub async fn yield_now() {
    let mut yielded = false;
    poll_fn(|cx| {
        if yielded {
            Poll::Ready(())
        } else {
            yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    })
    .await
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Realtime(RealtimeQuery),
    Historical(HistoricalQuery),
    Forecast(ForecastQuery),
    Health { aqi: u32, sensitive_group: bool },
    Generate { cities: Vec<ForecastTarget>, forecast_days: u32 },
    Refresh(Vec<String>),
}

/// A fake backend. Queued responses are answered first, in order; with the
/// queue empty, realtime queries are served from the station table and
/// every other endpoint succeeds with no data.
///
/// A queued response may carry a number of scheduler yields to wait before
/// answering, to simulate a slow request.
#[derive(Default)]
pub struct ScriptedApi {
    stations: RefCell<Vec<AqiReading>>,
    realtime: RefCell<VecDeque<(usize, Result<Vec<AqiReading>>)>>,
    historical: RefCell<VecDeque<(usize, Result<Vec<HistoricalRecord>>)>>,
    forecast: RefCell<VecDeque<(usize, Result<Vec<ForecastEntry>>)>>,
    health: RefCell<VecDeque<Result<Vec<HealthRecommendation>>>>,
    generate: RefCell<VecDeque<Result<Value>>>,
    calls: RefCell<Vec<ApiCall>>,
}

fn server_error() -> ApiError {
    ApiError::HttpStatus { status: 500 }
}

async fn answer<T>(queue: &RefCell<VecDeque<(usize, Result<T>)>>) -> Option<Result<T>> {
    let (yields, response) = queue.borrow_mut().pop_front()?;
    for _ in 0..yields {
        yield_now().await;
    }
    Some(response)
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_station(self, reading: AqiReading) -> Self {
        self.stations.borrow_mut().push(reading);
        self
    }

    pub fn push_realtime(&self, response: Result<Vec<AqiReading>>) {
        self.realtime.borrow_mut().push_back((0, response));
    }

    pub fn push_slow_realtime(&self, yields: usize, response: Result<Vec<AqiReading>>) {
        self.realtime.borrow_mut().push_back((yields, response));
    }

    pub fn push_historical(&self, response: Result<Vec<HistoricalRecord>>) {
        self.historical.borrow_mut().push_back((0, response));
    }

    pub fn push_slow_historical(&self, yields: usize, response: Result<Vec<HistoricalRecord>>) {
        self.historical.borrow_mut().push_back((yields, response));
    }

    pub fn push_forecast(&self, response: Result<Vec<ForecastEntry>>) {
        self.forecast.borrow_mut().push_back((0, response));
    }

    pub fn push_slow_forecast(&self, yields: usize, response: Result<Vec<ForecastEntry>>) {
        self.forecast.borrow_mut().push_back((yields, response));
    }

    pub fn push_health(&self, response: Result<Vec<HealthRecommendation>>) {
        self.health.borrow_mut().push_back(response);
    }

    pub fn push_generate(&self, response: Result<Value>) {
        self.generate.borrow_mut().push_back(response);
    }

    pub fn fail_generate(&self) {
        self.push_generate(Err(server_error()));
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, pick: impl Fn(&ApiCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| pick(call)).count()
    }

    fn record(&self, call: ApiCall) {
        self.calls.borrow_mut().push(call);
    }

    fn stations_for(&self, query: &RealtimeQuery) -> Vec<AqiReading> {
        let matches = |field: &str, wanted: &Option<String>| {
            wanted.as_deref().map_or(true, |w| w.eq_ignore_ascii_case(field))
        };
        self.stations
            .borrow()
            .iter()
            .filter(|s| matches(&s.city, &query.city) && matches(&s.state, &query.state))
            .take(query.limit.map_or(usize::MAX, |l| l as usize))
            .cloned()
            .collect()
    }
}

impl AqiApi for ScriptedApi {
    async fn realtime(&self, query: &RealtimeQuery) -> Result<Vec<AqiReading>> {
        self.record(ApiCall::Realtime(query.clone()));
        match answer(&self.realtime).await {
            Some(response) => response,
            None => Ok(self.stations_for(query)),
        }
    }

    async fn historical(&self, query: &HistoricalQuery) -> Result<Vec<HistoricalRecord>> {
        self.record(ApiCall::Historical(query.clone()));
        answer(&self.historical).await.unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn forecast(&self, query: &ForecastQuery) -> Result<Vec<ForecastEntry>> {
        self.record(ApiCall::Forecast(query.clone()));
        answer(&self.forecast).await.unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn health_recommendations(
        &self,
        aqi: u32,
        sensitive_group: bool,
    ) -> Result<Vec<HealthRecommendation>> {
        self.record(ApiCall::Health {
            aqi,
            sensitive_group,
        });
        let queued = self.health.borrow_mut().pop_front();
        queued.unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn generate_forecasts(&self, cities: &[ForecastTarget], forecast_days: u32) -> Result<Value> {
        self.record(ApiCall::Generate {
            cities: cities.to_vec(),
            forecast_days,
        });
        let queued = self.generate.borrow_mut().pop_front();
        queued.unwrap_or_else(|| Ok(json!({"success": true})))
    }

    async fn refresh_data(&self, cities: &[String]) -> Result<Value> {
        self.record(ApiCall::Refresh(cities.to_vec()));
        Ok(json!({"success": true}))
    }
}

/// A timer that returns after one scheduler yield and remembers every
/// requested duration.
#[derive(Debug, Default)]
pub struct InstantDelay {
    sleeps: RefCell<Vec<Duration>>,
}

impl InstantDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }
}

impl Delay for InstantDelay {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
        yield_now().await;
    }
}

/// Always answers with the same position or error.
#[derive(Debug)]
pub struct FixedGeolocator {
    outcome: std::result::Result<Coordinates, GeolocationError>,
    requests: Cell<usize>,
}

impl FixedGeolocator {
    pub fn at(position: Coordinates) -> Self {
        Self {
            outcome: Ok(position),
            requests: Cell::new(0),
        }
    }

    pub fn failing(error: GeolocationError) -> Self {
        Self {
            outcome: Err(error),
            requests: Cell::new(0),
        }
    }

    pub fn requests(&self) -> usize {
        self.requests.get()
    }
}

impl Geolocator for FixedGeolocator {
    async fn current_position(
        &self,
        _options: &GeoOptions,
    ) -> std::result::Result<Coordinates, GeolocationError> {
        self.requests.set(self.requests.get() + 1);
        self.outcome.clone()
    }
}
