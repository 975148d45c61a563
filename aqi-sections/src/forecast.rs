//! Seven-day forecast for the active city.
//!
//! When the backend has no forecast the controller asks it to generate one,
//! waits [`GENERATION_RETRY_DELAY`], and reads once more. If generation fails
//! or the second read is still empty, a synthetic series is shown instead and
//! flagged as such.

use crate::platform::Delay;
use crate::{LoadState, Services};
use aqi_api::{AqiApi, ForecastQuery, ForecastTarget};
use aqi_core::category::AqiCategory;
use aqi_core::dates::{local_date, short_date_label, weekday_label};
use aqi_core::models::{CitySelection, ForecastEntry, DEFAULT_FORECAST_CONFIDENCE};
use aqi_core::sequence::{RequestSequence, RequestTicket};
use aqi_data::export::{forecast_csv, forecast_file_name};
use aqi_data::sample::sample_forecast;
use aqi_data::stats::{summarize_forecast, ForecastSummary};
use chrono::NaiveDate;
use fastrand::Rng;
use std::cell::{Cell, RefCell};
use std::time::Duration;

pub const FORECAST_DAYS: u32 = 7;
pub const GENERATION_RETRY_DELAY: Duration = Duration::from_secs(1);
/// Entries shown as cards above the chart.
pub const FORECAST_CARD_COUNT: usize = 3;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastState {
    pub city: Option<CitySelection>,
    pub entries: Vec<ForecastEntry>,
    pub load_state: LoadState,
    /// The entries were made up locally.
    pub synthetic: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastCard {
    pub date_label: String,
    pub aqi: u32,
    pub color: &'static str,
    pub category: AqiCategory,
    pub confidence_percent: u32,
}

impl ForecastState {
    pub fn cards(&self) -> Vec<ForecastCard> {
        self.entries
            .iter()
            .take(FORECAST_CARD_COUNT)
            .map(|entry| {
                let date = Some(entry.forecast_date.as_str());
                ForecastCard {
                    date_label: format!("{}, {}", weekday_label(date), short_date_label(date)),
                    aqi: entry.aqi(),
                    color: AqiCategory::from_aqi(f64::from(entry.aqi())).color(),
                    category: entry.category(),
                    confidence_percent: entry.confidence_percent(DEFAULT_FORECAST_CONFIDENCE),
                }
            })
            .collect()
    }

    pub fn summary(&self) -> Option<ForecastSummary> {
        summarize_forecast(&self.entries)
    }

    /// The entry whose forecast date falls on `date`.
    pub fn for_date(&self, date: NaiveDate) -> Option<&ForecastEntry> {
        self.entries
            .iter()
            .find(|entry| local_date(&entry.forecast_date) == Some(date))
    }
}

pub struct ForecastController<A, G, D> {
    services: Services<A, G, D>,
    state: RefCell<ForecastState>,
    requests: RequestSequence,
    rng: RefCell<Rng>,
    stale: Cell<bool>,
}

impl<A: AqiApi, G, D: Delay> ForecastController<A, G, D> {
    pub fn new(services: Services<A, G, D>) -> Self {
        Self::with_rng(services, Rng::new())
    }

    pub fn with_rng(services: Services<A, G, D>, rng: Rng) -> Self {
        Self {
            services,
            state: RefCell::new(ForecastState::default()),
            requests: RequestSequence::new(),
            rng: RefCell::new(rng),
            stale: Cell::new(false),
        }
    }

    pub fn snapshot(&self) -> ForecastState {
        self.state.borrow().clone()
    }

    pub fn entries(&self) -> Vec<ForecastEntry> {
        self.state.borrow().entries.clone()
    }

    /// Switch to `city`. The data is reloaded on the next [`Self::load`].
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

    pub async fn load(&self) {
        self.stale.set(false);
        let city = self.state.borrow().city.clone();
        let Some(city) = city else {
            self.state.borrow_mut().load_state = LoadState::Empty;
            return;
        };
        let ticket = self.requests.issue();
        self.state.borrow_mut().load_state = LoadState::Loading;

        let outcome = self
            .services
            .api
            .forecast(&ForecastQuery::new(&city, FORECAST_DAYS))
            .await;
        if !self.requests.is_current(ticket) {
            log::debug!("Discarding stale forecast for {}", city);
            return;
        }
        match outcome {
            Ok(entries) if !entries.is_empty() => self.show(entries, false),
            Ok(_) => {
                log::info!("No forecast for {}, requesting generation", city);
                self.generate_for(&city, ticket).await;
            }
            Err(e) => {
                log::error!("Error loading forecast data: {}", e);
                let mut state = self.state.borrow_mut();
                state.entries.clear();
                state.synthetic = false;
                state.load_state = LoadState::Error(e.to_string());
            }
        }
    }

    /// Ask the backend to generate a forecast for the active city, as from
    /// the "Generate Forecasts" button.
    pub async fn generate(&self) {
        let city = self.state.borrow().city.clone();
        let Some(city) = city else {
            return;
        };
        let ticket = self.requests.issue();
        self.state.borrow_mut().load_state = LoadState::Loading;
        self.generate_for(&city, ticket).await;
    }

    async fn generate_for(&self, city: &CitySelection, ticket: RequestTicket) {
        let targets = [ForecastTarget::for_city(city)];
        let generated = self
            .services
            .api
            .generate_forecasts(&targets, FORECAST_DAYS)
            .await;
        if !self.requests.is_current(ticket) {
            return;
        }
        if let Err(e) = generated {
            log::error!("Error generating forecasts: {}", e);
            self.services
                .notifier
                .error("Failed to generate forecasts. Using sample data.");
            self.show_sample(city);
            return;
        }

        self.services.notifier.success("Forecasts generated successfully");
        self.services.delay.sleep(GENERATION_RETRY_DELAY).await;
        if !self.requests.is_current(ticket) {
            return;
        }
        let reread = self
            .services
            .api
            .forecast(&ForecastQuery::new(city, FORECAST_DAYS))
            .await;
        if !self.requests.is_current(ticket) {
            return;
        }
        match reread {
            Ok(entries) if !entries.is_empty() => self.show(entries, false),
            Ok(_) => self.show_sample(city),
            Err(e) => {
                log::error!("Error reloading generated forecast: {}", e);
                self.show_sample(city);
            }
        }
    }

    fn show(&self, entries: Vec<ForecastEntry>, synthetic: bool) {
        log::info!("Showing {} forecast entries", entries.len());
        let mut state = self.state.borrow_mut();
        state.entries = entries;
        state.synthetic = synthetic;
        state.load_state = LoadState::Loaded;
    }

    fn show_sample(&self, city: &CitySelection) {
        let today = self.services.clock.today();
        let entries = sample_forecast(&mut self.rng.borrow_mut(), city, today);
        self.show(entries, true);
        self.services.notifier.success("Showing sample forecast data");
    }

    pub async fn refresh(&self) {
        self.load().await;
        if matches!(self.state.borrow().load_state, LoadState::Error(_)) {
            self.services.notifier.error("Failed to refresh forecast data");
        } else {
            self.services.notifier.success("Forecast data refreshed");
        }
    }

    /// File name and CSV text of the loaded forecast.
    pub fn export_csv(&self) -> crate::Result<(String, String)> {
        let state = self.state.borrow();
        let csv = forecast_csv(&state.entries)?;
        let city = state.city.as_ref().map_or("", |c| c.city.as_str());
        Ok((forecast_file_name(city, self.services.clock.today()), csv))
    }
}
