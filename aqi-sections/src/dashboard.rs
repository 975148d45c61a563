//! The dashboard: active city, its current reading, the 24 hour trend and
//! the station map.

use crate::platform::{Delay, GeoOptions, Geolocator};
use crate::refresh::{toggle_message, AutoRefresh, RefreshToken};
use crate::{GeolocationError, LoadState, Services};
use aqi_api::{AqiApi, HistoricalQuery, RealtimeQuery};
use aqi_core::dates::format_timestamp;
use aqi_core::events::AppEvent;
use aqi_core::geo::{nearest_city, DEFAULT_CITY};
use aqi_core::models::{AqiReading, CitySelection, Coordinates, HistoricalRecord};
use aqi_core::preferences::{load_settings, save, SELECTED_CITY_KEY};
use aqi_core::sequence::{RequestSequence, RequestTicket};
use aqi_data::cache::TtlCache;
use aqi_data::map::{marker_specs, MarkerSpec};
use chrono::Duration;
use std::cell::RefCell;

/// Stations requested for the map.
pub const MAP_STATION_LIMIT: u32 = 50;
/// Records requested for the trend chart.
pub const TREND_RECORD_LIMIT: u32 = 24;

pub const NO_TREND_DATA: &str = "No trend data available for the last 24 hours";
pub const TREND_LOAD_FAILED: &str = "Failed to load trend data";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub selected: Option<CitySelection>,
    /// Text of the location heading; follows a clicked station.
    pub location: String,
    pub current: Option<AqiReading>,
    pub current_state: LoadState,
    pub trend: Vec<HistoricalRecord>,
    pub trend_state: LoadState,
    pub stations: Vec<AqiReading>,
    pub map_state: LoadState,
    pub user_position: Option<Coordinates>,
}

/// Display values of the current-AQI card.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentAqiView {
    pub location: String,
    pub aqi: String,
    pub color: Option<&'static str>,
    pub category: String,
    pub css_class: String,
    pub last_update: String,
    pub pollutants: Vec<(&'static str, String)>,
}

fn pollutant_text(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 => v.to_string(),
        _ => "--".to_string(),
    }
}

fn or_unknown(text: &str) -> &str {
    if text.is_empty() {
        "Unknown"
    } else {
        text
    }
}

impl DashboardState {
    pub fn current_view(&self) -> CurrentAqiView {
        match &self.current {
            Some(reading) => {
                let category = reading.category();
                CurrentAqiView {
                    location: self.location.clone(),
                    aqi: match reading.aqi() {
                        0 => "--".to_string(),
                        aqi => aqi.to_string(),
                    },
                    color: Some(category.color()),
                    category: category.label().to_string(),
                    css_class: format!("aqi-category {}", category.css_class()),
                    last_update: format!(
                        "Last updated: {}",
                        format_timestamp(reading.last_update.as_deref())
                    ),
                    pollutants: reading
                        .pollutants()
                        .into_iter()
                        .map(|(name, value)| (name, pollutant_text(value)))
                        .collect(),
                }
            }
            None => CurrentAqiView {
                location: self.location.clone(),
                aqi: "--".to_string(),
                color: None,
                category: "No Data".to_string(),
                css_class: "aqi-category".to_string(),
                last_update: "No recent data available".to_string(),
                pollutants: AqiReading::default()
                    .pollutants()
                    .into_iter()
                    .map(|(name, _)| (name, "--".to_string()))
                    .collect(),
            },
        }
    }

    /// Placeholder text for the trend chart, if it has nothing to draw.
    pub fn trend_message(&self) -> Option<&'static str> {
        match self.trend_state {
            LoadState::Empty => Some(NO_TREND_DATA),
            LoadState::Error(_) => Some(TREND_LOAD_FAILED),
            _ => None,
        }
    }
}

fn cache_key(query: &RealtimeQuery) -> String {
    format!(
        "realtime:{}:{}:{}",
        query.city.as_deref().unwrap_or("*"),
        query.state.as_deref().unwrap_or("*"),
        query.limit.unwrap_or(0)
    )
}

pub struct DashboardController<A, G, D> {
    services: Services<A, G, D>,
    state: RefCell<DashboardState>,
    city_requests: RequestSequence,
    map_requests: RequestSequence,
    cache: RefCell<TtlCache<Vec<AqiReading>>>,
    auto_refresh: AutoRefresh,
}

impl<A: AqiApi, G: Geolocator, D: Delay> DashboardController<A, G, D> {
    pub fn new(services: Services<A, G, D>) -> Self {
        let settings = load_settings(services.store.as_ref());
        Self {
            auto_refresh: AutoRefresh::from_settings(&settings),
            services,
            state: RefCell::new(DashboardState::default()),
            city_requests: RequestSequence::new(),
            map_requests: RequestSequence::new(),
            cache: RefCell::new(TtlCache::default()),
        }
    }

    pub fn snapshot(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    pub fn current_city(&self) -> Option<CitySelection> {
        self.state.borrow().selected.clone()
    }

    pub fn markers(&self) -> Vec<MarkerSpec> {
        marker_specs(&self.state.borrow().stations)
    }

    /// Populate the map, then pick the city nearest the user. Without a
    /// position the default city is used.
    pub async fn initialize(&self) -> CitySelection {
        self.load_map_data(false).await;
        let city = match self.locate().await {
            Ok(position) => {
                let (nearest, distance) = nearest_city(position);
                log::info!("Nearest city is {} ({:.1} km)", nearest.name, distance);
                nearest.selection()
            }
            Err(e) => {
                log::info!("Could not get user location: {}", e);
                DEFAULT_CITY.selection()
            }
        };
        self.select_city(city.clone()).await;
        city
    }

    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        let position = self
            .services
            .geolocator
            .current_position(&GeoOptions::default())
            .await?;
        self.state.borrow_mut().user_position = Some(position);
        Ok(position)
    }

    /// Make `city` the active city and load its reading and trend.
    pub async fn select_city(&self, city: CitySelection) {
        log::info!("Selecting {}", city);
        let ticket = self.city_requests.issue();
        {
            let mut state = self.state.borrow_mut();
            state.selected = Some(city.clone());
            state.location = city.to_string();
        }
        self.services
            .events
            .publish(&AppEvent::CityChanged(city.clone()));

        self.load_city_data(&city, ticket, false).await;
        self.load_trend(&city, ticket).await;

        if let Err(e) = save(self.services.store.as_ref(), SELECTED_CITY_KEY, &city) {
            log::warn!("Could not save selected city: {}", e);
        }
    }

    /// Reload everything for the active city, bypassing the cache. Returns
    /// false if there is no active city or any part failed.
    pub async fn refresh(&self) -> bool {
        let Some(city) = self.current_city() else {
            return false;
        };
        let ticket = self.city_requests.issue();
        let city_ok = self.load_city_data(&city, ticket, true).await;
        let trend_ok = self.load_trend(&city, ticket).await;
        let map_ok = self.load_map_data(true).await;

        if city_ok && trend_ok && map_ok {
            self.services.notifier.success("Data refreshed successfully");
            true
        } else {
            self.services.notifier.error("Failed to refresh data");
            false
        }
    }

    /// Show a clicked map station in the current-AQI card.
    pub fn select_station(&self, index: usize) -> Option<AqiReading> {
        let reading = self.state.borrow().stations.get(index).cloned()?;
        // A city load still in flight must not overwrite the station.
        self.city_requests.invalidate();
        let label = format!("{}, {}", or_unknown(&reading.city), or_unknown(&reading.state));
        {
            let mut state = self.state.borrow_mut();
            state.current = Some(reading.clone());
            state.current_state = LoadState::Loaded;
            state.location = label;
        }
        self.services
            .notifier
            .success(&format!("Selected {}, {}", reading.city, reading.state));
        self.services.events.publish(&AppEvent::AqiUpdated {
            city: CitySelection::new(reading.city.clone(), reading.state.clone()),
            aqi: reading.aqi(),
        });
        Some(reading)
    }

    async fn fetch_realtime(&self, query: &RealtimeQuery, force: bool) -> aqi_api::Result<Vec<AqiReading>> {
        let key = cache_key(query);
        let now = self.services.clock.now();
        if !force {
            let cached = self.cache.borrow_mut().get_at(&key, now);
            if let Some(readings) = cached {
                log::debug!("Cache hit for {}", key);
                return Ok(readings);
            }
        }
        let readings = self.services.api.realtime(query).await?;
        self.cache.borrow_mut().set_at(key, readings.clone(), now);
        Ok(readings)
    }

    async fn load_city_data(&self, city: &CitySelection, ticket: RequestTicket, force: bool) -> bool {
        self.state.borrow_mut().current_state = LoadState::Loading;
        let outcome = self.fetch_realtime(&RealtimeQuery::for_city(city, 1), force).await;
        if !self.city_requests.is_current(ticket) {
            log::debug!("Discarding stale reading for {} (request {})", city, ticket.number());
            return true;
        }

        let (ok, updated_aqi) = {
            let mut state = self.state.borrow_mut();
            match outcome {
                Ok(readings) => match readings.into_iter().next() {
                    Some(reading) => {
                        let aqi = reading.aqi();
                        state.current = Some(reading);
                        state.current_state = LoadState::Loaded;
                        (true, Some(aqi))
                    }
                    None => {
                        state.current = None;
                        state.current_state = LoadState::Empty;
                        (true, None)
                    }
                },
                Err(e) => {
                    log::error!("Error loading city data: {}", e);
                    state.current = None;
                    state.current_state = LoadState::Error(e.to_string());
                    (false, None)
                }
            }
        };
        if let Some(aqi) = updated_aqi {
            self.services.events.publish(&AppEvent::AqiUpdated {
                city: city.clone(),
                aqi,
            });
        }
        ok
    }

    async fn load_trend(&self, city: &CitySelection, ticket: RequestTicket) -> bool {
        let today = self.services.clock.today();
        let query = HistoricalQuery::for_range(city, today - Duration::days(1), today)
            .with_limit(TREND_RECORD_LIMIT);
        self.state.borrow_mut().trend_state = LoadState::Loading;
        let outcome = self.services.api.historical(&query).await;
        if !self.city_requests.is_current(ticket) {
            log::debug!("Discarding stale trend for {} (request {})", city, ticket.number());
            return true;
        }

        let mut state = self.state.borrow_mut();
        match outcome {
            Ok(records) if !records.is_empty() => {
                state.trend = records;
                state.trend_state = LoadState::Loaded;
                true
            }
            Ok(_) => {
                state.trend.clear();
                state.trend_state = LoadState::Empty;
                true
            }
            Err(e) => {
                log::error!("Error loading trend data: {}", e);
                state.trend.clear();
                state.trend_state = LoadState::Error(e.to_string());
                false
            }
        }
    }

    /// Load up to [`MAP_STATION_LIMIT`] stations. On failure the previous
    /// stations stay on the map.
    pub async fn load_map_data(&self, force: bool) -> bool {
        let ticket = self.map_requests.issue();
        self.state.borrow_mut().map_state = LoadState::Loading;
        let outcome = self
            .fetch_realtime(&RealtimeQuery::all(MAP_STATION_LIMIT), force)
            .await;
        if !self.map_requests.is_current(ticket) {
            log::debug!("Discarding stale map data (request {})", ticket.number());
            return true;
        }

        let mut state = self.state.borrow_mut();
        match outcome {
            Ok(readings) => {
                log::info!("Loaded {} stations for the map", readings.len());
                state.map_state = if readings.is_empty() {
                    LoadState::Empty
                } else {
                    LoadState::Loaded
                };
                state.stations = readings;
                true
            }
            Err(e) => {
                log::error!("Error loading map data: {}", e);
                state.map_state = LoadState::Error(e.to_string());
                false
            }
        }
    }

    pub fn auto_refresh(&self) -> &AutoRefresh {
        &self.auto_refresh
    }

    pub fn start_auto_refresh(&self) -> Option<RefreshToken> {
        self.auto_refresh.start()
    }

    pub fn toggle_auto_refresh(&self) -> Option<RefreshToken> {
        let token = self.auto_refresh.toggle();
        self.services
            .notifier
            .success(toggle_message(self.auto_refresh.is_enabled()));
        token
    }

    pub fn set_refresh_interval(&self, minutes: u32) -> Option<RefreshToken> {
        self.auto_refresh.set_interval_minutes(minutes)
    }

    /// Refresh every interval until `token` is superseded.
    pub async fn run_auto_refresh(&self, token: RefreshToken) {
        let this = self;
        self.auto_refresh
            .run(token, self.services.delay.as_ref(), move || async move {
                this.refresh().await;
            })
            .await;
    }
}
