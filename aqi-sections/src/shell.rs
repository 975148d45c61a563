//! The app shell: owns the four controllers, routes between sections and
//! keeps the followers in step with the dashboard's city and AQI.

use crate::dashboard::DashboardController;
use crate::error::Result;
use crate::forecast::ForecastController;
use crate::health::HealthController;
use crate::historical::HistoricalController;
use crate::platform::{Delay, Geolocator};
use crate::refresh::RefreshToken;
use crate::router::{Connectivity, Navigation, Router, CONNECTION_LOST, CONNECTION_RESTORED, VISIBILITY_REFRESH_DELAY};
use crate::Services;
use aqi_api::AqiApi;
use aqi_core::events::{AppEvent, Section, SubscriptionId};
use aqi_core::models::CitySelection;
use aqi_core::preferences::{load_settings, save, AppSettings, APP_SETTINGS_KEY};
use aqi_data::export::{snapshot_file_name, to_pretty_json, ExportSnapshot};
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppShell<A, G, D> {
    services: Services<A, G, D>,
    router: RefCell<Router>,
    pub dashboard: Rc<DashboardController<A, G, D>>,
    pub forecast: Rc<ForecastController<A, G, D>>,
    pub historical: Rc<HistoricalController<A, G, D>>,
    pub health: Rc<HealthController<A, G, D>>,
    subscription: SubscriptionId,
}

impl<A, G, D> AppShell<A, G, D>
where
    A: AqiApi + 'static,
    G: Geolocator + 'static,
    D: Delay + 'static,
{
    pub fn new(services: Services<A, G, D>) -> Self {
        let dashboard = Rc::new(DashboardController::new(services.clone()));
        let forecast = Rc::new(ForecastController::new(services.clone()));
        let historical = Rc::new(HistoricalController::new(services.clone()));
        let health = Rc::new(HealthController::new(services.clone()));

        let (f, h, hl) = (
            Rc::downgrade(&forecast),
            Rc::downgrade(&historical),
            Rc::downgrade(&health),
        );
        let subscription = services.events.subscribe(move |event| match event {
            AppEvent::CityChanged(city) => {
                if let Some(forecast) = f.upgrade() {
                    forecast.set_city(city.clone());
                }
                if let Some(historical) = h.upgrade() {
                    historical.set_city(city.clone());
                }
            }
            AppEvent::AqiUpdated { aqi, .. } => {
                if let Some(health) = hl.upgrade() {
                    health.set_aqi(*aqi);
                }
            }
            AppEvent::SectionShown(section) => log::debug!("Section shown: {}", section),
        });

        Self {
            services,
            router: RefCell::new(Router::new()),
            dashboard,
            forecast,
            historical,
            health,
            subscription,
        }
    }

    pub fn current_section(&self) -> Section {
        self.router.borrow().current()
    }

    pub fn services(&self) -> &Services<A, G, D> {
        &self.services
    }

    /// Route for the URL hash the page was opened with.
    pub fn start_route(&self, hash: &str) -> Navigation {
        let navigation = self.router.borrow_mut().start(hash);
        self.announce(navigation.section);
        navigation
    }

    pub fn navigate(&self, section: Section) -> Navigation {
        let navigation = self.router.borrow_mut().show(section);
        self.announce(section);
        navigation
    }

    pub fn pop_state(&self, state: Option<&str>) -> Navigation {
        let navigation = self.router.borrow_mut().pop_state(state);
        self.announce(navigation.section);
        navigation
    }

    fn announce(&self, section: Section) {
        self.services.events.publish(&AppEvent::SectionShown(section));
    }

    /// Locate the user and load the dashboard, then whatever section is
    /// showing.
    pub async fn start(&self) -> CitySelection {
        let city = self.dashboard.initialize().await;
        self.enter(self.current_section()).await;
        city
    }

    /// Load the data of a section that just became visible.
    pub async fn enter(&self, section: Section) {
        match section {
            Section::Dashboard => {}
            Section::Forecast => self.forecast.load().await,
            Section::Historical => {
                // A rejected range was already reported to the user.
                let _ = self.historical.load().await;
            }
            Section::Health => self.health.load().await,
        }
    }

    pub async fn select_city(&self, city: CitySelection) {
        self.dashboard.select_city(city).await;
        self.sync_followers().await;
    }

    /// Reload the visible section if a city or AQI change made it stale.
    pub async fn sync_followers(&self) {
        let stale = match self.current_section() {
            Section::Dashboard => false,
            Section::Forecast => self.forecast.is_stale(),
            Section::Historical => self.historical.is_stale(),
            Section::Health => self.health.is_stale(),
        };
        if stale {
            self.enter(self.current_section()).await;
        }
    }

    pub async fn refresh_current(&self) {
        match self.current_section() {
            Section::Dashboard => {
                self.dashboard.refresh().await;
            }
            Section::Forecast => self.forecast.refresh().await,
            section => self.enter(section).await,
        }
    }

    pub async fn connectivity_changed(&self, change: Connectivity) {
        match change {
            Connectivity::Online => {
                self.services.notifier.success(CONNECTION_RESTORED);
                self.refresh_current().await;
            }
            Connectivity::Offline => self.services.notifier.error(CONNECTION_LOST),
            Connectivity::Visible => {
                self.services.delay.sleep(VISIBILITY_REFRESH_DELAY).await;
                self.refresh_current().await;
            }
        }
    }

    pub fn settings(&self) -> AppSettings {
        load_settings(self.services.store.as_ref())
    }

    /// Save `settings` and apply the refresh schedule. Returns a token when
    /// a new auto-refresh loop should be started.
    pub fn apply_settings(&self, settings: &AppSettings) -> Option<RefreshToken> {
        if let Err(e) = save(self.services.store.as_ref(), APP_SETTINGS_KEY, settings) {
            log::warn!("Could not save settings: {}", e);
        }
        let schedule = self.dashboard.auto_refresh();
        if settings.auto_refresh {
            schedule.enable_with_interval(settings.refresh_interval_minutes)
        } else {
            schedule.disable();
            None
        }
    }

    pub fn export_snapshot(&self) -> ExportSnapshot {
        ExportSnapshot {
            timestamp: self.services.clock.now(),
            current_section: self.current_section().id().to_string(),
            dashboard: self.dashboard.current_city(),
            forecast: self.forecast.entries(),
            historical: self.historical.records(),
            health: Some(self.health.snapshot().as_snapshot()),
        }
    }

    /// File name and pretty JSON of everything loaded.
    pub fn export_snapshot_json(&self) -> Result<(String, String)> {
        let json = to_pretty_json(&self.export_snapshot())?;
        Ok((snapshot_file_name(self.services.clock.today()), json))
    }
}

impl<A, G, D> Drop for AppShell<A, G, D> {
    fn drop(&mut self) {
        self.services.events.unsubscribe(self.subscription);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::{ApiCall, ScriptedApi};
    use crate::router::HistoryAction;
    use crate::testing::harness;
    use aqi_core::models::AqiReading;
    use aqi_core::preferences::Theme;

    fn station(city: &str, state: &str, aqi: u32) -> AqiReading {
        AqiReading {
            city: city.to_string(),
            state: state.to_string(),
            aqi_value: Some(aqi),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_city_change_reaches_followers() {
        let api = ScriptedApi::new()
            .with_station(station("Mumbai", "Maharashtra", 180))
            .with_station(station("Delhi", "Delhi", 320));
        let h = harness(api);
        let shell = AppShell::new(h.services.clone());
        shell.start().await;

        assert_eq!(
            shell.forecast.snapshot().city,
            Some(CitySelection::new("Mumbai", "Maharashtra"))
        );
        assert_eq!(shell.health.snapshot().aqi, 180);
        // Followers are not visible, so nothing was loaded for them yet.
        assert_eq!(h.api.count(|c| matches!(c, ApiCall::Forecast(_))), 0);

        let nav = shell.navigate(Section::Health);
        assert_eq!(nav.history, HistoryAction::Push);
        shell.enter(nav.section).await;
        assert_eq!(h.api.count(|c| matches!(c, ApiCall::Health { .. })), 1);

        shell.select_city(CitySelection::new("Delhi", "Delhi")).await;
        assert_eq!(shell.health.snapshot().aqi, 320);
        assert_eq!(h.api.count(|c| matches!(c, ApiCall::Health { .. })), 2);
        assert!(shell.forecast.is_stale());
    }

    #[tokio::test]
    async fn test_start_loads_visible_section() {
        let h = harness(ScriptedApi::new().with_station(station("Mumbai", "Maharashtra", 150)));
        let shell = AppShell::new(h.services.clone());
        let nav = shell.start_route("#historical");
        assert_eq!(nav.section, Section::Historical);
        assert_eq!(nav.history, HistoryAction::Replace);

        shell.start().await;
        assert!(shell.historical.snapshot().load_state.is_loaded());
        assert!(!shell.historical.is_stale());
        assert!(shell.forecast.is_stale());
    }

    #[tokio::test]
    async fn test_connectivity_messages() {
        let h = harness(ScriptedApi::new());
        let shell = AppShell::new(h.services.clone());
        shell.connectivity_changed(Connectivity::Offline).await;
        shell.connectivity_changed(Connectivity::Online).await;
        assert_eq!(h.notifier.errors(), vec![CONNECTION_LOST.to_string()]);
        assert_eq!(h.notifier.successes(), vec![CONNECTION_RESTORED.to_string()]);

        shell.connectivity_changed(Connectivity::Visible).await;
        assert_eq!(h.delay.sleeps(), vec![VISIBILITY_REFRESH_DELAY]);
    }

    #[tokio::test]
    async fn test_settings_drive_auto_refresh() {
        let h = harness(ScriptedApi::new());
        let shell = AppShell::new(h.services.clone());
        let mut settings = shell.settings();
        settings.refresh_interval_minutes = 15;
        settings.theme = Theme::Dark;
        let token = shell.apply_settings(&settings).unwrap();
        assert!(shell.dashboard.auto_refresh().is_current(token));
        assert_eq!(shell.dashboard.auto_refresh().interval_minutes(), 15);
        assert_eq!(shell.settings().theme, Theme::Dark);

        settings.auto_refresh = false;
        assert!(shell.apply_settings(&settings).is_none());
        assert!(!shell.dashboard.auto_refresh().is_current(token));
        assert!(!shell.dashboard.auto_refresh().is_enabled());
    }

    #[tokio::test]
    async fn test_snapshot_export() {
        let h = harness(ScriptedApi::new().with_station(station("Mumbai", "Maharashtra", 95)));
        let shell = AppShell::new(h.services.clone());
        shell.start().await;
        shell.navigate(Section::Forecast);
        shell.enter(Section::Forecast).await;

        let (name, json) = shell.export_snapshot_json().unwrap();
        assert_eq!(name, "air_quality_data_export_2024-05-10.json");
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["currentSection"], "forecast");
        assert_eq!(value["dashboard"]["city"], "Mumbai");
        assert_eq!(value["forecast"].as_array().unwrap().len(), 7);
        assert_eq!(value["health"]["currentAQI"], 95);
    }

    #[tokio::test]
    async fn test_drop_unsubscribes() {
        let h = harness(ScriptedApi::new());
        let shell = AppShell::new(h.services.clone());
        assert_eq!(h.services.events.subscriber_count(), 1);
        drop(shell);
        assert_eq!(h.services.events.subscriber_count(), 0);
    }
}
