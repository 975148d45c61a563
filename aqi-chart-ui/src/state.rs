//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.
//! The section signals hold the latest controller snapshots; the app copies
//! them in after every controller operation.

use crate::notifier::Toast;
use aqi_core::events::Section;
use aqi_core::preferences::AppSettings;
use aqi_sections::dashboard::DashboardState;
use aqi_sections::forecast::ForecastState;
use aqi_sections::health::HealthState;
use aqi_sections::historical::HistoricalState;
use dioxus::prelude::*;

/// Shared application state for the dashboard.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Visible section
    pub section: Signal<Section>,
    /// Number of API calls in flight; the overlay shows while non-zero
    pub loading: Signal<u32>,
    /// Visible toasts, oldest first
    pub toasts: Signal<Vec<Toast>>,
    pub dashboard: Signal<DashboardState>,
    pub forecast: Signal<ForecastState>,
    pub historical: Signal<HistoricalState>,
    pub health: Signal<HealthState>,
    pub settings: Signal<AppSettings>,
    /// Whether the settings panel is open
    pub settings_open: Signal<bool>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            section: Signal::new(Section::Dashboard),
            loading: Signal::new(0),
            toasts: Signal::new(Vec::new()),
            dashboard: Signal::new(DashboardState::default()),
            forecast: Signal::new(ForecastState::default()),
            historical: Signal::new(HistoricalState::default()),
            health: Signal::new(HealthState::default()),
            settings: Signal::new(AppSettings::default()),
            settings_open: Signal::new(false),
        }
    }

    pub fn is_loading(&self) -> bool {
        (self.loading)() > 0
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
