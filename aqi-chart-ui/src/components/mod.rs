//! Reusable Dioxus RSX components for the AQI dashboard.

mod aqi_card;
mod chart_container;
mod chart_header;
mod city_selector;
mod date_range_picker;
mod error_display;
mod forecast_cards;
mod historical_stats;
mod loading_spinner;
mod nav_bar;
mod recommendation_cards;
mod settings_panel;
mod toasts;

pub use aqi_card::CurrentAqiCard;
pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use city_selector::CitySelector;
pub use date_range_picker::DateRangePicker;
pub use error_display::ErrorDisplay;
pub use forecast_cards::{ForecastCards, ForecastSummaryBar};
pub use historical_stats::HistoricalStats;
pub use loading_spinner::{LoadingOverlay, LoadingSpinner};
pub use nav_bar::NavBar;
pub use recommendation_cards::{AqiContextCard, RecommendationCards};
pub use settings_panel::SettingsPanel;
pub use toasts::ToastStack;
