//! The four page sections. Each reads its snapshot from `AppState` and
//! turns user input into an [`AppCommand`].

use crate::commands::AppCommand;
use aqi_chart_ui::components::{
    AqiContextCard, ChartContainer, ChartHeader, CitySelector, CurrentAqiCard, DateRangePicker,
    ErrorDisplay, ForecastCards, ForecastSummaryBar, HistoricalStats, LoadingSpinner,
    RecommendationCards,
};
use aqi_chart_ui::state::AppState;
use aqi_data::chart::{FORECAST_CANVAS_ID, HISTORICAL_CANVAS_ID, TREND_CANVAS_ID};
use aqi_data::map::MAP_CONTAINER_ID;
use aqi_sections::LoadState;
use dioxus::prelude::*;

const SAMPLE_DATA_NOTE: &str = "Showing sample data";

#[derive(Props, Clone, PartialEq)]
pub struct SectionProps {
    pub on_command: EventHandler<AppCommand>,
}

fn error_message(state: &LoadState) -> Option<String> {
    match state {
        LoadState::Error(message) => Some(message.clone()),
        _ => None,
    }
}

fn button_style() -> &'static str {
    "padding: 6px 12px; margin-right: 8px; border-radius: 4px; border: 1px solid #d1d5db; background: #fff; cursor: pointer;"
}

#[component]
pub fn DashboardSection(props: SectionProps) -> Element {
    let state = use_context::<AppState>();
    let dashboard = state.dashboard.read();
    let settings = state.settings.read();
    let on_command = props.on_command;
    let view = dashboard.current_view();
    let trend_message = dashboard.trend_message().map(str::to_string);
    let auto_label = if settings.auto_refresh {
        format!("Auto-refresh: every {} min", settings.refresh_interval_minutes)
    } else {
        "Auto-refresh: off".to_string()
    };

    rsx! {
        div {
            style: "display: flex; justify-content: space-between; align-items: center; flex-wrap: wrap;",
            CitySelector {
                id: "citySelect",
                selected: dashboard.selected.clone(),
                on_select: move |city| on_command.call(AppCommand::SelectCity(city)),
            }
            button {
                id: "autoRefreshToggle",
                style: button_style(),
                onclick: move |_| on_command.call(AppCommand::ToggleAutoRefresh),
                i { class: "fas fa-sync-alt", style: "margin-right: 6px;" }
                "{auto_label}"
            }
        }
        if let Some(message) = error_message(&dashboard.current_state) {
            ErrorDisplay { message, on_retry: move |_| on_command.call(AppCommand::Refresh) }
        }
        CurrentAqiCard { view }
        div {
            style: "margin-top: 16px;",
            ChartHeader { title: "24-Hour AQI Trend" }
            ChartContainer {
                id: "{TREND_CANVAS_ID}",
                loading: dashboard.trend_state.is_loading(),
                message: trend_message,
                min_height: 300,
            }
        }
        div {
            style: "margin-top: 16px;",
            ChartHeader { title: "Monitoring Stations", icon: "fas fa-map-marker-alt" }
            if dashboard.map_state.is_loading() {
                LoadingSpinner {}
            }
            div {
                id: MAP_CONTAINER_ID,
                style: "height: 420px; width: 100%; border-radius: 8px;",
            }
        }
    }
}

#[component]
pub fn ForecastSection(props: SectionProps) -> Element {
    let state = use_context::<AppState>();
    let forecast = state.forecast.read();
    let on_command = props.on_command;
    let note = if forecast.synthetic { SAMPLE_DATA_NOTE.to_string() } else { String::new() };
    let empty_message = (forecast.load_state == LoadState::Empty)
        .then(|| "No forecast data available".to_string());

    rsx! {
        div {
            style: "display: flex; align-items: center; flex-wrap: wrap; gap: 8px;",
            CitySelector {
                id: "forecastCitySelect",
                selected: forecast.city.clone(),
                on_select: move |city| on_command.call(AppCommand::ForecastCity(city)),
            }
            button {
                id: "generateForecast",
                style: button_style(),
                disabled: forecast.load_state.is_loading(),
                onclick: move |_| on_command.call(AppCommand::GenerateForecast),
                i { class: "fas fa-magic", style: "margin-right: 6px;" }
                "Generate Forecast"
            }
            button {
                id: "exportForecast",
                style: button_style(),
                onclick: move |_| on_command.call(AppCommand::ExportForecast),
                i { class: "fas fa-download", style: "margin-right: 6px;" }
                "Export CSV"
            }
        }
        if let Some(message) = error_message(&forecast.load_state) {
            ErrorDisplay { message, on_retry: move |_| on_command.call(AppCommand::Refresh) }
        }
        ForecastCards { cards: forecast.cards() }
        if let Some(summary) = forecast.summary() {
            ForecastSummaryBar { summary }
        }
        div {
            style: "margin-top: 16px;",
            ChartHeader { title: "7-Day Forecast", icon: "fas fa-calendar-alt", note }
            ChartContainer {
                id: "{FORECAST_CANVAS_ID}",
                loading: forecast.load_state.is_loading(),
                message: empty_message,
            }
        }
    }
}

#[component]
pub fn HistoricalSection(props: SectionProps) -> Element {
    let state = use_context::<AppState>();
    let historical = state.historical.read();
    let on_command = props.on_command;
    let note = if historical.synthetic { SAMPLE_DATA_NOTE.to_string() } else { String::new() };
    let empty_message = (historical.load_state == LoadState::Empty)
        .then(|| "No historical data for this range".to_string());

    rsx! {
        div {
            style: "display: flex; align-items: center; flex-wrap: wrap; gap: 12px;",
            CitySelector {
                id: "historicalCitySelect",
                selected: historical.city.clone(),
                on_select: move |city| on_command.call(AppCommand::HistoricalCity(city)),
            }
            DateRangePicker {
                start: historical.start,
                end: historical.end,
                on_start: move |date| on_command.call(AppCommand::HistoricalStart(date)),
                on_end: move |date| on_command.call(AppCommand::HistoricalEnd(date)),
            }
            button {
                id: "loadHistorical",
                style: button_style(),
                disabled: historical.load_state.is_loading(),
                onclick: move |_| on_command.call(AppCommand::LoadHistorical),
                i { class: "fas fa-search", style: "margin-right: 6px;" }
                "Load Data"
            }
            button {
                id: "exportHistorical",
                style: button_style(),
                onclick: move |_| on_command.call(AppCommand::ExportHistorical),
                i { class: "fas fa-download", style: "margin-right: 6px;" }
                "Export CSV"
            }
        }
        if let Some(message) = error_message(&historical.load_state) {
            ErrorDisplay { message, on_retry: move |_| on_command.call(AppCommand::LoadHistorical) }
        }
        if let Some(summary) = historical.summary.clone() {
            HistoricalStats { summary }
        }
        div {
            style: "margin-top: 16px;",
            ChartHeader { title: "Historical AQI", icon: "fas fa-history", note }
            ChartContainer {
                id: "{HISTORICAL_CANVAS_ID}",
                loading: historical.load_state.is_loading(),
                message: empty_message,
            }
        }
    }
}

#[component]
pub fn HealthSection(props: SectionProps) -> Element {
    let state = use_context::<AppState>();
    let health = state.health.read();
    let on_command = props.on_command;
    let sensitive = health.sensitive_group;

    rsx! {
        AqiContextCard { context: health.context() }
        div {
            style: "display: flex; align-items: center; justify-content: space-between; margin: 12px 0;",
            label {
                style: "display: flex; align-items: center; gap: 8px;",
                input {
                    id: "sensitiveGroup",
                    r#type: "checkbox",
                    checked: sensitive,
                    onchange: move |evt: Event<FormData>| on_command.call(AppCommand::SensitiveGroup(evt.checked())),
                }
                "I belong to a sensitive group (children, elderly, respiratory or heart conditions)"
            }
            button {
                id: "downloadHealthReport",
                style: button_style(),
                onclick: move |_| on_command.call(AppCommand::ExportHealthReport),
                i { class: "fas fa-file-medical", style: "margin-right: 6px;" }
                "Download Report"
            }
        }
        if health.load_state.is_loading() {
            LoadingSpinner {}
        }
        if let Some(message) = error_message(&health.load_state) {
            ErrorDisplay { message, on_retry: move |_| on_command.call(AppCommand::Refresh) }
        }
        RecommendationCards { recommendations: health.recommendations.clone() }
    }
}
