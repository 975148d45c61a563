//! Air Quality Visualizer
//!
//! Single-page dashboard over the AQI backend: the live reading for the
//! user's nearest city with a station map and 24-hour trend, a 7-day
//! forecast, historical data over a chosen range and health advice for the
//! current AQI.
//!
//! Data flow:
//! 1. `App` builds the API client, browser services and the [`AppShell`]
//!    that owns the four section controllers.
//! 2. Browser listeners and RSX handlers send [`AppCommand`]s to a
//!    coroutine, which spawns a handler per command.
//! 3. After every controller operation the handler copies the controller
//!    snapshots into the `AppState` signals.
//! 4. Effects watching those signals redraw the Chart.js charts and the
//!    Leaflet map through the JS bridge.

mod commands;
mod listeners;
mod sections;

use aqi_api::{ApiClient, ApiConfig};
use aqi_chart_ui::browser::{BrowserGeolocator, LocalStore, TimerDelay};
use aqi_chart_ui::components::{ErrorDisplay, LoadingOverlay, NavBar, SettingsPanel, ToastStack};
use aqi_chart_ui::js_bridge;
use aqi_chart_ui::notifier::SignalNotifier;
use aqi_chart_ui::state::AppState;
use aqi_core::events::{EventBus, Section};
use aqi_core::geo::USER_LOCATION_ZOOM;
use aqi_core::preferences::PreferenceStore;
use aqi_data::chart::{
    forecast_chart, historical_chart, trend_chart, FORECAST_CANVAS_ID, HISTORICAL_CANVAS_ID,
    TREND_CANVAS_ID,
};
use aqi_data::map::{marker_specs, MAP_CONTAINER_ID, USER_MARKER_LABEL};
use aqi_sections::platform::{Clock, SystemClock};
use aqi_sections::refresh::{Debounce, RESIZE_DEBOUNCE};
use aqi_sections::shell::AppShell;
use aqi_sections::Services;
use commands::{handle, AppCommand, Shell};
use dioxus::prelude::*;
use futures::StreamExt;
use std::rc::Rc;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("main"))
        .launch(App);
}

fn build_shell(state: AppState) -> aqi_api::Result<Shell> {
    let notifier = Rc::new(SignalNotifier::new(state.loading, state.toasts));
    let api = ApiClient::new(ApiConfig::default(), notifier.clone())?;
    let store: Rc<dyn PreferenceStore> = Rc::new(LocalStore);
    let clock: Rc<dyn Clock> = Rc::new(SystemClock);
    Ok(AppShell::new(Services {
        api: Rc::new(api),
        geolocator: Rc::new(BrowserGeolocator),
        delay: Rc::new(TimerDelay),
        notifier,
        store,
        clock,
        events: Rc::new(EventBus::new()),
    }))
}

/// Shared handle to the shell. Props compare by pointer.
#[derive(Clone)]
struct ShellHandle(Rc<Shell>);

impl PartialEq for ShellHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

fn section_class(current: Section, section: Section) -> &'static str {
    if current == section {
        "section active"
    } else {
        "section"
    }
}

// Hidden sections stay mounted so their canvases and the map keep a DOM node.
fn section_style(current: Section, section: Section) -> &'static str {
    if current == section {
        "display: block;"
    } else {
        "display: none;"
    }
}

#[component]
fn App() -> Element {
    let state = use_context_provider(AppState::new);
    let shell = use_hook(|| {
        build_shell(state)
            .map(|shell| ShellHandle(Rc::new(shell)))
            .map_err(|e| e.to_string())
    });

    match shell {
        Ok(shell) => rsx! { Dashboard { shell } },
        Err(message) => {
            log::error!("Could not start the dashboard: {}", message);
            rsx! { ErrorDisplay { message } }
        }
    }
}

#[component]
fn Dashboard(shell: ShellHandle) -> Element {
    let state = use_context::<AppState>();
    let shell = shell.0;
    let resize: Rc<Debounce> = use_hook(|| Rc::new(Debounce::new(RESIZE_DEBOUNCE)));

    let commands = use_coroutine({
        let shell = Rc::clone(&shell);
        let resize = Rc::clone(&resize);
        move |mut rx: UnboundedReceiver<AppCommand>| {
            let shell = Rc::clone(&shell);
            let resize = Rc::clone(&resize);
            async move {
                while let Some(command) = rx.next().await {
                    spawn(handle(Rc::clone(&shell), state, Rc::clone(&resize), command));
                }
            }
        }
    });

    // Load the JS helpers, hook up the page and start once.
    use_hook(move || {
        js_bridge::init_scripts();
        js_bridge::init_map(MAP_CONTAINER_ID);
        listeners::install(commands.tx());
        commands.send(AppCommand::Start);
    });

    // Redraw the trend chart and the map whenever the dashboard changes.
    use_effect(move || {
        let dashboard = state.dashboard.read();
        if dashboard.trend.is_empty() {
            js_bridge::destroy_chart(TREND_CANVAS_ID);
        } else {
            js_bridge::render_chart(TREND_CANVAS_ID, &trend_chart(&dashboard.trend));
        }
        js_bridge::set_markers(MAP_CONTAINER_ID, &marker_specs(&dashboard.stations));
    });

    // Only a new position moves the map.
    let user_position = use_memo(move || state.dashboard.read().user_position);
    use_effect(move || {
        if let Some(position) = user_position() {
            js_bridge::set_user_marker(MAP_CONTAINER_ID, position, USER_MARKER_LABEL);
            js_bridge::center_map(MAP_CONTAINER_ID, position, USER_LOCATION_ZOOM);
        }
    });

    use_effect(move || {
        let forecast = state.forecast.read();
        if forecast.entries.is_empty() {
            js_bridge::destroy_chart(FORECAST_CANVAS_ID);
        } else {
            js_bridge::render_chart(FORECAST_CANVAS_ID, &forecast_chart(&forecast.entries));
        }
    });

    use_effect(move || {
        let historical = state.historical.read();
        if historical.records.is_empty() {
            js_bridge::destroy_chart(HISTORICAL_CANVAS_ID);
        } else {
            js_bridge::render_chart(HISTORICAL_CANVAS_ID, &historical_chart(&historical.records));
        }
    });

    let send = move |command: AppCommand| commands.send(command);
    let current = (state.section)();
    let app_class = format!("app theme-{}", (state.settings)().theme.as_str());

    rsx! {
        div {
            class: "{app_class}",
            style: "min-height: 100vh;",

            NavBar {
                on_navigate: move |section: Section| send(AppCommand::Navigate(section)),
                on_refresh: move |_| send(AppCommand::Refresh),
                on_export: move |_| send(AppCommand::ExportAll),
            }

            main {
                style: "padding: 16px; max-width: 1200px; margin: 0 auto;",
                section {
                    id: Section::Dashboard.id(),
                    class: section_class(current, Section::Dashboard),
                    style: section_style(current, Section::Dashboard),
                    sections::DashboardSection { on_command: send }
                }
                section {
                    id: Section::Forecast.id(),
                    class: section_class(current, Section::Forecast),
                    style: section_style(current, Section::Forecast),
                    sections::ForecastSection { on_command: send }
                }
                section {
                    id: Section::Historical.id(),
                    class: section_class(current, Section::Historical),
                    style: section_style(current, Section::Historical),
                    sections::HistoricalSection { on_command: send }
                }
                section {
                    id: Section::Health.id(),
                    class: section_class(current, Section::Health),
                    style: section_style(current, Section::Health),
                    sections::HealthSection { on_command: send }
                }
            }

            SettingsPanel { on_save: move |settings| send(AppCommand::SaveSettings(settings)) }
            ToastStack {}
            LoadingOverlay {}
        }
    }
}
