//! Everything the page can ask the shell to do, and how each request is
//! carried out.
//!
//! Browser listeners and RSX handlers only send an [`AppCommand`]; the
//! command loop in `main` spawns [`handle`] for each one so a slow load
//! never blocks navigation.

use aqi_api::ApiClient;
use aqi_chart_ui::browser::{download_file, push_history, set_title, BrowserGeolocator, TimerDelay};
use aqi_chart_ui::js_bridge;
use aqi_chart_ui::notifier::dismiss_all;
use aqi_chart_ui::state::AppState;
use aqi_core::events::Section;
use aqi_core::models::CitySelection;
use aqi_core::preferences::AppSettings;
use aqi_sections::platform::Delay;
use aqi_sections::refresh::{toggle_message, Debounce, RefreshToken};
use aqi_sections::router::{
    command_for_key, Connectivity, HistoryAction, KeyInput, Navigation, ShellCommand,
    MAP_RESIZE_DELAY,
};
use aqi_sections::shell::AppShell;
use chrono::NaiveDate;
use dioxus::prelude::*;
use std::rc::Rc;

pub type Shell = AppShell<ApiClient, BrowserGeolocator, TimerDelay>;

const CSV_MIME: &str = "text/csv;charset=utf-8";
const JSON_MIME: &str = "application/json";

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Start,
    Navigate(Section),
    PopState(Option<String>),
    Key(KeyInput),
    Connectivity(Connectivity),
    Resize,
    Refresh,
    SelectCity(CitySelection),
    StationClicked(usize),
    ToggleAutoRefresh,
    SaveSettings(AppSettings),
    ForecastCity(CitySelection),
    GenerateForecast,
    HistoricalCity(CitySelection),
    HistoricalStart(NaiveDate),
    HistoricalEnd(NaiveDate),
    LoadHistorical,
    SensitiveGroup(bool),
    ExportAll,
    ExportForecast,
    ExportHistorical,
    ExportHealthReport,
}

/// Copy every controller snapshot into the signals that changed.
pub fn sync(mut state: AppState, shell: &Shell) {
    let dashboard = shell.dashboard.snapshot();
    if *state.dashboard.peek() != dashboard {
        state.dashboard.set(dashboard);
    }
    let forecast = shell.forecast.snapshot();
    if *state.forecast.peek() != forecast {
        state.forecast.set(forecast);
    }
    let historical = shell.historical.snapshot();
    if *state.historical.peek() != historical {
        state.historical.set(historical);
    }
    let health = shell.health.snapshot();
    if *state.health.peek() != health {
        state.health.set(health);
    }
}

fn apply_navigation(mut state: AppState, navigation: &Navigation) {
    state.section.set(navigation.section);
    set_title(navigation.title());
    match navigation.history {
        HistoryAction::Push => push_history(navigation.section.id(), &navigation.hash(), false),
        HistoryAction::Replace => push_history(navigation.section.id(), &navigation.hash(), true),
        HistoryAction::Keep => {}
    }
    if navigation.resize_map() {
        spawn(async {
            TimerDelay.sleep(MAP_RESIZE_DELAY).await;
            js_bridge::invalidate_map();
            js_bridge::resize_charts();
        });
    }
}

async fn show_section(shell: &Shell, state: AppState, navigation: Navigation) {
    apply_navigation(state, &navigation);
    shell.enter(navigation.section).await;
    sync(state, shell);
}

/// Run the auto-refresh loop for `token` until it is superseded.
pub fn run_auto_refresh(shell: Rc<Shell>, state: AppState, token: Option<RefreshToken>) {
    let Some(token) = token else {
        return;
    };
    spawn(async move {
        let shell_ref = &shell;
        shell
            .dashboard
            .auto_refresh()
            .run(token, &TimerDelay, move || async move {
                shell_ref.dashboard.refresh().await;
                sync(state, shell_ref);
            })
            .await;
        log::debug!("Auto-refresh loop stopped");
    });
}

fn offer_download(shell: &Shell, export: aqi_sections::Result<(String, String)>, mime: &str) {
    match export {
        Ok((file_name, content)) => {
            download_file(&file_name, &content, mime);
            shell.services().notifier.success("Data exported successfully");
        }
        Err(e) => shell.services().notifier.error(&e.to_string()),
    }
}

pub async fn handle(shell: Rc<Shell>, mut state: AppState, resize: Rc<Debounce>, command: AppCommand) {
    log::debug!("Handling {:?}", command);
    match command {
        AppCommand::Start => {
            let navigation = shell.start_route(&aqi_chart_ui::browser::location_hash());
            apply_navigation(state, &navigation);
            let settings = shell.settings();
            state.settings.set(settings.clone());
            shell.start().await;
            sync(state, &shell);
            run_auto_refresh(Rc::clone(&shell), state, shell.apply_settings(&settings));
        }
        AppCommand::Navigate(section) => {
            let navigation = shell.navigate(section);
            show_section(&shell, state, navigation).await;
        }
        AppCommand::PopState(section_id) => {
            let navigation = shell.pop_state(section_id.as_deref());
            show_section(&shell, state, navigation).await;
        }
        AppCommand::Key(input) => match command_for_key(&input) {
            Some(ShellCommand::Refresh) => {
                shell.refresh_current().await;
                sync(state, &shell);
            }
            Some(ShellCommand::DismissToasts) => dismiss_all(state.toasts),
            Some(ShellCommand::Show(section)) => {
                let navigation = shell.navigate(section);
                show_section(&shell, state, navigation).await;
            }
            None => {}
        },
        AppCommand::Connectivity(change) => {
            shell.connectivity_changed(change).await;
            sync(state, &shell);
        }
        AppCommand::Resize => {
            if resize.settle(&TimerDelay).await {
                js_bridge::resize_charts();
                js_bridge::invalidate_map();
            }
        }
        AppCommand::Refresh => {
            shell.refresh_current().await;
            sync(state, &shell);
        }
        AppCommand::SelectCity(city) => {
            shell.select_city(city).await;
            sync(state, &shell);
        }
        AppCommand::StationClicked(index) => {
            shell.dashboard.select_station(index);
            sync(state, &shell);
        }
        AppCommand::ToggleAutoRefresh => {
            let mut settings = shell.settings();
            settings.auto_refresh = !shell.dashboard.auto_refresh().is_enabled();
            let token = shell.apply_settings(&settings);
            shell
                .services()
                .notifier
                .success(toggle_message(settings.auto_refresh));
            state.settings.set(settings);
            run_auto_refresh(Rc::clone(&shell), state, token);
        }
        AppCommand::SaveSettings(settings) => {
            let token = shell.apply_settings(&settings);
            run_auto_refresh(Rc::clone(&shell), state, token);
            shell.services().notifier.success("Settings saved");
        }
        AppCommand::ForecastCity(city) => {
            shell.forecast.set_city(city);
            shell.forecast.load().await;
            sync(state, &shell);
        }
        AppCommand::GenerateForecast => {
            shell.forecast.generate().await;
            sync(state, &shell);
        }
        AppCommand::HistoricalCity(city) => {
            if let Err(e) = shell.historical.select_city(city).await {
                log::info!("Historical load rejected: {}", e);
            }
            sync(state, &shell);
        }
        AppCommand::HistoricalStart(date) => {
            shell.historical.set_start(date);
            sync(state, &shell);
        }
        AppCommand::HistoricalEnd(date) => {
            shell.historical.set_end(date);
            sync(state, &shell);
        }
        AppCommand::LoadHistorical => {
            if let Err(e) = shell.historical.load().await {
                log::info!("Historical load rejected: {}", e);
            }
            sync(state, &shell);
        }
        AppCommand::SensitiveGroup(flag) => {
            shell.health.set_sensitive_group(flag).await;
            sync(state, &shell);
        }
        AppCommand::ExportAll => {
            offer_download(&shell, shell.export_snapshot_json(), JSON_MIME);
        }
        AppCommand::ExportForecast => {
            offer_download(&shell, shell.forecast.export_csv(), CSV_MIME);
        }
        AppCommand::ExportHistorical => {
            offer_download(&shell, shell.historical.export_csv(), CSV_MIME);
        }
        AppCommand::ExportHealthReport => {
            offer_download(&shell, shell.health.export_report(), JSON_MIME);
        }
    }
}
