use aqi_api::notify::RecordingNotifier;
use aqi_api::ApiError;
use aqi_core::category::AqiCategory;
use aqi_core::events::{EventBus, Section};
use aqi_core::models::{AqiReading, CitySelection, Coordinates};
use aqi_core::preferences::MemoryStore;
use aqi_core::recommendation::Severity;
use aqi_sections::fakes::{yield_now, ApiCall, FixedGeolocator, InstantDelay, ScriptedApi};
use aqi_sections::historical::INVALID_RANGE;
use aqi_sections::platform::FixedClock;
use aqi_sections::shell::AppShell;
use aqi_sections::{LoadState, SectionError, Services};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use std::rc::Rc;

struct World {
    shell: AppShell<ScriptedApi, FixedGeolocator, InstantDelay>,
    api: Rc<ScriptedApi>,
    notifier: Rc<RecordingNotifier>,
}

fn world(api: ScriptedApi) -> World {
    let api = Rc::new(api);
    let notifier = Rc::new(RecordingNotifier::new());
    let services = Services {
        api: Rc::clone(&api),
        geolocator: Rc::new(FixedGeolocator::at(Coordinates::new(19.0760, 72.8777))),
        delay: Rc::new(InstantDelay::new()),
        notifier: notifier.clone(),
        store: Rc::new(MemoryStore::new()),
        clock: Rc::new(FixedClock(Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap())),
        events: Rc::new(EventBus::new()),
    };
    World {
        shell: AppShell::new(services),
        api,
        notifier,
    }
}

fn station(city: &str, state: &str, aqi: u32) -> AqiReading {
    AqiReading {
        city: city.to_string(),
        state: state.to_string(),
        aqi_value: Some(aqi),
        latitude: Some(19.07),
        longitude: Some(72.88),
        ..Default::default()
    }
}

#[tokio::test]
async fn poor_air_in_mumbai_flows_to_health_advice() {
    let w = world(ScriptedApi::new().with_station(station("Mumbai", "Maharashtra", 275)));
    let city = w.shell.start().await;
    assert_eq!(city, CitySelection::new("Mumbai", "Maharashtra"));

    let view = w.shell.dashboard.snapshot().current_view();
    assert_eq!(view.aqi, "275");
    assert_eq!(view.category, "Poor");
    assert_eq!(view.color, Some("#ff0000"));
    let markers = w.shell.dashboard.markers();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].color, "#ff0000");

    let nav = w.shell.navigate(Section::Health);
    w.shell.enter(nav.section).await;
    let health = w.shell.health.snapshot();
    assert_eq!(health.context().map(|c| c.category), Some(AqiCategory::Poor));
    assert!(!health.recommendations.is_empty());
    assert!(health
        .recommendations
        .iter()
        .all(|rec| matches!(rec.severity, Severity::Urgent | Severity::Warning)));
}

#[tokio::test]
async fn reversed_date_range_is_rejected_without_a_request() {
    let w = world(ScriptedApi::new().with_station(station("Mumbai", "Maharashtra", 120)));
    w.shell.start().await;
    let before = w.api.count(|c| matches!(c, ApiCall::Historical(_)));

    w.shell.navigate(Section::Historical);
    let start = NaiveDate::from_ymd_opt(2024, 5, 9).unwrap();
    w.shell.historical.set_start(start);
    w.shell.historical.set_end(start - Duration::days(3));
    let outcome = w.shell.historical.load().await;

    assert!(matches!(outcome, Err(SectionError::Validation(_))));
    assert_eq!(w.notifier.errors(), vec![INVALID_RANGE.to_string()]);
    assert_eq!(w.api.count(|c| matches!(c, ApiCall::Historical(_))), before);
}

#[tokio::test]
async fn empty_forecast_falls_back_to_a_week_of_sample_data() {
    let api = ScriptedApi::new().with_station(station("Mumbai", "Maharashtra", 120));
    api.fail_generate();
    let w = world(api);
    w.shell.start().await;
    w.shell.navigate(Section::Forecast);
    w.shell.enter(Section::Forecast).await;

    assert_eq!(w.api.count(|c| matches!(c, ApiCall::Generate { .. })), 1);
    let forecast = w.shell.forecast.snapshot();
    assert!(forecast.synthetic);
    assert_eq!(forecast.load_state, LoadState::Loaded);
    let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
    let dates: Vec<String> = forecast.entries.iter().map(|e| e.forecast_date.clone()).collect();
    let expected: Vec<String> = (1..=7)
        .map(|d| (today + Duration::days(d)).format("%Y-%m-%d").to_string())
        .collect();
    assert_eq!(dates, expected);
    assert!(w
        .notifier
        .errors()
        .contains(&"Failed to generate forecasts. Using sample data.".to_string()));
}

#[tokio::test]
async fn slow_answer_for_an_old_city_is_discarded() {
    let api = ScriptedApi::new();
    api.push_slow_realtime(5, Ok(vec![station("Mumbai", "Maharashtra", 275)]));
    api.push_realtime(Ok(vec![station("Delhi", "Delhi", 90)]));
    let w = world(api);

    let dashboard = &w.shell.dashboard;
    tokio::join!(
        dashboard.select_city(CitySelection::new("Mumbai", "Maharashtra")),
        async {
            yield_now().await;
            dashboard.select_city(CitySelection::new("Delhi", "Delhi")).await;
        }
    );

    let state = dashboard.snapshot();
    assert_eq!(state.selected, Some(CitySelection::new("Delhi", "Delhi")));
    assert_eq!(state.current.map(|r| r.city), Some("Delhi".to_string()));
    assert_eq!(w.shell.health.snapshot().aqi, 90);
}

#[tokio::test]
async fn backend_failure_surfaces_as_error_state() {
    let api = ScriptedApi::new();
    api.push_realtime(Err(ApiError::Network("connection refused".to_string())));
    let w = world(api);
    w.shell.dashboard.select_city(CitySelection::new("Pune", "Maharashtra")).await;
    let state = w.shell.dashboard.snapshot();
    assert!(matches!(state.current_state, LoadState::Error(_)));
    assert_eq!(state.current_view().aqi, "--");
}
