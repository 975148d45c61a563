//! Placeholder series shown when the backend has no data.
//!
//! The values are random but plausible. Forecast entries are flagged as
//! synthetic so the UI can label them.

use aqi_core::category::AqiCategory;
use aqi_core::dates::iso_date;
use aqi_core::models::{CitySelection, ForecastEntry, HistoricalRecord};
use chrono::{Duration, NaiveDate};
use fastrand::Rng;

/// Number of days in a synthesized forecast.
pub const SAMPLE_FORECAST_DAYS: i64 = 7;

fn clamp_round(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

/// Seven entries for the days after `today`, AQI roughly 75..225.
pub fn sample_forecast(rng: &mut Rng, city: &CitySelection, today: NaiveDate) -> Vec<ForecastEntry> {
    (1..=SAMPLE_FORECAST_DAYS)
        .map(|offset| {
            let base = 100.0 + rng.f64() * 100.0;
            let aqi = clamp_round(base + (rng.f64() - 0.5) * 50.0);
            ForecastEntry {
                city: city.city.clone(),
                state: city.state.clone(),
                forecast_date: iso_date(today + Duration::days(offset)),
                predicted_aqi: Some(aqi),
                predicted_category: Some(AqiCategory::from_aqi(f64::from(aqi)).label().to_string()),
                confidence_score: Some(0.7 + rng.f64() * 0.2),
                synthetic: true,
                ..Default::default()
            }
        })
        .collect()
}

/// One record per day from `start` to `end` inclusive, following a slow
/// sine wave around AQI 120 with noise. Empty when `end` precedes `start`.
pub fn sample_historical(
    rng: &mut Rng,
    city: &CitySelection,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<HistoricalRecord> {
    let days = (end - start).num_days();
    (0..=days)
        .map(|i| {
            let date = iso_date(start + Duration::days(i));
            let base = 120.0 + (i as f64 * 0.1).sin() * 30.0;
            let aqi = clamp_round(base + (rng.f64() - 0.5) * 40.0);
            let scaled = |factor: f64| Some((f64::from(aqi) * factor).round());
            HistoricalRecord {
                date: Some(date.clone()),
                last_update: Some(date),
                city: city.city.clone(),
                state: city.state.clone(),
                aqi_value: Some(aqi),
                pm25: scaled(0.6),
                pm10: scaled(0.8),
                no2: scaled(0.4),
                so2: scaled(0.3),
                ..Default::default()
            }
        })
        .collect()
}
