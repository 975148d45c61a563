//! Record types exchanged with the AQI backend.
//!
//! All fields the backend may omit are optional and default on decode, so a
//! sparse payload still deserializes. Everything derives `Serialize` so the
//! same values can be handed to the JS chart bridge and to exports.

use crate::category::AqiCategory;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// The active city/state pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CitySelection {
    pub city: String,
    pub state: String,
}

impl CitySelection {
    pub fn new(city: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            state: state.into(),
        }
    }

    /// Parse a selector value of the form `"City,State"`.
    pub fn parse(value: &str) -> Option<Self> {
        let (city, state) = value.split_once(',')?;
        let (city, state) = (city.trim(), state.trim());
        if city.is_empty() || state.is_empty() {
            return None;
        }
        Some(Self::new(city, state))
    }

    /// The value used for `<option>` elements, inverse of [`CitySelection::parse`].
    pub fn selector_value(&self) -> String {
        format!("{},{}", self.city, self.state)
    }
}

impl fmt::Display for CitySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.city, self.state)
    }
}

/// A single station reading from `/aqi/realtime`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AqiReading {
    pub id: Option<i64>,
    pub city: String,
    pub state: String,
    #[serde(alias = "station_name")]
    pub station: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub pollutant_id: Option<String>,
    pub pollutant_avg: Option<f64>,
    pub aqi_value: Option<u32>,
    pub aqi_category: Option<String>,
    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
    pub no2: Option<f64>,
    pub so2: Option<f64>,
    pub last_update: Option<String>,
}

impl AqiReading {
    /// AQI value, zero when the station reported none.
    pub fn aqi(&self) -> u32 {
        self.aqi_value.unwrap_or(0)
    }

    pub fn category(&self) -> AqiCategory {
        AqiCategory::from_aqi(f64::from(self.aqi()))
    }

    /// Station position, if both coordinates are known and non-zero.
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) if lat != 0.0 && lng != 0.0 => Some(Coordinates::new(lat, lng)),
            _ => None,
        }
    }

    pub fn pollutants(&self) -> [(&'static str, Option<f64>); 4] {
        [
            ("PM2.5", self.pm25),
            ("PM10", self.pm10),
            ("NO₂", self.no2),
            ("SO₂", self.so2),
        ]
    }
}

/// A record from `/aqi/historical`, or a synthesized sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoricalRecord {
    pub date: Option<String>,
    pub last_update: Option<String>,
    pub city: String,
    pub state: String,
    pub aqi_value: Option<u32>,
    pub pollutant_id: Option<String>,
    pub pollutant_avg: Option<f64>,
    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
    pub no2: Option<f64>,
    pub so2: Option<f64>,
}

impl HistoricalRecord {
    pub fn aqi(&self) -> u32 {
        self.aqi_value.unwrap_or(0)
    }

    /// The best timestamp available: `date`, then `last_update`.
    pub fn timestamp(&self) -> Option<&str> {
        self.date.as_deref().or(self.last_update.as_deref())
    }
}

/// One day of a forecast from `/aqi/forecast`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastEntry {
    pub city: String,
    pub state: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub forecast_date: String,
    pub predicted_aqi: Option<u32>,
    pub predicted_category: Option<String>,
    /// Model confidence in `0.0..=1.0`.
    pub confidence_score: Option<f64>,
    pub model_version: Option<String>,
    /// Set on locally generated placeholder entries.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub synthetic: bool,
}

/// Confidence assumed for display when the model did not report one.
pub const DEFAULT_FORECAST_CONFIDENCE: f64 = 0.8;

impl ForecastEntry {
    pub fn aqi(&self) -> u32 {
        self.predicted_aqi.unwrap_or(0)
    }

    /// The reported category if it is recognisable, else derived from the AQI.
    pub fn category(&self) -> AqiCategory {
        self.predicted_category
            .as_deref()
            .and_then(AqiCategory::from_label)
            .unwrap_or_else(|| AqiCategory::from_aqi(f64::from(self.aqi())))
    }

    /// Confidence as a rounded percentage, using `default` when unknown.
    pub fn confidence_percent(&self, default: f64) -> u32 {
        let score = self.confidence_score.unwrap_or(default).clamp(0.0, 1.0);
        (score * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_selection_parse() {
        let selection = CitySelection::parse("Mumbai, Maharashtra").unwrap();
        assert_eq!(selection.city, "Mumbai");
        assert_eq!(selection.state, "Maharashtra");
        assert_eq!(selection.to_string(), "Mumbai, Maharashtra");
        assert_eq!(selection.selector_value(), "Mumbai,Maharashtra");
        assert!(CitySelection::parse("Mumbai").is_none());
        assert!(CitySelection::parse(" ,Delhi").is_none());
    }

    #[test]
    fn test_reading_decodes_sparse_payload() {
        let reading: AqiReading = serde_json::from_value(serde_json::json!({
            "city": "Delhi",
            "state": "Delhi",
            "station_name": "ITO",
            "aqi_value": 275,
            "latitude": 28.6,
            "longitude": 77.2,
        }))
        .unwrap();
        assert_eq!(reading.station.as_deref(), Some("ITO"));
        assert_eq!(reading.category(), AqiCategory::Poor);
        assert_eq!(reading.coordinates(), Some(Coordinates::new(28.6, 77.2)));
        assert_eq!(reading.pm25, None);
    }

    #[test]
    fn test_reading_without_coordinates() {
        let reading = AqiReading {
            latitude: Some(0.0),
            longitude: Some(77.0),
            ..Default::default()
        };
        assert!(reading.coordinates().is_none());
        assert_eq!(reading.aqi(), 0);
    }

    #[test]
    fn test_forecast_category_prefers_reported_label() {
        let mut entry = ForecastEntry {
            predicted_aqi: Some(150),
            predicted_category: Some("Poor".to_string()),
            ..Default::default()
        };
        assert_eq!(entry.category(), AqiCategory::Poor);
        entry.predicted_category = Some("unknown".to_string());
        assert_eq!(entry.category(), AqiCategory::Moderate);
    }

    #[test]
    fn test_forecast_confidence_percent() {
        let mut entry = ForecastEntry::default();
        assert_eq!(entry.confidence_percent(DEFAULT_FORECAST_CONFIDENCE), 80);
        assert_eq!(entry.confidence_percent(0.0), 0);
        entry.confidence_score = Some(0.876);
        assert_eq!(entry.confidence_percent(0.0), 88);
    }

    #[test]
    fn test_synthetic_flag_only_serialized_when_set() {
        let entry = ForecastEntry::default();
        let value = serde_json::to_value(&entry).unwrap();
        assert!(value.get("synthetic").is_none());
        let entry = ForecastEntry {
            synthetic: true,
            ..Default::default()
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["synthetic"], true);
    }

    #[test]
    fn test_historical_timestamp_fallback() {
        let record = HistoricalRecord {
            last_update: Some("2024-01-02T10:00:00".to_string()),
            ..Default::default()
        };
        assert_eq!(record.timestamp(), Some("2024-01-02T10:00:00"));
    }
}
