//! Parameter shapes of the named endpoints.

use aqi_core::dates::iso_date;
use aqi_core::geo::coordinates_for_city;
use aqi_core::models::CitySelection;
use chrono::NaiveDate;
use serde::Serialize;

pub type Params = Vec<(&'static str, String)>;

fn push_opt(params: &mut Params, key: &'static str, value: Option<String>) {
    if let Some(value) = value {
        params.push((key, value));
    }
}

/// `GET /aqi/realtime`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RealtimeQuery {
    pub city: Option<String>,
    pub state: Option<String>,
    pub limit: Option<u32>,
}

impl RealtimeQuery {
    pub fn for_city(selection: &CitySelection, limit: u32) -> Self {
        Self {
            city: Some(selection.city.clone()),
            state: Some(selection.state.clone()),
            limit: Some(limit),
        }
    }

    /// Every station, up to `limit`.
    pub fn all(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Default::default()
        }
    }

    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        push_opt(&mut params, "city", self.city.clone());
        push_opt(&mut params, "state", self.state.clone());
        push_opt(&mut params, "limit", self.limit.map(|l| l.to_string()));
        params
    }
}

/// `GET /aqi/historical`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoricalQuery {
    pub city: Option<String>,
    pub state: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: Option<u32>,
}

impl HistoricalQuery {
    pub fn for_range(selection: &CitySelection, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            city: Some(selection.city.clone()),
            state: Some(selection.state.clone()),
            start_date: Some(start),
            end_date: Some(end),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        push_opt(&mut params, "city", self.city.clone());
        push_opt(&mut params, "state", self.state.clone());
        push_opt(&mut params, "start_date", self.start_date.map(iso_date));
        push_opt(&mut params, "end_date", self.end_date.map(iso_date));
        push_opt(&mut params, "limit", self.limit.map(|l| l.to_string()));
        params
    }
}

/// `GET /aqi/forecast`
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastQuery {
    pub city: String,
    pub state: String,
    pub days: u32,
}

impl ForecastQuery {
    pub fn new(selection: &CitySelection, days: u32) -> Self {
        Self {
            city: selection.city.clone(),
            state: selection.state.clone(),
            days,
        }
    }

    pub fn to_params(&self) -> Params {
        vec![
            ("city", self.city.clone()),
            ("state", self.state.clone()),
            ("days", self.days.to_string()),
        ]
    }
}

/// A city entry in a forecast generation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastTarget {
    pub city: String,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl ForecastTarget {
    /// Coordinates come from the known-city table, Delhi's when the city is
    /// not in it.
    pub fn for_city(selection: &CitySelection) -> Self {
        let position = coordinates_for_city(&selection.city);
        Self {
            city: selection.city.clone(),
            state: selection.state.clone(),
            latitude: position.lat,
            longitude: position.lng,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_values_are_omitted() {
        assert_eq!(
            RealtimeQuery::all(50).to_params(),
            vec![("limit", "50".to_string())]
        );
        assert!(HistoricalQuery::default().to_params().is_empty());
    }

    #[test]
    fn test_historical_params() {
        let city = CitySelection::new("Delhi", "Delhi");
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let params = HistoricalQuery::for_range(&city, start, end)
            .with_limit(24)
            .to_params();
        assert_eq!(
            params,
            vec![
                ("city", "Delhi".to_string()),
                ("state", "Delhi".to_string()),
                ("start_date", "2024-01-01".to_string()),
                ("end_date", "2024-01-02".to_string()),
                ("limit", "24".to_string()),
            ]
        );
    }

    #[test]
    fn test_forecast_target_coordinates() {
        let pune = ForecastTarget::for_city(&CitySelection::new("Pune", "Maharashtra"));
        assert_eq!((pune.latitude, pune.longitude), (18.5204, 73.8567));
        let unknown = ForecastTarget::for_city(&CitySelection::new("Shimla", "Himachal Pradesh"));
        assert_eq!((unknown.latitude, unknown.longitude), (28.6139, 77.2090));
    }
}
