//! CSV and JSON export of loaded data.

use aqi_core::category::AqiCategory;
use aqi_core::dates::format_date;
use aqi_core::models::{CitySelection, ForecastEntry, HistoricalRecord};
use aqi_core::recommendation::{HealthRecommendation, Severity};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    /// Writing a CSV record failed
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Serializing JSON failed
    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Flushing the output buffer failed
    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),

    #[error("No {0} data to export")]
    Empty(&'static str),
}

pub type Result<T> = std::result::Result<T, ExportError>;

pub const FORECAST_CSV_HEADERS: [&str; 6] =
    ["Date", "City", "State", "Predicted AQI", "Category", "Confidence"];
pub const HISTORICAL_CSV_HEADERS: [&str; 8] =
    ["Date", "City", "State", "AQI", "PM2.5", "PM10", "NO2", "SO2"];

fn write_csv<const N: usize>(headers: [&str; N], rows: impl Iterator<Item = [String; N]>) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(&row)?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn optional_number(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 => v.to_string(),
        _ => String::new(),
    }
}

/// Forecast table. Confidence is shown as a whole percentage.
pub fn forecast_csv(entries: &[ForecastEntry]) -> Result<String> {
    if entries.is_empty() {
        return Err(ExportError::Empty("forecast"));
    }
    write_csv(
        FORECAST_CSV_HEADERS,
        entries.iter().map(|entry| {
            [
                format_date(Some(entry.forecast_date.as_str())),
                entry.city.clone(),
                entry.state.clone(),
                entry.aqi().to_string(),
                entry.predicted_category.clone().unwrap_or_default(),
                format!("{}%", entry.confidence_percent(0.0)),
            ]
        }),
    )
}

pub fn historical_csv(records: &[HistoricalRecord]) -> Result<String> {
    if records.is_empty() {
        return Err(ExportError::Empty("historical"));
    }
    write_csv(
        HISTORICAL_CSV_HEADERS,
        records.iter().map(|record| {
            [
                format_date(record.timestamp()),
                record.city.clone(),
                record.state.clone(),
                record.aqi().to_string(),
                optional_number(record.pm25),
                optional_number(record.pm10),
                optional_number(record.no2),
                optional_number(record.so2),
            ]
        }),
    )
}

pub fn forecast_file_name(city: &str, today: NaiveDate) -> String {
    format!("aqi_forecast_{}_{}.csv", city, today.format("%Y-%m-%d"))
}

pub fn historical_file_name(city: &str, start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "aqi_historical_{}_{}_{}.csv",
        city,
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d")
    )
}

pub fn snapshot_file_name(today: NaiveDate) -> String {
    format!("air_quality_data_export_{}.json", today.format("%Y-%m-%d"))
}

pub fn health_report_file_name(today: NaiveDate) -> String {
    format!("health_report_{}.json", today.format("%Y-%m-%d"))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRecommendation {
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub severity: Severity,
}

/// Downloadable summary of the health section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub timestamp: DateTime<Utc>,
    pub aqi: u32,
    pub category: AqiCategory,
    pub risk_level: &'static str,
    pub sensitive_group: bool,
    pub recommendations: Vec<ReportRecommendation>,
    pub recommended_activities: Vec<&'static str>,
}

impl HealthReport {
    pub fn new(
        aqi: u32,
        sensitive_group: bool,
        recommendations: &[HealthRecommendation],
        timestamp: DateTime<Utc>,
    ) -> Self {
        let category = AqiCategory::from_aqi(f64::from(aqi));
        Self {
            timestamp,
            aqi,
            category,
            risk_level: category.risk_level(),
            sensitive_group,
            recommendations: recommendations
                .iter()
                .map(|rec| ReportRecommendation {
                    title: rec.title.clone(),
                    content: rec.content.clone(),
                    severity: rec.severity,
                })
                .collect(),
            recommended_activities: category.activities().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSnapshot {
    #[serde(rename = "currentAQI")]
    pub current_aqi: u32,
    pub is_sensitive_group: bool,
    pub recommendations: Vec<HealthRecommendation>,
}

/// Everything currently loaded, as written by "export all".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSnapshot {
    pub timestamp: DateTime<Utc>,
    pub current_section: String,
    pub dashboard: Option<CitySelection>,
    pub forecast: Vec<ForecastEntry>,
    pub historical: Vec<HistoricalRecord>,
    pub health: Option<HealthSnapshot>,
}

pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aqi_core::recommendation::local_recommendations;

    fn forecast(date: &str, aqi: u32, confidence: Option<f64>) -> ForecastEntry {
        ForecastEntry {
            city: "Mumbai".to_string(),
            state: "Maharashtra".to_string(),
            forecast_date: date.to_string(),
            predicted_aqi: Some(aqi),
            predicted_category: Some(AqiCategory::from_aqi(f64::from(aqi)).label().to_string()),
            confidence_score: confidence,
            ..Default::default()
        }
    }

    fn parse(csv_text: &str) -> (csv::StringRecord, Vec<csv::StringRecord>) {
        let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
        let headers = reader.headers().unwrap().clone();
        let rows = reader.records().map(|r| r.unwrap()).collect();
        (headers, rows)
    }

    #[test]
    fn test_forecast_csv_shape() {
        let entries = vec![
            forecast("2024-05-01", 120, Some(0.84)),
            forecast("2024-05-02", 95, None),
        ];
        let text = forecast_csv(&entries).unwrap();
        let (headers, rows) = parse(&text);
        assert_eq!(headers.len(), FORECAST_CSV_HEADERS.len());
        assert_eq!(rows.len(), entries.len());
        assert!(rows.iter().all(|row| row.len() == headers.len()));
        assert_eq!(&rows[0][0], "01 May 2024");
        assert_eq!(&rows[0][5], "84%");
        assert_eq!(&rows[1][4], "Satisfactory");
        assert_eq!(&rows[1][5], "0%");
    }

    #[test]
    fn test_historical_csv_quotes_embedded_commas() {
        let records = vec![
            HistoricalRecord {
                date: Some("2024-01-01".to_string()),
                city: "Delhi, NCT".to_string(),
                state: "Delhi".to_string(),
                aqi_value: Some(180),
                pm25: Some(108.0),
                pm10: Some(0.0),
                ..Default::default()
            },
            HistoricalRecord {
                last_update: Some("garbage".to_string()),
                city: "Line\nBreak".to_string(),
                ..Default::default()
            },
        ];
        let text = historical_csv(&records).unwrap();
        assert!(text.contains("\"Delhi, NCT\""));
        let (headers, rows) = parse(&text);
        assert_eq!(headers.len(), 8);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.len() == 8));
        assert_eq!(&rows[0][1], "Delhi, NCT");
        assert_eq!(&rows[0][4], "108");
        assert_eq!(&rows[0][5], "");
        assert_eq!(&rows[1][0], "Invalid date");
        assert_eq!(&rows[1][1], "Line\nBreak");
        assert_eq!(&rows[1][3], "0");
    }

    #[test]
    fn test_empty_exports_are_rejected() {
        assert!(matches!(forecast_csv(&[]), Err(ExportError::Empty("forecast"))));
        assert!(matches!(historical_csv(&[]), Err(ExportError::Empty("historical"))));
    }

    #[test]
    fn test_file_names() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(forecast_file_name("Pune", day), "aqi_forecast_Pune_2024-03-09.csv");
        assert_eq!(
            historical_file_name("Pune", day, day),
            "aqi_historical_Pune_2024-03-09_2024-03-09.csv"
        );
        assert_eq!(snapshot_file_name(day), "air_quality_data_export_2024-03-09.json");
        assert_eq!(health_report_file_name(day), "health_report_2024-03-09.json");
    }

    #[test]
    fn test_health_report_fields() {
        let recs = local_recommendations(AqiCategory::Poor, true);
        let report = HealthReport::new(275, true, &recs, Utc::now());
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["category"], "Poor");
        assert_eq!(value["riskLevel"], "High");
        assert_eq!(value["sensitiveGroup"], true);
        assert_eq!(value["recommendations"].as_array().unwrap().len(), 4);
        assert_eq!(value["recommendations"][0]["type"], "urgent");
        assert_eq!(value["recommendedActivities"][0], "Indoor activities only");
    }
}
