//! Chart.js configurations for the trend, forecast and historical charts.
//!
//! Each builder returns a complete `{type, data, options}` object plus an
//! `aqi` block the JS side turns into the gradient fill and the tooltip
//! callbacks. The category table travels in that block so tooltip text is
//! derived from the same bands as everything else.

use aqi_core::category::{aqi_color, AQI_BANDS};
use aqi_core::dates::{parse_timestamp, short_date_label, time_label};
use aqi_core::models::{ForecastEntry, HistoricalRecord, DEFAULT_FORECAST_CONFIDENCE};
use serde_json::{json, Value};

pub const TREND_CANVAS_ID: &str = "trendChart";
pub const FORECAST_CANVAS_ID: &str = "forecastChart";
pub const HISTORICAL_CANVAS_ID: &str = "historicalChart";

/// Points shown on the 24-hour trend chart.
pub const TREND_POINTS: usize = 24;

/// Upper bound of the AQI axis.
pub const AQI_AXIS_MAX: u32 = 500;

/// Tracked pollutants and their line colours.
pub const POLLUTANT_SERIES: [(&str, &str); 4] = [
    ("PM2.5", "#ef4444"),
    ("PM10", "#f59e0b"),
    ("NO2", "#10b981"),
    ("SO2", "#6366f1"),
];

const PRIMARY_COLOR: &str = "#2563eb";

/// Which tooltip formatter the JS side installs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipKind {
    Trend,
    Forecast,
    Historical,
}

impl TooltipKind {
    fn as_str(self) -> &'static str {
        match self {
            TooltipKind::Trend => "trend",
            TooltipKind::Forecast => "forecast",
            TooltipKind::Historical => "historical",
        }
    }
}

/// `[{max, label, color}]` in ascending order; the last band has no `max`.
pub fn category_bands() -> Value {
    Value::Array(
        AQI_BANDS
            .iter()
            .map(|band| {
                json!({
                    "max": band.upper,
                    "label": band.category.label(),
                    "color": band.color,
                })
            })
            .collect(),
    )
}

/// Vertical colour stops for an AQI area fill.
pub fn gradient_stops() -> Value {
    Value::Array(
        AQI_BANDS
            .iter()
            .map(|band| json!({ "offset": band.gradient_stop, "color": band.color }))
            .collect(),
    )
}

fn aqi_block(tooltip: TooltipKind, gradient: bool) -> Value {
    let gradient = if gradient {
        gradient_stops()
    } else {
        Value::Null
    };
    json!({
        "bands": category_bands(),
        "gradient": gradient,
        "tooltip": tooltip.as_str(),
    })
}

fn grid() -> Value {
    json!({ "display": true, "color": "#f1f5f9" })
}

fn base_options(title: &str) -> Value {
    json!({
        "responsive": true,
        "maintainAspectRatio": false,
        "interaction": { "intersect": false, "mode": "index" },
        "plugins": {
            "legend": {
                "display": true,
                "position": "top",
                "labels": { "usePointStyle": true, "padding": 20, "font": { "size": 12, "weight": "500" } }
            },
            "title": {
                "display": true,
                "text": title,
                "font": { "size": 16, "weight": "600" },
                "padding": 20
            },
            "tooltip": {
                "backgroundColor": "rgba(0, 0, 0, 0.8)",
                "titleColor": "#ffffff",
                "bodyColor": "#ffffff",
                "borderColor": "#374151",
                "borderWidth": 1,
                "cornerRadius": 8,
                "displayColors": true,
                "padding": 12
            }
        },
        "scales": {
            "x": { "grid": grid(), "ticks": { "font": { "size": 11 } } },
            "y": {
                "grid": grid(),
                "ticks": { "font": { "size": 11 } },
                "beginAtZero": true,
                "max": AQI_AXIS_MAX,
                "title": { "display": true, "text": "AQI Value" }
            }
        }
    })
}

fn trend_timestamp(record: &HistoricalRecord) -> Option<&str> {
    record.last_update.as_deref().or(record.date.as_deref())
}

/// Hourly AQI line for the last [`TREND_POINTS`] records.
pub fn trend_chart(records: &[HistoricalRecord]) -> Value {
    let recent = &records[records.len().saturating_sub(TREND_POINTS)..];
    let labels: Vec<String> = recent.iter().map(|r| time_label(trend_timestamp(r))).collect();
    let values: Vec<u32> = recent.iter().map(HistoricalRecord::aqi).collect();
    let colors: Vec<&str> = values.iter().map(|v| aqi_color(f64::from(*v))).collect();

    json!({
        "type": "line",
        "data": {
            "labels": labels,
            "datasets": [{
                "label": "AQI",
                "data": values,
                "borderColor": PRIMARY_COLOR,
                "backgroundColor": PRIMARY_COLOR,
                "borderWidth": 3,
                "fill": true,
                "tension": 0.4,
                "pointBackgroundColor": colors,
                "pointBorderColor": "#ffffff",
                "pointBorderWidth": 2,
                "pointRadius": 5,
                "pointHoverRadius": 7
            }]
        },
        "options": base_options("24-Hour AQI Trend"),
        "aqi": aqi_block(TooltipKind::Trend, true),
    })
}

/// Predicted AQI with confidence on a secondary 0..100 axis.
pub fn forecast_chart(entries: &[ForecastEntry]) -> Value {
    let labels: Vec<String> = entries
        .iter()
        .map(|e| short_date_label(Some(e.forecast_date.as_str())))
        .collect();
    let values: Vec<u32> = entries.iter().map(ForecastEntry::aqi).collect();
    let colors: Vec<&str> = values.iter().map(|v| aqi_color(f64::from(*v))).collect();
    let confidence: Vec<u32> = entries
        .iter()
        .map(|e| e.confidence_percent(DEFAULT_FORECAST_CONFIDENCE))
        .collect();

    let mut options = base_options("AQI Forecast");
    options["scales"]["y1"] = json!({
        "type": "linear",
        "display": true,
        "position": "right",
        "min": 0,
        "max": 100,
        "title": { "display": true, "text": "Confidence %" },
        "grid": { "drawOnChartArea": false }
    });

    json!({
        "type": "line",
        "data": {
            "labels": labels,
            "datasets": [
                {
                    "label": "Predicted AQI",
                    "data": values,
                    "borderColor": "#10b981",
                    "backgroundColor": "rgba(16, 185, 129, 0.1)",
                    "borderWidth": 3,
                    "fill": true,
                    "tension": 0.4,
                    "pointBackgroundColor": colors,
                    "pointBorderColor": "#ffffff",
                    "pointBorderWidth": 2,
                    "pointRadius": 6,
                    "pointHoverRadius": 8
                },
                {
                    "label": "Confidence %",
                    "data": confidence,
                    "borderColor": "#6366f1",
                    "backgroundColor": "rgba(99, 102, 241, 0.1)",
                    "borderWidth": 2,
                    "fill": false,
                    "tension": 0.4,
                    "pointBackgroundColor": "#6366f1",
                    "pointBorderColor": "#ffffff",
                    "pointBorderWidth": 2,
                    "pointRadius": 4,
                    "pointHoverRadius": 6,
                    "yAxisID": "y1"
                }
            ]
        },
        "options": options,
        "aqi": aqi_block(TooltipKind::Forecast, false),
    })
}

/// `{x: epoch millis, y}` points; records without a parseable time are
/// skipped.
fn time_points(records: &[&HistoricalRecord], value: impl Fn(&HistoricalRecord) -> f64) -> Vec<Value> {
    records
        .iter()
        .filter_map(|record| {
            let raw = trend_timestamp(record)?;
            let Some(at) = parse_timestamp(raw) else {
                log::debug!("Skipping historical point with bad timestamp {}", raw);
                return None;
            };
            Some(json!({ "x": at.timestamp_millis(), "y": value(record) }))
        })
        .collect()
}

/// One series per tracked pollutant on a time axis, or a single AQI series
/// when no record is tagged with a pollutant.
pub fn historical_chart(records: &[HistoricalRecord]) -> Value {
    let mut datasets: Vec<Value> = POLLUTANT_SERIES
        .iter()
        .filter_map(|(pollutant, color)| {
            let tagged: Vec<&HistoricalRecord> = records
                .iter()
                .filter(|r| r.pollutant_id.as_deref() == Some(*pollutant))
                .collect();
            if tagged.is_empty() {
                return None;
            }
            let data = time_points(&tagged, |r| {
                r.pollutant_avg
                    .filter(|v| *v != 0.0)
                    .unwrap_or_else(|| f64::from(r.aqi()))
            });
            Some(json!({
                "label": pollutant,
                "data": data,
                "borderColor": color,
                "backgroundColor": format!("{}20", color),
                "borderWidth": 2,
                "fill": false,
                "tension": 0.4,
                "pointRadius": 3,
                "pointHoverRadius": 5
            }))
        })
        .collect();

    if datasets.is_empty() && !records.is_empty() {
        let all: Vec<&HistoricalRecord> = records.iter().collect();
        datasets.push(json!({
            "label": "AQI",
            "data": time_points(&all, |r| f64::from(r.aqi())),
            "borderColor": PRIMARY_COLOR,
            "backgroundColor": "rgba(37, 99, 235, 0.1)",
            "borderWidth": 3,
            "fill": true,
            "tension": 0.4,
            "pointRadius": 4,
            "pointHoverRadius": 6
        }));
    }

    let mut options = base_options("Historical Air Quality Data");
    options["scales"] = json!({
        "x": {
            "type": "time",
            "time": { "unit": "day", "displayFormats": { "day": "MMM dd" } },
            "title": { "display": true, "text": "Date" },
            "grid": grid()
        },
        "y": {
            "beginAtZero": true,
            "title": { "display": true, "text": "Concentration (μg/m³) / AQI" },
            "grid": grid()
        }
    });

    json!({
        "type": "line",
        "data": { "datasets": datasets },
        "options": options,
        "aqi": aqi_block(TooltipKind::Historical, false),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hourly(hour: u32, aqi: u32) -> HistoricalRecord {
        HistoricalRecord {
            last_update: Some(format!("2024-01-15T{:02}:00:00+05:30", hour)),
            aqi_value: Some(aqi),
            ..Default::default()
        }
    }

    #[test]
    fn test_trend_keeps_last_24_points() {
        let records: Vec<HistoricalRecord> = (0..30).map(|i| hourly(i % 24, 40 + i * 10)).collect();
        let config = trend_chart(&records);
        let labels = config["data"]["labels"].as_array().unwrap();
        assert_eq!(labels.len(), TREND_POINTS);
        assert_eq!(labels[0], "06:00");
        let data = config["data"]["datasets"][0]["data"].as_array().unwrap();
        assert_eq!(data[0], 100);
        let colors = config["data"]["datasets"][0]["pointBackgroundColor"]
            .as_array()
            .unwrap();
        assert_eq!(colors[0], "#ffff00");
        assert_eq!(colors[23], aqi_color(330.0));
        assert_eq!(config["aqi"]["gradient"].as_array().unwrap().len(), 6);
        assert_eq!(config["aqi"]["tooltip"], "trend");
    }

    #[test]
    fn test_bands_are_open_ended() {
        let bands = category_bands();
        let bands = bands.as_array().unwrap();
        assert_eq!(bands.len(), 6);
        assert_eq!(bands[3]["max"], 300);
        assert_eq!(bands[3]["label"], "Poor");
        assert!(bands[5]["max"].is_null());
    }

    #[test]
    fn test_forecast_confidence_defaults() {
        let entries = vec![
            ForecastEntry {
                forecast_date: "2024-06-01".to_string(),
                predicted_aqi: Some(210),
                confidence_score: Some(0.912),
                ..Default::default()
            },
            ForecastEntry {
                forecast_date: "2024-06-02".to_string(),
                predicted_aqi: Some(180),
                ..Default::default()
            },
        ];
        let config = forecast_chart(&entries);
        assert_eq!(config["data"]["labels"][0], "01 Jun");
        assert_eq!(config["data"]["datasets"][1]["data"], json!([91, 80]));
        assert_eq!(config["data"]["datasets"][1]["yAxisID"], "y1");
        assert_eq!(config["options"]["scales"]["y1"]["max"], 100);
        assert_eq!(config["options"]["scales"]["y"]["max"], 500);
        assert!(config["aqi"]["gradient"].is_null());
    }

    #[test]
    fn test_historical_groups_by_pollutant() {
        let records = vec![
            HistoricalRecord {
                date: Some("2024-01-01".to_string()),
                pollutant_id: Some("PM10".to_string()),
                pollutant_avg: Some(87.5),
                ..Default::default()
            },
            HistoricalRecord {
                date: Some("2024-01-02".to_string()),
                pollutant_id: Some("NO2".to_string()),
                pollutant_avg: None,
                aqi_value: Some(60),
                ..Default::default()
            },
            HistoricalRecord {
                date: Some("2024-01-03".to_string()),
                pollutant_id: Some("OZONE".to_string()),
                ..Default::default()
            },
        ];
        let config = historical_chart(&records);
        let datasets = config["data"]["datasets"].as_array().unwrap();
        let labels: Vec<&str> = datasets.iter().map(|d| d["label"].as_str().unwrap()).collect();
        assert_eq!(labels, vec!["PM10", "NO2"]);
        assert_eq!(datasets[0]["data"][0]["y"], 87.5);
        assert_eq!(datasets[0]["data"][0]["x"], 1704067200000i64);
        assert_eq!(datasets[1]["data"][0]["y"], 60.0);
        assert_eq!(datasets[0]["backgroundColor"], "#f59e0b20");
        assert_eq!(config["options"]["scales"]["x"]["type"], "time");
    }

    #[test]
    fn test_historical_falls_back_to_aqi_series() {
        let records = vec![
            HistoricalRecord {
                date: Some("2024-01-01".to_string()),
                aqi_value: Some(150),
                ..Default::default()
            },
            HistoricalRecord {
                date: Some("not a date".to_string()),
                aqi_value: Some(155),
                ..Default::default()
            },
        ];
        let config = historical_chart(&records);
        let datasets = config["data"]["datasets"].as_array().unwrap();
        assert_eq!(datasets.len(), 1);
        assert_eq!(datasets[0]["label"], "AQI");
        assert_eq!(datasets[0]["data"].as_array().unwrap().len(), 1);
        assert!(historical_chart(&[])["data"]["datasets"]
            .as_array()
            .unwrap()
            .is_empty());
    }
}
