//! Argument helpers and output formatting shared by the subcommands.

use aqi_core::dates::parse_iso_date;
use aqi_core::geo::{DEFAULT_CITY, KNOWN_CITIES};
use aqi_core::models::{AqiReading, CitySelection};
use aqi_core::recommendation::HealthRecommendation;
use anyhow::{anyhow, Context};
use chrono::{Duration, NaiveDate};
use clap::Args;
use log::info;

/// Days covered by `historical` when no start date is given.
pub const DEFAULT_HISTORY_DAYS: i64 = 30;

#[derive(Args, Debug, Clone, Default)]
pub struct CityArgs {
    /// City name (default: Delhi)
    #[arg(short, long)]
    pub city: Option<String>,

    /// State; looked up for known cities when omitted
    #[arg(short, long)]
    pub state: Option<String>,
}

impl CityArgs {
    /// The requested city. A known city's state fills in a missing `--state`.
    pub fn selection(&self) -> anyhow::Result<CitySelection> {
        let Some(city) = self.city.as_deref() else {
            return Ok(DEFAULT_CITY.selection());
        };
        if let Some(state) = self.state.as_deref() {
            return Ok(CitySelection::new(city, state));
        }
        KNOWN_CITIES
            .iter()
            .find(|known| known.name.eq_ignore_ascii_case(city))
            .map(|known| known.selection())
            .ok_or_else(|| anyhow!("Unknown city {}; pass --state", city))
    }
}

pub fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    parse_iso_date(raw).ok_or_else(|| anyhow!("Invalid date {:?}, expected YYYY-MM-DD", raw))
}

/// Resolve the optional `--start`/`--end` pair against `today`.
pub fn date_range(
    start: Option<&str>,
    end: Option<&str>,
    today: NaiveDate,
) -> anyhow::Result<(NaiveDate, NaiveDate)> {
    let end = match end {
        Some(raw) => parse_date(raw)?,
        None => today,
    };
    let start = match start {
        Some(raw) => parse_date(raw)?,
        None => end - Duration::days(DEFAULT_HISTORY_DAYS),
    };
    if start > end {
        anyhow::bail!("Start date must be before end date");
    }
    Ok((start, end))
}

/// Write `content` to `path`, or print it when there is no path.
pub fn write_output(path: Option<&str>, content: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content).with_context(|| format!("Failed to write {}", path))?;
            info!("Wrote {}", path);
        }
        None => print!("{}", content),
    }
    Ok(())
}

pub fn reading_line(reading: &AqiReading) -> String {
    let station = reading.station.as_deref().unwrap_or("-");
    format!(
        "{:<16} {:<18} {:<40} {:>4}  {}",
        reading.city,
        reading.state,
        station,
        reading.aqi(),
        reading.category().label()
    )
}

pub fn recommendation_line(recommendation: &HealthRecommendation) -> String {
    format!(
        "[{}] {}: {}",
        recommendation.severity.as_str(),
        recommendation.title,
        recommendation.content
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use aqi_core::recommendation::Severity;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_city_selection() {
        assert_eq!(
            CityArgs::default().selection().unwrap(),
            CitySelection::new("Delhi", "Delhi")
        );

        let known = CityArgs {
            city: Some("pune".to_string()),
            state: None,
        };
        assert_eq!(known.selection().unwrap(), CitySelection::new("Pune", "Maharashtra"));

        let explicit = CityArgs {
            city: Some("Jaipur".to_string()),
            state: Some("Rajasthan".to_string()),
        };
        assert_eq!(explicit.selection().unwrap(), CitySelection::new("Jaipur", "Rajasthan"));

        let unknown = CityArgs {
            city: Some("Jaipur".to_string()),
            state: None,
        };
        assert!(unknown.selection().is_err());
    }

    #[test]
    fn test_date_range_defaults() {
        let today = date(2024, 5, 10);
        assert_eq!(
            date_range(None, None, today).unwrap(),
            (date(2024, 4, 10), today)
        );
        assert_eq!(
            date_range(None, Some("2024-03-31"), today).unwrap(),
            (date(2024, 3, 1), date(2024, 3, 31))
        );
    }

    #[test]
    fn test_date_range_rejects_bad_input() {
        let today = date(2024, 5, 10);
        assert!(date_range(Some("2024-05-11"), Some("2024-05-01"), today).is_err());
        assert!(date_range(Some("10/05/2024"), None, today).is_err());
    }

    #[test]
    fn test_lines() {
        let reading = AqiReading {
            city: "Mumbai".to_string(),
            state: "Maharashtra".to_string(),
            aqi_value: Some(275),
            ..Default::default()
        };
        let line = reading_line(&reading);
        assert!(line.starts_with("Mumbai"));
        assert!(line.ends_with("275  Poor"));

        let recommendation = HealthRecommendation {
            title: "Stay indoors".to_string(),
            content: "Avoid outdoor activity.".to_string(),
            icon: String::new(),
            severity: Severity::Urgent,
        };
        assert_eq!(
            recommendation_line(&recommendation),
            "[urgent] Stay indoors: Avoid outdoor activity."
        );
    }
}
