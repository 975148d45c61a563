//! Data queries: realtime readings, historical and forecast CSV exports and
//! health advice.

use crate::output::{date_range, reading_line, recommendation_line, write_output, CityArgs};
use aqi_api::{
    AqiApi, ApiClient, ForecastQuery, ForecastTarget, HistoricalQuery, RealtimeQuery,
    DEFAULT_GENERATION_DAYS,
};
use aqi_core::category::AqiCategory;
use aqi_data::export::{forecast_csv, historical_csv};
use chrono::Local;
use log::info;

/// Days of forecast requested, matching the dashboard.
pub const FORECAST_DAYS: u32 = 7;

pub async fn run_realtime(client: &ApiClient, city: &CityArgs, limit: u32) -> anyhow::Result<()> {
    let query = match city.city {
        Some(_) => RealtimeQuery::for_city(&city.selection()?, limit),
        None => RealtimeQuery::all(limit),
    };
    let readings = client.realtime(&query).await?;
    info!("{} station readings", readings.len());
    for reading in &readings {
        println!("{}", reading_line(reading));
    }
    Ok(())
}

pub async fn run_historical(
    client: &ApiClient,
    city: &CityArgs,
    start: Option<&str>,
    end: Option<&str>,
    output: Option<&str>,
) -> anyhow::Result<()> {
    let selection = city.selection()?;
    let (start, end) = date_range(start, end, Local::now().date_naive())?;
    info!("Querying {} from {} to {}", selection, start, end);

    let records = client
        .historical(&HistoricalQuery::for_range(&selection, start, end))
        .await?;
    if records.is_empty() {
        anyhow::bail!("No historical data for {} in this range", selection);
    }
    write_output(output, &historical_csv(&records)?)
}

pub async fn run_forecast(
    client: &ApiClient,
    city: &CityArgs,
    generate: bool,
    output: Option<&str>,
) -> anyhow::Result<()> {
    let selection = city.selection()?;
    if generate {
        info!("Generating forecasts for {}", selection);
        client
            .generate_forecasts(&[ForecastTarget::for_city(&selection)], DEFAULT_GENERATION_DAYS)
            .await?;
    }

    let entries = client
        .forecast(&ForecastQuery::new(&selection, FORECAST_DAYS))
        .await?;
    if entries.is_empty() {
        anyhow::bail!(
            "No forecast for {}; try again with --generate",
            selection
        );
    }
    write_output(output, &forecast_csv(&entries)?)
}

pub async fn run_health(client: &ApiClient, aqi: u32, sensitive: bool) -> anyhow::Result<()> {
    let category = AqiCategory::from_aqi(f64::from(aqi));
    println!("AQI {} ({}): {}", aqi, category.label(), category.description());

    let recommendations = client.health_recommendations(aqi, sensitive).await?;
    if recommendations.is_empty() {
        println!("No recommendations available");
    }
    for recommendation in &recommendations {
        println!("{}", recommendation_line(recommendation));
    }
    Ok(())
}
