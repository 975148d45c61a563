//! Backend maintenance: data refresh and forecast model management.

use crate::output::CityArgs;
use aqi_api::{AqiApi, ApiClient};
use aqi_core::geo::KNOWN_CITIES;
use log::info;
use serde_json::Value;

fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Cities to refresh: the given ones, or every known city.
pub fn refresh_targets(cities: &[String]) -> Vec<String> {
    if cities.is_empty() {
        KNOWN_CITIES.iter().map(|city| city.name.to_string()).collect()
    } else {
        cities.to_vec()
    }
}

pub async fn run_refresh(client: &ApiClient, cities: &[String]) -> anyhow::Result<()> {
    let targets = refresh_targets(cities);
    info!("Refreshing {} cities", targets.len());
    print_json(&client.refresh_data(&targets).await?)
}

pub async fn run_model_info(client: &ApiClient) -> anyhow::Result<()> {
    print_json(&client.model_info().await?)
}

pub async fn run_train(client: &ApiClient, sample_data: bool) -> anyhow::Result<()> {
    info!("Training model (sample data: {})", sample_data);
    print_json(&client.train_model(sample_data).await?)
}

pub async fn run_feature_importance(client: &ApiClient) -> anyhow::Result<()> {
    print_json(&client.feature_importance().await?)
}

pub async fn run_predict(client: &ApiClient, city: &CityArgs) -> anyhow::Result<()> {
    let selection = city.selection()?;
    print_json(&client.predict(&selection.city, &selection.state, None).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_targets() {
        let all = refresh_targets(&[]);
        assert_eq!(all.len(), KNOWN_CITIES.len());
        assert_eq!(all[0], "Delhi");

        let some = refresh_targets(&["Pune".to_string()]);
        assert_eq!(some, vec!["Pune".to_string()]);
    }
}
