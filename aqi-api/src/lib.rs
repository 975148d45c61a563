//! Client for the AQI backend REST API.
//!
//! Every call goes through [`ApiClient::request`], which shows the loading
//! indicator, unwraps the `{success, data | error}` envelope and reports
//! failures through a [`Notifier`] before returning them. Section
//! controllers depend on the [`AqiApi`] trait rather than the client.

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod notify;
pub mod query;

pub use client::{ApiClient, RequestOptions, DEFAULT_GENERATION_DAYS};
pub use config::ApiConfig;
pub use error::{ApiError, Result};
pub use notify::{LogNotifier, Notifier};
pub use query::{ForecastQuery, ForecastTarget, HistoricalQuery, RealtimeQuery};

use aqi_core::models::{AqiReading, ForecastEntry, HistoricalRecord};
use aqi_core::recommendation::HealthRecommendation;
use serde_json::Value;

/// The endpoints the dashboard sections use.
#[allow(async_fn_in_trait)]
pub trait AqiApi {
    async fn realtime(&self, query: &RealtimeQuery) -> Result<Vec<AqiReading>>;

    async fn historical(&self, query: &HistoricalQuery) -> Result<Vec<HistoricalRecord>>;

    async fn forecast(&self, query: &ForecastQuery) -> Result<Vec<ForecastEntry>>;

    /// Recommendations for `aqi`. An empty list means the backend had none.
    async fn health_recommendations(
        &self,
        aqi: u32,
        sensitive_group: bool,
    ) -> Result<Vec<HealthRecommendation>>;

    async fn generate_forecasts(&self, cities: &[ForecastTarget], forecast_days: u32) -> Result<Value>;

    async fn refresh_data(&self, cities: &[String]) -> Result<Value>;
}
