//! The reqwest-backed client.

use crate::config::{merge_headers, ApiConfig};
use crate::envelope::{check_success, decode_data, HealthAdvice};
use crate::error::{ApiError, Result};
use crate::notify::Notifier;
use crate::query::{ForecastQuery, ForecastTarget, HistoricalQuery, Params, RealtimeQuery};
use crate::AqiApi;
use aqi_core::category::AqiCategory;
use aqi_core::models::{AqiReading, ForecastEntry, HistoricalRecord};
use aqi_core::recommendation::HealthRecommendation;
use reqwest::{Method, Url};
use serde_json::{json, Value};
use std::future::Future;
use std::rc::Rc;

/// Forecast horizon used by the generation endpoints when none is given.
pub const DEFAULT_GENERATION_DAYS: u32 = 3;

#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub query: Params,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            query: Params::new(),
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn with_query(mut self, query: Params) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// `base_url + endpoint`, with the query string appended when there is one.
pub fn build_url(base_url: &str, endpoint: &str, query: &Params) -> Result<Url> {
    let raw = format!("{}{}", base_url, endpoint);
    let mut url = Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))?;
    if !query.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
    }
    Ok(url)
}

/// Run one request with the loading indicator shown, and report a failure
/// through the notifier before handing it back to the caller.
pub async fn with_feedback<T, F>(notifier: &dyn Notifier, endpoint: &str, request: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    notifier.loading_started();
    let outcome = request.await;
    notifier.loading_finished();
    if let Err(e) = &outcome {
        log::error!("API request failed: {} {}", endpoint, e);
        notifier.error(&e.to_string());
    }
    outcome
}

pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    notifier: Rc<dyn Notifier>,
}

impl ApiClient {
    pub fn new(config: ApiConfig, notifier: Rc<dyn Notifier>) -> Result<Self> {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(config.timeout);
        let http = builder
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        log::info!("API client targeting {}", config.base_url);
        Ok(Self {
            http,
            config,
            notifier,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn notifier(&self) -> Rc<dyn Notifier> {
        Rc::clone(&self.notifier)
    }

    /// Send a request and return the envelope body once `success` is `true`.
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> Result<Value> {
        with_feedback(self.notifier.as_ref(), endpoint, self.send(endpoint, options)).await
    }

    async fn send(&self, endpoint: &str, options: RequestOptions) -> Result<Value> {
        let url = build_url(&self.config.base_url, endpoint, &options.query)?;
        log::debug!("{} {}", options.method, url);
        let mut builder = self.http.request(options.method, url);
        for (name, value) in merge_headers(&self.config.default_headers, &options.headers) {
            builder = builder.header(name, value);
        }
        if let Some(body) = options.body {
            builder = builder.body(serde_json::to_string(&body)?);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
            });
        }
        let body: Value = response.json().await?;
        check_success(body)
    }

    /// GET `endpoint` and decode the body inside the feedback wrapper, so a
    /// malformed payload is reported like any other failure.
    async fn get_decoded<T>(
        &self,
        endpoint: &str,
        params: Params,
        decode: impl FnOnce(&Value) -> Result<T>,
    ) -> Result<T> {
        let options = RequestOptions::new(Method::GET).with_query(params);
        with_feedback(self.notifier.as_ref(), endpoint, async {
            let body = self.send(endpoint, options).await?;
            decode(&body)
        })
        .await
    }

    pub async fn get(&self, endpoint: &str, params: Params) -> Result<Value> {
        self.request(endpoint, RequestOptions::new(Method::GET).with_query(params))
            .await
    }

    pub async fn post(&self, endpoint: &str, data: Value) -> Result<Value> {
        self.request(endpoint, RequestOptions::new(Method::POST).with_body(data))
            .await
    }

    pub async fn put(&self, endpoint: &str, data: Value) -> Result<Value> {
        self.request(endpoint, RequestOptions::new(Method::PUT).with_body(data))
            .await
    }

    pub async fn delete(&self, endpoint: &str) -> Result<Value> {
        self.request(endpoint, RequestOptions::new(Method::DELETE))
            .await
    }

    pub async fn model_info(&self) -> Result<Value> {
        self.get("/ml/model/info", Params::new()).await
    }

    pub async fn train_model(&self, use_sample_data: bool) -> Result<Value> {
        self.post("/ml/model/train", json!({ "use_sample_data": use_sample_data }))
            .await
    }

    pub async fn batch_generate_forecasts(&self, forecast_days: u32) -> Result<Value> {
        self.post(
            "/ml/forecasts/batch-generate",
            json!({ "forecast_days": forecast_days }),
        )
        .await
    }

    pub async fn feature_importance(&self) -> Result<Value> {
        self.get("/ml/model/feature-importance", Params::new()).await
    }

    pub async fn predict(&self, city: &str, state: &str, features: Option<Value>) -> Result<Value> {
        self.post(
            "/ml/model/predict",
            json!({ "city": city, "state": state, "features": features }),
        )
        .await
    }
}

impl AqiApi for ApiClient {
    async fn realtime(&self, query: &RealtimeQuery) -> Result<Vec<AqiReading>> {
        self.get_decoded("/aqi/realtime", query.to_params(), decode_data)
            .await
    }

    async fn historical(&self, query: &HistoricalQuery) -> Result<Vec<HistoricalRecord>> {
        self.get_decoded("/aqi/historical", query.to_params(), decode_data)
            .await
    }

    async fn forecast(&self, query: &ForecastQuery) -> Result<Vec<ForecastEntry>> {
        self.get_decoded("/aqi/forecast", query.to_params(), decode_data)
            .await
    }

    async fn health_recommendations(
        &self,
        aqi: u32,
        sensitive_group: bool,
    ) -> Result<Vec<HealthRecommendation>> {
        let params = vec![
            ("aqi", aqi.to_string()),
            ("sensitive_group", sensitive_group.to_string()),
        ];
        let category = AqiCategory::from_aqi(f64::from(aqi));
        self.get_decoded("/aqi/health-recommendations", params, |body| {
            Ok(HealthAdvice::from_body(body)?.into_recommendations(category))
        })
        .await
    }

    async fn generate_forecasts(&self, cities: &[ForecastTarget], forecast_days: u32) -> Result<Value> {
        self.post(
            "/ml/forecasts/generate",
            json!({ "cities": cities, "forecast_days": forecast_days }),
        )
        .await
    }

    async fn refresh_data(&self, cities: &[String]) -> Result<Value> {
        self.post("/aqi/refresh-data", json!({ "cities": cities }))
            .await
    }
}
