//! Unwrapping of the `{success, data | error}` response envelope.

use crate::error::{ApiError, Result};
use aqi_core::category::AqiCategory;
use aqi_core::recommendation::{from_advice_map, HealthRecommendation};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub const GENERIC_FAILURE: &str = "API request failed";

/// Pass the body through if `success` is `true`, otherwise turn its `error`
/// field into an [`ApiError::Application`].
pub fn check_success(body: Value) -> Result<Value> {
    if body.get("success").and_then(Value::as_bool) == Some(true) {
        return Ok(body);
    }
    let message = body
        .get("error")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or(GENERIC_FAILURE);
    Err(ApiError::Application(message.to_string()))
}

/// Decode the `data` array. A missing or null `data` is an empty list.
pub fn decode_data<T: DeserializeOwned>(body: &Value) -> Result<Vec<T>> {
    match body.get("data") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(data) => Ok(serde_json::from_value(data.clone())?),
    }
}

/// The two shapes `/aqi/health-recommendations` has been seen to return.
#[derive(Debug, Clone, PartialEq)]
pub enum HealthAdvice {
    List(Vec<HealthRecommendation>),
    AdviceMap(Map<String, Value>),
    Missing,
}

impl HealthAdvice {
    pub fn from_body(body: &Value) -> Result<Self> {
        Ok(match body.get("recommendations") {
            Some(Value::Array(_)) => {
                HealthAdvice::List(serde_json::from_value(body["recommendations"].clone())?)
            }
            Some(Value::Object(map)) => HealthAdvice::AdviceMap(map.clone()),
            _ => HealthAdvice::Missing,
        })
    }

    pub fn into_recommendations(self, category: AqiCategory) -> Vec<HealthRecommendation> {
        match self {
            HealthAdvice::List(list) => list,
            HealthAdvice::AdviceMap(map) => from_advice_map(&map, category),
            HealthAdvice::Missing => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aqi_core::models::AqiReading;
    use aqi_core::recommendation::Severity;
    use serde_json::json;

    #[test]
    fn test_success_passes_through() {
        let body = json!({"success": true, "data": []});
        assert_eq!(check_success(body.clone()).unwrap(), body);
    }

    #[test]
    fn test_failure_messages() {
        let err = check_success(json!({"success": false, "error": "City not found"})).unwrap_err();
        assert_eq!(err, ApiError::Application("City not found".to_string()));

        let err = check_success(json!({"success": false})).unwrap_err();
        assert_eq!(err.to_string(), GENERIC_FAILURE);

        // No flag at all is a failure too.
        assert!(check_success(json!({"data": [1]})).is_err());
    }

    #[test]
    fn test_decode_data() {
        let body = json!({"success": true, "data": [{"city": "Pune", "state": "Maharashtra", "aqi_value": 88}]});
        let readings: Vec<AqiReading> = decode_data(&body).unwrap();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].aqi(), 88);

        let empty: Vec<AqiReading> = decode_data(&json!({"success": true, "message": "none"})).unwrap();
        assert!(empty.is_empty());

        let bad = decode_data::<AqiReading>(&json!({"data": "nope"}));
        assert!(matches!(bad, Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_health_advice_shapes() {
        let list = json!({"recommendations": [
            {"title": "Stay Indoors", "content": "Avoid going out.", "icon": "fa-home", "type": "urgent"}
        ]});
        let recs = HealthAdvice::from_body(&list)
            .unwrap()
            .into_recommendations(AqiCategory::Poor);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].severity, Severity::Urgent);

        let map = json!({"recommendations": {
            "general_advice": "Reduce prolonged exertion.",
            "outdoor_activities": "",
            "color_code": "#ff0000"
        }});
        let recs = HealthAdvice::from_body(&map)
            .unwrap()
            .into_recommendations(AqiCategory::Poor);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].title, "General Advice");

        assert_eq!(HealthAdvice::from_body(&json!({})).unwrap(), HealthAdvice::Missing);
    }
}
