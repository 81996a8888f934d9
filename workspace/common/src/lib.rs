//! Common transport-layer types shared between the CLI, the core and the frontend.
//! These structs mirror the prediction service's request/response payloads
//! so every client deserializes the same shapes.

mod disease;
mod month;

pub use disease::{ALL_TOKEN, Category, Disease, UnknownDisease};
pub use month::{InvalidMonth, Month};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ===================== History =====================

/// Response of `GET /history?month=N`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct HistoryResponse {
    /// Average past case count per disease for the month.
    #[serde(default)]
    pub avg_cases: BTreeMap<Disease, f64>,
}

// ===================== Prediction =====================

/// Request body for `POST /predict-frontend`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictRequest {
    pub month: Month,
    pub category: Category,
    pub humidity: f64,
    pub rainfall: f64,
    pub temperature: f64,
    /// Festival indicator encoded as `0` or `1`.
    pub festive: u8,
    pub awareness: f64,
}

/// Successful response of `POST /predict-frontend`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictResponse {
    pub predictions: BTreeMap<Disease, i64>,
    pub total_expected_patients: i64,
    #[serde(default)]
    pub recommendation: Vec<String>,
}

/// Error body returned by the service on non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict_request_wire_shape() {
        let request = PredictRequest {
            month: Month::new(7).unwrap(),
            category: Category::Disease(Disease::Dengue),
            humidity: 78.5,
            rainfall: 215.4,
            temperature: 31.2,
            festive: 1,
            awareness: 0.8,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "month": 7,
                "category": "Dengue",
                "humidity": 78.5,
                "rainfall": 215.4,
                "temperature": 31.2,
                "festive": 1,
                "awareness": 0.8,
            })
        );
    }

    #[test]
    fn test_predict_response_parses_service_payload() {
        let body = r#"{
            "predictions": {"Dengue": 180, "Road_Accidents": 42},
            "total_expected_patients": 222,
            "recommendation": ["Increase ward capacity"]
        }"#;

        let response: PredictResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.predictions[&Disease::Dengue], 180);
        assert_eq!(response.predictions[&Disease::RoadAccidents], 42);
        assert_eq!(response.total_expected_patients, 222);
        assert_eq!(response.recommendation, vec!["Increase ward capacity"]);
    }

    #[test]
    fn test_history_response_defaults_to_empty() {
        let response: HistoryResponse = serde_json::from_str("{}").unwrap();
        assert!(response.avg_cases.is_empty());

        let response: HistoryResponse =
            serde_json::from_str(r#"{"avg_cases": {"Fever": 88.6}}"#).unwrap();
        assert_eq!(response.avg_cases[&Disease::Fever], 88.6);
    }

    #[test]
    fn test_unknown_disease_key_is_rejected() {
        let history = serde_json::from_str::<HistoryResponse>(
            r#"{"avg_cases": {"Fever": 88.6, "Malaria": 3.0}}"#,
        );
        assert!(history.unwrap_err().to_string().contains("Malaria"));

        let prediction = serde_json::from_str::<PredictResponse>(
            r#"{"predictions": {"Malaria": 4}, "total_expected_patients": 4}"#,
        );
        assert!(prediction.is_err());
    }
}
