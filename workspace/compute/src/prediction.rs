//! Prediction Client: single-flight submission of a forecast request.

use crate::api::{ApiError, ForecastApi};
use crate::error::{ForecastError, PREDICTION_FALLBACK_MESSAGE, Result};
use crate::input::{EnvironmentalReadings, Selection, SocialIndicators};
use common::{Category, Disease, Month, PredictRequest, PredictResponse};
use std::collections::BTreeMap;
use tracing::{debug, error, info};

/// Forecast payload annotated with what was asked for.
///
/// Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    predictions_by_disease: BTreeMap<Disease, i64>,
    total_expected_patients: i64,
    recommendations: Vec<String>,
    requested_month: Month,
    requested_category: Category,
}

impl PredictionResult {
    pub fn new(response: PredictResponse, requested_month: Month, requested_category: Category) -> Self {
        Self {
            predictions_by_disease: response.predictions,
            total_expected_patients: response.total_expected_patients,
            recommendations: response.recommendation,
            requested_month,
            requested_category,
        }
    }

    pub fn predictions_by_disease(&self) -> &BTreeMap<Disease, i64> {
        &self.predictions_by_disease
    }

    pub fn total_expected_patients(&self) -> i64 {
        self.total_expected_patients
    }

    pub fn recommendations(&self) -> &[String] {
        &self.recommendations
    }

    pub fn requested_month(&self) -> Month {
        self.requested_month
    }

    pub fn month_label(&self) -> &'static str {
        self.requested_month.label()
    }

    pub fn requested_category(&self) -> Category {
        self.requested_category
    }
}

/// A request that has been issued and awaits its response.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "a pending prediction must be completed"]
pub struct PendingPrediction {
    request: PredictRequest,
}

impl PendingPrediction {
    pub fn request(&self) -> &PredictRequest {
        &self.request
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PredictionClient {
    state: SubmitState,
    error: Option<String>,
}

impl PredictionClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmitState::Submitting
    }

    /// Inline message from the last failed attempt.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Convert the inputs into a wire request without touching client state.
    pub fn build_request(
        selection: Selection,
        readings: &EnvironmentalReadings,
        indicators: SocialIndicators,
    ) -> Result<PredictRequest> {
        let parsed = readings.parse()?;
        Ok(PredictRequest {
            month: selection.month,
            category: selection.category,
            humidity: parsed.humidity,
            rainfall: parsed.rainfall,
            temperature: parsed.temperature,
            festive: indicators.festive_indicator(),
            awareness: indicators.awareness,
        })
    }

    /// Enter `Submitting`. Rejected while another submission is in flight.
    pub fn begin(
        &mut self,
        selection: Selection,
        readings: &EnvironmentalReadings,
        indicators: SocialIndicators,
    ) -> Result<PendingPrediction> {
        if self.is_submitting() {
            debug!("Rejecting submission while another is in flight");
            return Err(ForecastError::SubmissionInFlight);
        }

        let request = match Self::build_request(selection, readings, indicators) {
            Ok(request) => request,
            Err(err) => {
                self.error = Some(err.to_string());
                return Err(err);
            }
        };

        self.error = None;
        self.state = SubmitState::Submitting;
        info!(
            month = request.month.number(),
            category = %request.category,
            "Submitting prediction request"
        );
        Ok(PendingPrediction { request })
    }

    /// Leave `Submitting` with the service outcome.
    pub fn complete(
        &mut self,
        pending: PendingPrediction,
        outcome: std::result::Result<PredictResponse, ApiError>,
    ) -> Result<PredictionResult> {
        self.state = SubmitState::Idle;
        match outcome {
            Ok(response) => {
                info!(
                    total = response.total_expected_patients,
                    diseases = response.predictions.len(),
                    "Prediction received"
                );
                Ok(PredictionResult::new(
                    response,
                    pending.request.month,
                    pending.request.category,
                ))
            }
            Err(err) => {
                error!(error = %err, "Prediction failed");
                let message = err
                    .service_message()
                    .unwrap_or(PREDICTION_FALLBACK_MESSAGE)
                    .to_string();
                self.error = Some(message.clone());
                Err(ForecastError::Prediction(message))
            }
        }
    }

    /// Begin, call the service, complete.
    pub async fn submit(
        &mut self,
        api: &dyn ForecastApi,
        selection: Selection,
        readings: &EnvironmentalReadings,
        indicators: SocialIndicators,
    ) -> Result<PredictionResult> {
        let pending = self.begin(selection, readings, indicators)?;
        let outcome = api.predict(pending.request()).await;
        self.complete(pending, outcome)
    }
}
