//! Scripted [`ForecastApi`] and fixtures shared by the core's tests.

use crate::api::{ApiError, ForecastApi};
use async_trait::async_trait;
use common::{Disease, HistoryResponse, Month, PredictRequest, PredictResponse};
use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};

/// History payload whose Dengue average is `month * 10`.
pub fn history_for(month: u8) -> HistoryResponse {
    HistoryResponse {
        avg_cases: [
            (Disease::Dengue, f64::from(month) * 10.0),
            (Disease::Fever, 55.4),
        ]
        .into(),
    }
}

/// Response from the end-to-end Dengue scenario.
pub fn dengue_response() -> PredictResponse {
    PredictResponse {
        predictions: [(Disease::Dengue, 180)].into(),
        total_expected_patients: 180,
        recommendation: vec!["Increase ward capacity".to_string()],
    }
}

/// One prediction per disease, spanning every severity tier.
pub fn full_response() -> PredictResponse {
    let predictions: BTreeMap<Disease, i64> = [
        (Disease::Dengue, 180),
        (Disease::RoadAccidents, 120),
        (Disease::HeartPatients, 75),
        (Disease::HadisiAnthuru, 40),
        (Disease::Tuberculosis, 150),
        (Disease::Cold, 100),
        (Disease::Fever, 60),
    ]
    .into();
    let total = predictions.values().sum();
    PredictResponse {
        predictions,
        total_expected_patients: total,
        recommendation: vec![
            "Increase ward capacity".to_string(),
            "Stock rehydration salts".to_string(),
        ],
    }
}

/// Records every call and answers from scripted queues.
#[derive(Default)]
pub struct MockForecastApi {
    history_calls: RefCell<Vec<Month>>,
    history_failures: RefCell<VecDeque<ApiError>>,
    predict_requests: RefCell<Vec<PredictRequest>>,
    predict_outcomes: RefCell<VecDeque<Result<PredictResponse, ApiError>>>,
}

impl MockForecastApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next history call.
    pub fn fail_next_history(&self, error: ApiError) -> &Self {
        self.history_failures.borrow_mut().push_back(error);
        self
    }

    /// Queue the outcome of the next prediction call.
    pub fn push_prediction(&self, outcome: Result<PredictResponse, ApiError>) -> &Self {
        self.predict_outcomes.borrow_mut().push_back(outcome);
        self
    }

    pub fn history_calls(&self) -> Vec<Month> {
        self.history_calls.borrow().clone()
    }

    pub fn predict_requests(&self) -> Vec<PredictRequest> {
        self.predict_requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl ForecastApi for MockForecastApi {
    async fn history(&self, month: Month) -> Result<HistoryResponse, ApiError> {
        self.history_calls.borrow_mut().push(month);
        match self.history_failures.borrow_mut().pop_front() {
            Some(error) => Err(error),
            None => Ok(history_for(month.number())),
        }
    }

    async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, ApiError> {
        self.predict_requests.borrow_mut().push(request.clone());
        self.predict_outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(dengue_response()))
    }
}
