use common::{Category, Disease};
use thiserror::Error;

/// Message shown when any environmental reading is missing or not numeric.
pub const MISSING_READINGS_MESSAGE: &str = "Please fill all Environmental Factor fields.";

/// Advisory banner shown when past case counts could not be loaded.
pub const HISTORY_WARNING_MESSAGE: &str =
    "Could not auto-load past cases. You can still run prediction.";

/// Fallback shown when a prediction fails without a service-provided message.
pub const PREDICTION_FALLBACK_MESSAGE: &str =
    "Prediction failed. Make sure the prediction service is running.";

/// Input that must be corrected before anything is sent over the wire.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill all Environmental Factor fields.")]
    MissingEnvironmentalFields,
}

/// A prediction payload that disagrees with what was requested.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataConsistencyError {
    #[error("Prediction for {disease} is missing from the service response")]
    MissingDisease { disease: Disease },
}

/// Error types for the orchestration core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Submission blocked by invalid input
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Past case counts could not be loaded (advisory only)
    #[error("{0}")]
    HistoryFetch(String),

    /// The prediction request failed
    #[error("{0}")]
    Prediction(String),

    /// Response contents contradict the request
    #[error(transparent)]
    DataConsistency(#[from] DataConsistencyError),

    /// A prediction is already in flight for this session
    #[error("A prediction is already running")]
    SubmissionInFlight,

    /// Predictions are only accepted while collecting inputs
    #[error("Reset the current result before requesting category {0}")]
    NotCollecting(Category),
}

/// Type alias for Result with ForecastError
pub type Result<T> = std::result::Result<T, ForecastError>;
