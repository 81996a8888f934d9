//! Transport seam between the core and the remote prediction service.

use async_trait::async_trait;
use common::{HistoryResponse, Month, PredictRequest, PredictResponse};
use thiserror::Error;

/// Failure reported by a [`ForecastApi`] implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response
    #[error("Request failed: {0}")]
    Transport(String),

    /// The service answered with a non-2xx status
    #[error("HTTP error: {status}")]
    Status { status: u16, message: Option<String> },

    /// A 2xx response whose body did not match the contract
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Error message supplied by the service itself, if any.
    pub fn service_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message: Some(message), .. } => Some(message),
            _ => None,
        }
    }
}

/// Remote prediction/history service.
///
/// Futures are not required to be `Send`: the browser transport is
/// single-threaded and every caller drives these from one logical thread.
#[async_trait(?Send)]
pub trait ForecastApi {
    /// `GET {base}/history?month=N`
    async fn history(&self, month: Month) -> Result<HistoryResponse, ApiError>;

    /// `POST {base}/predict-frontend`
    async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, ApiError>;
}
