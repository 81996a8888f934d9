//! reqwest transport for the prediction service.

use async_trait::async_trait;
use common::{ErrorResponse, HistoryResponse, Month, PredictRequest, PredictResponse};
use compute::{ApiError, ForecastApi};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, info, trace, warn};

#[derive(Clone, Debug)]
pub struct HttpForecastApi {
    client: Client,
    base_url: String,
}

impl HttpForecastApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a response into `T`, or into the service's error message on non-2xx.
    async fn decode<T: DeserializeOwned>(endpoint: &str, response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            warn!("{} - Non-OK response: {}", endpoint, status);
            let message = response
                .json::<ErrorResponse>()
                .await
                .ok()
                .map(|body| body.error);
            if let Some(ref message) = message {
                error!("{} - API error: {}", endpoint, message);
            }
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        trace!("{} - Response received, parsing JSON", endpoint);
        response.json::<T>().await.map_err(|e| {
            let error_msg = e.to_string();
            error!("{} - Failed to parse response: {}", endpoint, error_msg);
            ApiError::Decode(error_msg)
        })
    }
}

fn transport_error(endpoint: &str, e: reqwest::Error) -> ApiError {
    error!("{} - Request failed: {}", endpoint, e);
    ApiError::Transport(e.to_string())
}

#[async_trait(?Send)]
impl ForecastApi for HttpForecastApi {
    async fn history(&self, month: Month) -> Result<HistoryResponse, ApiError> {
        let url = self.url("/history");
        debug!("GET request to: {} (month={})", url, month.number());

        let response = self
            .client
            .get(&url)
            .query(&[("month", month.number())])
            .send()
            .await
            .map_err(|e| transport_error("GET /history", e))?;

        let history = Self::decode::<HistoryResponse>("GET /history", response).await?;
        info!("GET /history - Success");
        Ok(history)
    }

    async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, ApiError> {
        let url = self.url("/predict-frontend");
        debug!("POST request to: {}", url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error("POST /predict-frontend", e))?;

        let prediction = Self::decode::<PredictResponse>("POST /predict-frontend", response).await?;
        info!("POST /predict-frontend - Success");
        Ok(prediction)
    }
}
