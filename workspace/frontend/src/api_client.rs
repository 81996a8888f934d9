use async_trait::async_trait;
use common::{ErrorResponse, HistoryResponse, Month, PredictRequest, PredictResponse};
use compute::{ApiError, ForecastApi};
use gloo_net::http::{Request, Response};
use serde::{Deserialize, Serialize};

use crate::settings;

/// Parse a response body, or the service's error message on non-OK status.
async fn decode<T>(endpoint: &str, response: Response) -> Result<T, ApiError>
where
    T: for<'de> Deserialize<'de>,
{
    if !response.ok() {
        log::warn!("{} - Non-OK response: {}", endpoint, response.status());
        let error_response: Result<ErrorResponse, _> = response.json().await;
        let message = match error_response {
            Ok(err) => {
                log::error!("{} - API error: {}", endpoint, err.error);
                Some(err.error)
            }
            Err(_) => {
                log::error!("{} - HTTP error: {}", endpoint, response.status());
                None
            }
        };
        return Err(ApiError::Status {
            status: response.status(),
            message,
        });
    }

    log::trace!("{} - Response received, parsing JSON", endpoint);
    response.json().await.map_err(|e| {
        let error_msg = e.to_string();
        log::error!("{} - Failed to parse response: {}", endpoint, error_msg);
        ApiError::Decode(error_msg)
    })
}

/// Common GET request handler
pub async fn get<T>(base: &str, endpoint: &str) -> Result<T, ApiError>
where
    T: for<'de> Deserialize<'de>,
{
    let url = format!("{}{}", base, endpoint);
    log::debug!("GET request to: {}", url);

    let response = Request::get(&url).send().await.map_err(|e| {
        let error_msg = e.to_string();
        log::error!("GET {} - Request failed: {}", endpoint, error_msg);
        ApiError::Transport(error_msg)
    })?;

    let data = decode(endpoint, response).await?;
    log::info!("GET {} - Success", endpoint);
    Ok(data)
}

/// Common POST request handler
pub async fn post<T, B>(base: &str, endpoint: &str, body: &B) -> Result<T, ApiError>
where
    T: for<'de> Deserialize<'de>,
    B: Serialize,
{
    let url = format!("{}{}", base, endpoint);
    log::debug!("POST request to: {}", url);

    let response = Request::post(&url)
        .json(body)
        .map_err(|e| {
            let error_msg = format!("Failed to serialize request: {}", e);
            log::error!("POST {} - {}", endpoint, error_msg);
            ApiError::Transport(error_msg)
        })?
        .send()
        .await
        .map_err(|e| {
            let error_msg = e.to_string();
            log::error!("POST {} - Request failed: {}", endpoint, error_msg);
            ApiError::Transport(error_msg)
        })?;

    let data = decode(endpoint, response).await?;
    log::info!("POST {} - Success", endpoint);
    Ok(data)
}

/// Browser transport for the prediction service.
#[derive(Debug, Clone, PartialEq)]
pub struct GlooForecastApi {
    base_url: String,
}

impl GlooForecastApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Base URL is read from settings once, here.
    pub fn from_settings() -> Self {
        Self::new(settings::get_settings().api_base_url())
    }
}

#[async_trait(?Send)]
impl ForecastApi for GlooForecastApi {
    async fn history(&self, month: Month) -> Result<HistoryResponse, ApiError> {
        log::trace!("Fetching history for month {}", month.number());
        let endpoint = format!("/history?month={}", month.number());
        get::<HistoryResponse>(&self.base_url, &endpoint).await
    }

    async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, ApiError> {
        log::trace!("Submitting prediction for {}", request.category);
        post::<PredictResponse, _>(&self.base_url, "/predict-frontend", request).await
    }
}
