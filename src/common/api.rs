use super::{
    ApiError, ErrorBody, HealthStatus, PREDICTION_FAILED, PredictionRequest, PredictionResponse,
};

/// Default location of the prediction service.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Client for the fertilizer prediction service.
///
/// Cheap to clone, clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        ApiClient::new(DEFAULT_API_URL)
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        ApiClient {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the service for a fertilizer recommendation.
    ///
    /// A non-2xx answer becomes [`ApiError::Service`] carrying the server's `message`,
    /// or a generic one if the body has none. A 2xx body is checked against
    /// [`PredictionResponse`] here, so callers never see a half-formed result.
    pub async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, ApiError> {
        let url = format!("{}/predict", self.base_url);
        let result = self.send_prediction(&url, request).await;
        if let Err(err) = &result {
            tracing::error!(url = %url, status = ?err.status(), "Prediction error: {}", err);
        }
        result
    }

    async fn send_prediction(
        &self,
        url: &str,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, ApiError> {
        tracing::debug!(?request, "Sending prediction request");
        let response = self.client.post(url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(ErrorBody::into_message)
                .unwrap_or_else(|| PREDICTION_FAILED.to_string());
            return Err(ApiError::Service { status, message });
        }

        let body = response.bytes().await?;
        let prediction: PredictionResponse = serde_json::from_slice(&body)
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        tracing::info!(
            fertilizer = %prediction.fertilizer,
            confidence = prediction.confidence,
            "Prediction received"
        );
        Ok(prediction)
    }

    /// Probe the service. Never fails, any error is reported as [`HealthStatus::degraded`].
    pub async fn health_check(&self) -> HealthStatus {
        let url = format!("{}/health", self.base_url);
        match self.fetch_health(&url).await {
            Ok(health) => health,
            Err(err) => {
                tracing::warn!(url = %url, "Health check failed: {}", err);
                HealthStatus::degraded()
            }
        }
    }

    async fn fetch_health(&self, url: &str) -> Result<HealthStatus, ApiError> {
        let response = self.client.get(url).send().await?;
        let health = response.json::<HealthStatus>().await?;
        Ok(health)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let api = ApiClient::new("http://example.com:5000/");
        assert_eq!(api.base_url(), "http://example.com:5000");
        assert_eq!(ApiClient::default().base_url(), DEFAULT_API_URL);
    }

    #[tokio::test]
    #[ignore = "run manually"]
    async fn test_health_check_local() {
        let api = ApiClient::default();
        let health = api.health_check().await;
        println!("{:#?}", health);
    }
}
