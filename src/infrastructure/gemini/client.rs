//! HTTP client for the Generative Language API.

use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use super::types::{GenerateContentRequest, GenerateContentResponse, error_message};
use crate::domain::models::ProviderConfig;
use crate::domain::ports::{InvokeError, InvokeRequest, ModelInvoker};

/// Configuration for the Gemini HTTP client.
#[derive(Debug, Clone)]
pub struct GeminiClientConfig {
    /// API key for authentication
    pub api_key: String,

    /// Base URL for the API (overridable for testing/proxies)
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GeminiClientConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout_secs: 300,
        }
    }
}

impl From<&ProviderConfig> for GeminiClientConfig {
    fn from(provider: &ProviderConfig) -> Self {
        Self {
            api_key: if provider.api_key.is_empty() {
                std::env::var("GEMINI_API_KEY").unwrap_or_default()
            } else {
                provider.api_key.clone()
            },
            base_url: provider.base_url.clone(),
            timeout_secs: provider.timeout_secs,
        }
    }
}

/// HTTP adapter for the Generative Language API.
///
/// Uses a pooled `reqwest::Client` built once at construction. Every call
/// is a single request; provider failures are classified into typed
/// `InvokeError` variants and never retried here.
pub struct GeminiClient {
    http_client: ReqwestClient,
    base_url: String,
    api_key: String,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(config: GeminiClientConfig) -> Result<Self, InvokeError> {
        // Scrub the API key from logs
        let api_key_scrubbed = if config.api_key.len() > 6 {
            format!("{}...[REDACTED]", &config.api_key[..6])
        } else {
            "[REDACTED]".to_string()
        };
        info!(
            base_url = %config.base_url,
            timeout_secs = config.timeout_secs,
            api_key = %api_key_scrubbed,
            "Initializing Gemini client"
        );

        let http_client = ReqwestClient::builder()
            .pool_max_idle_per_host(10)
            .timeout(Duration::from_secs(config.timeout_secs))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| InvokeError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.base_url,
            api_key: config.api_key,
            timeout_secs: config.timeout_secs,
        })
    }

    async fn execute_request(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<String, InvokeError> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);

        debug!(%url, "POST generateContent");

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    InvokeError::Timeout(self.timeout_secs)
                } else {
                    InvokeError::Network(e.to_string())
                }
            })?;

        self.handle_response(response).await
    }

    async fn handle_response(&self, response: Response) -> Result<String, InvokeError> {
        let status = response.status();

        debug!(%status, "Response received");

        if !status.is_success() {
            return Err(self.handle_error_response(status, response).await);
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| InvokeError::Network(format!("malformed response body: {e}")))?;

        parsed.first_text().ok_or(InvokeError::EmptyResponse)
    }

    async fn handle_error_response(&self, status: StatusCode, response: Response) -> InvokeError {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unable to read error body".to_string());
        let message = error_message(&body);

        warn!(%status, %message, "Provider error");

        match status {
            StatusCode::BAD_REQUEST => InvokeError::InvalidRequest(message),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => InvokeError::InvalidApiKey,
            StatusCode::TOO_MANY_REQUESTS => InvokeError::RateLimitExceeded,
            _ => InvokeError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }
}

#[async_trait]
impl ModelInvoker for GeminiClient {
    #[instrument(skip(self, req), fields(role = %req.role, model = %req.model))]
    async fn invoke(&self, req: InvokeRequest) -> Result<String, InvokeError> {
        if req.cancel.is_cancelled() {
            return Err(InvokeError::Cancelled);
        }

        let body = GenerateContentRequest::from_prompt(&req.prompt, req.temperature);

        let call = self.execute_request(&req.model, &body);

        let result = tokio::select! {
            () = req.cancel.cancelled() => Err(InvokeError::Cancelled),
            outcome = async {
                match req.deadline {
                    Some(deadline) => tokio::time::timeout(deadline, call)
                        .await
                        .unwrap_or(Err(InvokeError::Timeout(deadline.as_secs()))),
                    None => call.await,
                }
            } => outcome,
        };

        match &result {
            Ok(text) => debug!(chars = text.len(), "Generation succeeded"),
            Err(err) => error!(%err, "Generation failed"),
        }

        result
    }
}
