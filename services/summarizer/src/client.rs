use reqwest::Client;
use tracing::{debug, error};

use crate::config::UpstreamConfig;
use crate::error::SummarizeError;
use crate::models::{ChatCompletionRequest, ChatCompletionResponse};

/// HTTP client for the chat-completion upstream. Cloning shares the connection pool.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    config: UpstreamConfig,
}

impl UpstreamClient {
    pub fn new(config: UpstreamConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { client, config })
    }

    /// Sends one completion request. No retries.
    pub async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, SummarizeError> {
        debug!(
            "Sending completion request to {} (model: {})",
            self.config.url, request.model
        );

        let response = self
            .client
            .post(&self.config.url)
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    error!(
                        "Completion request to {} timed out after {:?}",
                        self.config.url, self.config.timeout
                    );
                } else {
                    error!("Failed to send completion request to {}: {}", self.config.url, e);
                }
                SummarizeError::UnexpectedFailure(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %body, "Upstream service error");
            return Err(SummarizeError::UpstreamServiceError {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<ChatCompletionResponse>().await.map_err(|e| {
            error!("Failed to parse completion response: {}", e);
            SummarizeError::UnexpectedFailure(e.to_string())
        })
    }
}
