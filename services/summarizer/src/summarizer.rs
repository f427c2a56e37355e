use tracing::{error, info, warn};

use crate::client::UpstreamClient;
use crate::config::UpstreamConfig;
use crate::error::SummarizeError;
use crate::models::ChatCompletionRequest;

#[derive(Clone)]
pub struct Summarizer {
    client: UpstreamClient,
}

impl Summarizer {
    pub fn new(config: UpstreamConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: UpstreamClient::new(config)?,
        })
    }

    /// Summarizes `text` into bullet points via the upstream model.
    ///
    /// Whitespace-only input fails with [`SummarizeError::EmptyInput`] before any
    /// network traffic. Otherwise exactly one upstream call is made and the first
    /// choice's content is returned verbatim.
    pub async fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
        if text.trim().is_empty() {
            warn!("Rejected summarize request with empty text");
            return Err(SummarizeError::EmptyInput);
        }

        let request = ChatCompletionRequest::summarize(text);
        let response = self.client.complete(&request).await?;

        let summary = response.into_first_content().ok_or_else(|| {
            error!("Completion response has no message content in its first choice");
            SummarizeError::UnexpectedFailure(
                "completion response missing choices[0].message.content".to_string(),
            )
        })?;

        info!(
            "Summarized {} bytes of text into {} bytes",
            text.len(),
            summary.len()
        );
        Ok(summary)
    }
}
