use async_trait::async_trait;
use reqwest::Client;
use shared::{ApiKey, ServiceSettings};
use std::time::Duration;

use crate::error::ProviderError;
use crate::transport::{CompletionRequest, CompletionResponse, CompletionTransport};

const MAX_ERROR_DETAIL: usize = 800;

/// Client for any OpenAI-compatible `/chat/completions` endpoint
/// (OpenRouter by default).
pub struct OpenAIClient {
    http: Client,
    api_key: ApiKey,
    base_url: String,
    referer: Option<String>,
}

impl OpenAIClient {
    pub fn new(base_url: &str, api_key: ApiKey, timeout: Duration) -> Result<Self, ProviderError> {
        Ok(Self {
            http: Client::builder().timeout(timeout).build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            referer: None,
        })
    }

    pub fn from_settings(settings: &ServiceSettings) -> Result<Self, ProviderError> {
        let client = Self::new(
            &settings.base_url,
            settings.api_key()?.clone(),
            Duration::from_secs(settings.request_timeout_secs),
        )?;
        Ok(client.with_referer(settings.attribution.referer.clone()))
    }

    pub fn with_referer(mut self, referer: Option<String>) -> Self {
        self.referer = referer;
        self
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionTransport for OpenAIClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        let mut builder = self
            .http
            .post(self.endpoint())
            .bearer_auth(self.api_key.expose())
            .header("Content-Type", "application/json");
        if let Some(referer) = &self.referer {
            builder = builder.header("HTTP-Referer", referer);
        }
        if let Some(title) = &request.title {
            builder = builder.header("X-Title", title);
        }

        tracing::debug!(
            model = %request.model,
            messages = request.messages.len(),
            "sending chat completion"
        );
        let resp = builder.json(request).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let detail: String = body.chars().take(MAX_ERROR_DETAIL).collect();
            return Err(ProviderError::Status { status, detail });
        }

        let bytes = resp.bytes().await?;
        let body: CompletionResponse = serde_json::from_slice(&bytes)?;
        body.into_content()
    }
}
