//! Wire types for OpenAI-compatible chat completions and the transport seam
//! the responder and corrector call through.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::{ChatTurn, Role};

use crate::error::ProviderError;

// ── Request types ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
    pub stream: bool,
    /// `X-Title` attribution for this call; sent as a header, not in the body.
    #[serde(skip)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireMessage {
    pub role: Role,
    pub content: WireContent,
}

/// Plain text, or text plus an image reference for vision-capable models.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WireContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageRef },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageRef {
    pub url: String,
}

impl From<&ChatTurn> for WireMessage {
    fn from(turn: &ChatTurn) -> Self {
        let content = match &turn.image {
            Some(url) => WireContent::Parts(vec![
                ContentPart::Text {
                    text: turn.content.clone(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageRef { url: url.clone() },
                },
            ]),
            None => WireContent::Text(turn.content.clone()),
        };
        Self {
            role: turn.role,
            content,
        }
    }
}

/// Convert a transcript to provider format, preserving order.
pub fn to_wire_messages(transcript: &[ChatTurn]) -> Vec<WireMessage> {
    transcript.iter().map(WireMessage::from).collect()
}

// ── Response types ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompletionChoice {
    #[serde(default)]
    pub message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl CompletionResponse {
    /// `choices[0].message.content`, treating empty text as absent.
    pub fn into_content(self) -> Result<String, ProviderError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|text| !text.is_empty())
            .ok_or(ProviderError::MissingContent)
    }
}

// ── Seam ─────────────────────────────────────────────────────────────

/// Issues one chat-completion call and returns the assistant text.
///
/// Implementations must not retry; callers rely on exactly one outbound
/// call per invocation.
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError>;
}
