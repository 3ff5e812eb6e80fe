//! In-memory transport for unit tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::StatusCode;
use std::sync::Arc;

use crate::error::ProviderError;
use crate::transport::{CompletionRequest, CompletionTransport};

enum Reply {
    Text(String),
    Status(u16),
    Missing,
}

pub(crate) struct FakeTransport {
    reply: Reply,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl FakeTransport {
    fn with(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn replying(text: &str) -> Arc<Self> {
        Self::with(Reply::Text(text.to_string()))
    }

    pub fn failing(status: u16) -> Arc<Self> {
        Self::with(Reply::Status(status))
    }

    pub fn empty() -> Arc<Self> {
        Self::with(Reply::Missing)
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl CompletionTransport for FakeTransport {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        self.requests.lock().push(request.clone());
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Status(code) => Err(ProviderError::Status {
                status: StatusCode::from_u16(*code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                detail: String::new(),
            }),
            Reply::Missing => Err(ProviderError::MissingContent),
        }
    }
}
