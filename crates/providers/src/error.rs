use reqwest::StatusCode;
use shared::SettingsError;

/// Failure talking to the chat-completion endpoint.
///
/// Never leaves the responder or corrector; both map every variant to
/// their fallback behaviour.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("chat completion error: {status}{}", detail_suffix(.detail))]
    Status { status: StatusCode, detail: String },

    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("No response content received")]
    MissingContent,

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

fn detail_suffix(detail: &str) -> String {
    if detail.trim().is_empty() {
        String::new()
    } else {
        format!("\n{}", detail)
    }
}
