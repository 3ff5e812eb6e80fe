//! Chat data model shared between the responder and its callers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Model id reported on envelopes produced by the fallback set.
pub const FALLBACK_MODEL_ID: &str = "Fallback System";

/// Model id reported on envelopes produced by the image-generation path.
pub const IMAGE_MODEL_ID: &str = "Pollinations AI";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One turn of a transcript. Transcripts are ordered oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
    /// Embedded image data or URL attached to this turn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ChatTurn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            image: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Caller-supplied hint that biases model selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceMode {
    /// Smart routing: content keywords decide.
    #[default]
    Auto,
    Code,
    Creative,
    Knowledge,
    General,
}

impl ServiceMode {
    pub const ALL: [ServiceMode; 5] = [
        ServiceMode::Auto,
        ServiceMode::Code,
        ServiceMode::Creative,
        ServiceMode::Knowledge,
        ServiceMode::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceMode::Auto => "auto",
            ServiceMode::Code => "code",
            ServiceMode::Creative => "creative",
            ServiceMode::Knowledge => "knowledge",
            ServiceMode::General => "general",
        }
    }

    /// Short label shown next to the mode in a picker.
    pub fn description(&self) -> &'static str {
        match self {
            ServiceMode::Auto => "Smart routing",
            ServiceMode::Code => "Programming help",
            ServiceMode::Creative => "Art & writing",
            ServiceMode::Knowledge => "Q&A expert",
            ServiceMode::General => "General chat",
        }
    }
}

impl fmt::Display for ServiceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown service mode: {0}")]
pub struct UnknownServiceMode(pub String);

impl FromStr for ServiceMode {
    type Err = UnknownServiceMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(ServiceMode::Auto),
            "code" => Ok(ServiceMode::Code),
            "creative" => Ok(ServiceMode::Creative),
            "knowledge" => Ok(ServiceMode::Knowledge),
            // The picker labels the general mode "Chat".
            "general" | "chat" => Ok(ServiceMode::General),
            other => Err(UnknownServiceMode(other.to_string())),
        }
    }
}

/// Key into the configured model-id table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    General,
    Code,
    Creative,
    Knowledge,
}

/// Routing outcome for a single call. Derived fresh each time, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingDecision {
    pub is_image_request: bool,
    pub tier: ModelTier,
    pub selected_model_id: String,
}

/// Normalised result handed back to the UI, whichever path produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub content: String,
    pub model_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ResponseEnvelope {
    pub fn is_fallback(&self) -> bool {
        self.model_id == FALLBACK_MODEL_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_mode_parsing() {
        assert_eq!("Code".parse::<ServiceMode>().unwrap(), ServiceMode::Code);
        assert_eq!(" chat ".parse::<ServiceMode>().unwrap(), ServiceMode::General);
        assert!("poetry".parse::<ServiceMode>().is_err());
        for mode in ServiceMode::ALL {
            assert_eq!(mode.as_str().parse::<ServiceMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_turn_serialization_skips_missing_image() {
        let json = serde_json::to_value(ChatTurn::user("hi")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "user", "content": "hi"}));

        let turn: ChatTurn = serde_json::from_value(serde_json::json!({
            "role": "assistant",
            "content": "look",
            "image": "data:image/png;base64,AAAA"
        }))
        .unwrap();
        assert_eq!(turn.role, Role::Assistant);
        assert_eq!(turn.image.as_deref(), Some("data:image/png;base64,AAAA"));
    }

    #[test]
    fn test_fallback_detection() {
        let env = ResponseEnvelope {
            content: "sorry".into(),
            model_id: FALLBACK_MODEL_ID.into(),
            image_url: None,
        };
        assert!(env.is_fallback());
        let env = ResponseEnvelope {
            model_id: IMAGE_MODEL_ID.into(),
            ..env
        };
        assert!(!env.is_fallback());
    }
}
