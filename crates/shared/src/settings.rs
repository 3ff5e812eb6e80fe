//! Service settings: endpoints, model table, persona and credentials.
//!
//! Settings come from an optional JSON file in the platform config dir,
//! then environment variables override individual fields. The API key is
//! only ever read from configuration and is never serialised back out.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

use crate::chat::ModelTier;

pub const ENV_API_KEY: &str = "OPENROUTER_API_KEY";
pub const ENV_BASE_URL: &str = "OPENROUTER_BASE_URL";
pub const ENV_IMAGE_BASE_URL: &str = "PANDANEXUS_IMAGE_BASE_URL";
pub const ENV_SETTINGS_PATH: &str = "PANDANEXUS_SETTINGS";
pub const ENV_MODEL_GENERAL: &str = "PANDANEXUS_MODEL_GENERAL";
pub const ENV_MODEL_CODE: &str = "PANDANEXUS_MODEL_CODE";
pub const ENV_MODEL_CREATIVE: &str = "PANDANEXUS_MODEL_CREATIVE";
pub const ENV_MODEL_KNOWLEDGE: &str = "PANDANEXUS_MODEL_KNOWLEDGE";

pub const DEFAULT_PERSONA: &str = "You are PandaNexus, an advanced AI assistant. Provide helpful, accurate, and engaging responses. Keep responses conversational and friendly.";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("OPENROUTER_API_KEY not set")]
    MissingApiKey,

    #[error("Invalid {field} URL '{value}': {source}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to read settings file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Bearer credential for the chat-completion API.
///
/// Wiped from memory on drop; `Debug` never prints the secret.
#[derive(Clone)]
pub struct ApiKey(Zeroizing<String>);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(Zeroizing::new(key.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

impl<'de> Deserialize<'de> for ApiKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(ApiKey::new)
    }
}

/// External model identifiers, one per routing tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelTable {
    pub general: String,
    pub creative: String,
    pub code: String,
    pub knowledge: String,
}

impl ModelTable {
    pub fn get(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::General => &self.general,
            ModelTier::Code => &self.code,
            ModelTier::Creative => &self.creative,
            ModelTier::Knowledge => &self.knowledge,
        }
    }
}

impl Default for ModelTable {
    fn default() -> Self {
        Self {
            general: "qwen/qwen-2.5-72b-instruct:free".into(),
            creative: "anthropic/claude-3-haiku:beta".into(),
            code: "meta-llama/llama-3.1-8b-instruct:free".into(),
            knowledge: "google/gemini-flash-1.5:free".into(),
        }
    }
}

/// App attribution headers understood by OpenRouter.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Attribution {
    /// Sent as `HTTP-Referer`
    pub referer: Option<String>,
    /// Prefix for `X-Title`; each component appends its own suffix.
    pub title: Option<String>,
}

fn default_base_url() -> String {
    "https://openrouter.ai/api/v1".into()
}

fn default_image_base_url() -> String {
    "https://image.pollinations.ai".into()
}

fn default_persona() -> String {
    DEFAULT_PERSONA.into()
}

fn default_timeout_secs() -> u64 {
    120
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    #[serde(default, skip_serializing)]
    pub api_key: Option<ApiKey>,
    #[serde(default)]
    pub models: ModelTable,
    /// System turn injected when a transcript carries none.
    #[serde(default = "default_persona")]
    pub persona: String,
    #[serde(default)]
    pub attribution: Attribution,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
            api_key: None,
            models: ModelTable::default(),
            persona: default_persona(),
            attribution: Attribution {
                referer: Some("https://pandanexus.dev".into()),
                title: Some("PandaNexus".into()),
            },
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl ServiceSettings {
    /// Default location of the settings file.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "PandaNexus", "PandaNexus")
            .map(|proj| proj.config_dir().join("settings.json"))
    }

    /// Load settings the way the app does at startup: settings file (if any),
    /// then process environment overrides, then validation.
    pub fn load() -> Result<Self, SettingsError> {
        let path = std::env::var(ENV_SETTINGS_PATH)
            .ok()
            .map(PathBuf::from)
            .or_else(Self::config_path);

        let mut settings = match path {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        settings.apply_overrides(|name| std::env::var(name).ok());
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings =
            serde_json::from_str::<Self>(&contents).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(path = %path.display(), "loaded settings file");
        Ok(settings)
    }

    /// Apply overrides from a variable lookup (normally the process environment).
    /// Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.api_key = Some(ApiKey::new(key.trim()));
        }
        if let Some(url) = get(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(url) = get(ENV_IMAGE_BASE_URL) {
            self.image_base_url = url;
        }
        if let Some(model) = get(ENV_MODEL_GENERAL) {
            self.models.general = model;
        }
        if let Some(model) = get(ENV_MODEL_CODE) {
            self.models.code = model;
        }
        if let Some(model) = get(ENV_MODEL_CREATIVE) {
            self.models.creative = model;
        }
        if let Some(model) = get(ENV_MODEL_KNOWLEDGE) {
            self.models.knowledge = model;
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.api_key()?;
        for (field, value) in [
            ("base", &self.base_url),
            ("image base", &self.image_base_url),
        ] {
            url::Url::parse(value).map_err(|source| SettingsError::InvalidUrl {
                field,
                value: value.clone(),
                source,
            })?;
        }
        Ok(())
    }

    pub fn api_key(&self) -> Result<&ApiKey, SettingsError> {
        self.api_key
            .as_ref()
            .filter(|k| !k.is_empty())
            .ok_or(SettingsError::MissingApiKey)
    }

    /// `X-Title` header value for a component, e.g. "PandaNexus AI Chat".
    pub fn title_for(&self, component: &str) -> Option<String> {
        self.attribution
            .title
            .as_ref()
            .map(|title| format!("{} {}", title, component))
    }
}
