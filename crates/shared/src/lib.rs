pub mod chat;
pub mod settings;

pub use chat::{
    ChatTurn, ModelTier, ResponseEnvelope, Role, RoutingDecision, ServiceMode,
    FALLBACK_MODEL_ID, IMAGE_MODEL_ID,
};
pub use settings::{ApiKey, ModelTable, ServiceSettings, SettingsError};
