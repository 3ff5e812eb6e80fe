//! Message router & responder.
//!
//! `respond` never fails outward: every call yields exactly one
//! [`ResponseEnvelope`]. Upstream failures of any kind become an envelope
//! drawn from [`FALLBACK_RESPONSES`] with the fallback model id.

use shared::{
    ChatTurn, ModelTable, ResponseEnvelope, Role, RoutingDecision, ServiceMode, ServiceSettings,
    FALLBACK_MODEL_ID, IMAGE_MODEL_ID,
};
use std::sync::Arc;

use crate::entropy::{Clock, FallbackPicker, RandomPicker, SystemClock};
use crate::error::ProviderError;
use crate::image::{confirmation_message, image_generation_url, image_prompt};
use crate::router::KeywordRouter;
use crate::transport::{to_wire_messages, CompletionRequest, CompletionTransport};

pub const CHAT_MAX_TOKENS: u32 = 1500;
pub const CREATIVE_TEMPERATURE: f64 = 0.8;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

pub const FALLBACK_RESPONSES: [&str; 4] = [
    "I'm experiencing some technical difficulties right now. Please try again in a moment!",
    "Sorry, I'm having trouble connecting to my AI models. Let me try to help you anyway - what specifically do you need assistance with?",
    "There seems to be a temporary issue with my AI processing. Could you rephrase your question and I'll do my best to help?",
    "I'm currently having some connectivity issues, but I'm still here to help! What can I assist you with today?",
];

pub fn temperature_for(mode: ServiceMode) -> f64 {
    match mode {
        ServiceMode::Creative => CREATIVE_TEMPERATURE,
        _ => DEFAULT_TEMPERATURE,
    }
}

/// Prepend a persona turn unless the transcript already has a system turn
/// somewhere.
pub fn ensure_system_turn(transcript: &mut Vec<ChatTurn>, persona: &str) {
    if !transcript.iter().any(|turn| turn.role == Role::System) {
        transcript.insert(0, ChatTurn::system(persona));
    }
}

pub struct Responder {
    transport: Arc<dyn CompletionTransport>,
    router: KeywordRouter,
    models: ModelTable,
    persona: String,
    image_base_url: String,
    title: Option<String>,
    clock: Arc<dyn Clock>,
    picker: Arc<dyn FallbackPicker>,
}

impl Responder {
    pub fn new(settings: &ServiceSettings, transport: Arc<dyn CompletionTransport>) -> Self {
        Self {
            transport,
            router: KeywordRouter::default(),
            models: settings.models.clone(),
            persona: settings.persona.clone(),
            image_base_url: settings.image_base_url.clone(),
            title: settings.title_for("AI Chat"),
            clock: Arc::new(SystemClock),
            picker: Arc::new(RandomPicker),
        }
    }

    pub fn with_router(mut self, router: KeywordRouter) -> Self {
        self.router = router;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_picker(mut self, picker: Arc<dyn FallbackPicker>) -> Self {
        self.picker = picker;
        self
    }

    /// Answer the final turn of `transcript`. The caller owns the transcript
    /// and re-supplies all of it on every call.
    pub async fn respond(&self, mut transcript: Vec<ChatTurn>, mode: ServiceMode) -> ResponseEnvelope {
        ensure_system_turn(&mut transcript, &self.persona);
        let Some(last) = transcript.last().cloned() else {
            return self.fallback();
        };

        let decision = self.router.decide(&last, mode, &self.models);
        tracing::debug!(
            %mode,
            tier = ?decision.tier,
            model = %decision.selected_model_id,
            image = decision.is_image_request,
            "routed message"
        );

        if decision.is_image_request && last.image.is_none() {
            return self.generate_image(&last.content);
        }

        match self.chat(&transcript, &decision, mode).await {
            Ok(content) => ResponseEnvelope {
                content,
                model_id: decision.selected_model_id,
                image_url: last.image,
            },
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    model = %decision.selected_model_id,
                    "chat completion failed, answering with fallback"
                );
                self.fallback()
            }
        }
    }

    fn generate_image(&self, content: &str) -> ResponseEnvelope {
        let prompt = image_prompt(content);
        let url = image_generation_url(&self.image_base_url, &prompt, self.clock.now_millis());
        ResponseEnvelope {
            content: confirmation_message(&prompt),
            model_id: IMAGE_MODEL_ID.to_string(),
            image_url: Some(url),
        }
    }

    async fn chat(
        &self,
        transcript: &[ChatTurn],
        decision: &RoutingDecision,
        mode: ServiceMode,
    ) -> Result<String, ProviderError> {
        let request = CompletionRequest {
            model: decision.selected_model_id.clone(),
            messages: to_wire_messages(transcript),
            temperature: temperature_for(mode),
            max_tokens: CHAT_MAX_TOKENS,
            stream: false,
            title: self.title.clone(),
        };
        self.transport.complete(&request).await
    }

    pub fn fallback(&self) -> ResponseEnvelope {
        let idx = self.picker.pick(FALLBACK_RESPONSES.len());
        ResponseEnvelope {
            content: FALLBACK_RESPONSES[idx % FALLBACK_RESPONSES.len()].to_string(),
            model_id: FALLBACK_MODEL_ID.to_string(),
            image_url: None,
        }
    }
}
