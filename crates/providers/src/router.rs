//! Keyword routing: decides whether a turn asks for an image and which
//! model tier should answer it.
//!
//! Rules are evaluated top to bottom and the first match wins. A rule
//! matches when the caller's mode equals the rule's mode or its keyword
//! pattern appears in the message. `ServiceMode::Auto` has no rule of its
//! own, so keywords alone decide; an explicit mode never pre-empts an
//! earlier rule whose keywords matched.

use regex::Regex;
use shared::{ChatTurn, ModelTable, ModelTier, RoutingDecision, ServiceMode};
use std::sync::LazyLock;

static IMAGE_TRIGGER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)generate.*image|create.*image|make.*image").expect("valid image trigger")
});

const CODE_KEYWORDS: &str = r"(?i)code|programming|javascript|python|react";
const CREATIVE_KEYWORDS: &str = r"(?i)creative|story|poem|art";
const KNOWLEDGE_KEYWORDS: &str = r"(?i)explain|what is|how does";

/// True when the content reads like "generate/create/make ... image".
pub fn mentions_image_generation(content: &str) -> bool {
    IMAGE_TRIGGER.is_match(content)
}

#[derive(Debug, Clone)]
pub struct RoutingRule {
    pub tier: ModelTier,
    pub mode: ServiceMode,
    pattern: Regex,
}

impl RoutingRule {
    pub fn new(tier: ModelTier, mode: ServiceMode, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            tier,
            mode,
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    fn matches(&self, content: &str, mode: ServiceMode) -> bool {
        mode == self.mode || self.pattern.is_match(content)
    }
}

#[derive(Debug, Clone)]
pub struct KeywordRouter {
    rules: Vec<RoutingRule>,
    default_tier: ModelTier,
}

impl KeywordRouter {
    pub fn new(rules: Vec<RoutingRule>, default_tier: ModelTier) -> Self {
        Self {
            rules,
            default_tier,
        }
    }

    pub fn rules(&self) -> &[RoutingRule] {
        &self.rules
    }

    pub fn select_tier(&self, content: &str, mode: ServiceMode) -> ModelTier {
        self.rules
            .iter()
            .find(|rule| rule.matches(content, mode))
            .map(|rule| rule.tier)
            .unwrap_or(self.default_tier)
    }

    /// An attached image or an explicit generation request.
    pub fn is_image_request(&self, turn: &ChatTurn) -> bool {
        turn.image.is_some() || mentions_image_generation(&turn.content)
    }

    pub fn decide(&self, last: &ChatTurn, mode: ServiceMode, models: &ModelTable) -> RoutingDecision {
        let tier = self.select_tier(&last.content, mode);
        RoutingDecision {
            is_image_request: self.is_image_request(last),
            tier,
            selected_model_id: models.get(tier).to_string(),
        }
    }
}

impl Default for KeywordRouter {
    fn default() -> Self {
        let rules = [
            (ModelTier::Code, ServiceMode::Code, CODE_KEYWORDS),
            (ModelTier::Creative, ServiceMode::Creative, CREATIVE_KEYWORDS),
            (ModelTier::Knowledge, ServiceMode::Knowledge, KNOWLEDGE_KEYWORDS),
        ]
        .into_iter()
        .map(|(tier, mode, pattern)| {
            RoutingRule::new(tier, mode, pattern).expect("built-in routing pattern")
        })
        .collect();
        Self::new(rules, ModelTier::General)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(content: &str, mode: ServiceMode) -> ModelTier {
        KeywordRouter::default().select_tier(content, mode)
    }

    #[test]
    fn test_keywords_in_auto_mode() {
        assert_eq!(tier("Fix my Python script", ServiceMode::Auto), ModelTier::Code);
        assert_eq!(tier("write me a POEM", ServiceMode::Auto), ModelTier::Creative);
        assert_eq!(tier("What is a black hole?", ServiceMode::Auto), ModelTier::Knowledge);
        assert_eq!(tier("hello there", ServiceMode::Auto), ModelTier::General);
    }

    #[test]
    fn test_mode_forces_tier() {
        assert_eq!(tier("hello there", ServiceMode::Code), ModelTier::Code);
        assert_eq!(tier("hello there", ServiceMode::Creative), ModelTier::Creative);
        assert_eq!(tier("hello there", ServiceMode::Knowledge), ModelTier::Knowledge);
        assert_eq!(tier("hello there", ServiceMode::General), ModelTier::General);
    }

    #[test]
    fn test_earlier_rule_keywords_beat_later_mode() {
        // Code keywords sit above the creative rule.
        assert_eq!(tier("review my react code", ServiceMode::Creative), ModelTier::Code);
        assert_eq!(tier("a story about javascript", ServiceMode::Auto), ModelTier::Code);
        // Creative keywords sit above the knowledge rule.
        assert_eq!(tier("explain this poem", ServiceMode::Knowledge), ModelTier::Creative);
    }

    #[test]
    fn test_general_mode_does_not_suppress_keywords() {
        assert_eq!(tier("explain closures", ServiceMode::General), ModelTier::Knowledge);
    }

    #[test]
    fn test_keywords_match_inside_words() {
        // Crude substring matching: "start" contains "art".
        assert_eq!(tier("how do I start?", ServiceMode::Auto), ModelTier::Creative);
    }

    #[test]
    fn test_image_detection() {
        let router = KeywordRouter::default();
        assert!(router.is_image_request(&ChatTurn::user("Generate an image of a cat")));
        assert!(router.is_image_request(&ChatTurn::user("can you MAKE me a cool image")));
        assert!(router.is_image_request(&ChatTurn::user("what is this").with_image("https://x/y.png")));
        assert!(!router.is_image_request(&ChatTurn::user("describe an image")));
        assert!(!router.is_image_request(&ChatTurn::user("image generate")));
    }

    #[test]
    fn test_decide_uses_model_table() {
        let models = ModelTable::default();
        let decision = KeywordRouter::default().decide(
            &ChatTurn::user("write a story"),
            ServiceMode::Auto,
            &models,
        );
        assert!(!decision.is_image_request);
        assert_eq!(decision.tier, ModelTier::Creative);
        assert_eq!(decision.selected_model_id, models.creative);
    }

    #[test]
    fn test_custom_rules_are_ordered() {
        let router = KeywordRouter::new(
            vec![
                RoutingRule::new(ModelTier::Knowledge, ServiceMode::Knowledge, "(?i)why").unwrap(),
                RoutingRule::new(ModelTier::Code, ServiceMode::Code, "(?i)rust").unwrap(),
            ],
            ModelTier::General,
        );
        assert_eq!(router.select_tier("why rust?", ServiceMode::Auto), ModelTier::Knowledge);
        assert_eq!(router.select_tier("rust", ServiceMode::Auto), ModelTier::Code);
        assert_eq!(router.rules()[1].pattern(), "(?i)rust");
    }
}
