//! Text corrector: asks the general model to fix spelling and grammar,
//! falling back to a small local substitution table when the call fails.

use regex::{Captures, Regex};
use shared::{ChatTurn, ServiceSettings};
use std::sync::{Arc, LazyLock};

use crate::transport::{to_wire_messages, CompletionRequest, CompletionTransport};

pub const CORRECTION_MAX_TOKENS: u32 = 500;
pub const CORRECTION_TEMPERATURE: f64 = 0.1;

const SPELL_CHECK_INSTRUCTION: &str = "You are a spell checker. Fix spelling, grammar, and punctuation errors. Return ONLY the corrected text, nothing else.";

/// Misspelling → correction, applied in order as case-sensitive whole words.
/// No correction is itself a key, so applying the table is idempotent.
pub const CORRECTIONS: &[(&str, &str)] = &[
    ("i", "I"),
    ("teh", "the"),
    ("recieve", "receive"),
    ("definate", "definite"),
    ("seperate", "separate"),
    ("intergrated", "integrated"),
    ("frontendf", "frontend"),
    ("messase", "message"),
    ("intergtar", "integrate"),
    ("strutiyre", "structure"),
    ("molre", "more"),
    ("attactive", "attractive"),
    ("deply", "deploy"),
    ("resonve", "responsive"),
    ("shahould", "should"),
    ("aswesome", "awesome"),
    ("conatct", "contact"),
    ("atrractive", "attractive"),
    ("reponsive", "responsive"),
    ("fic", "fix"),
    ("chant", "chat"),
    ("buuton", "button"),
];

static CORRECTION_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    CORRECTIONS
        .iter()
        .map(|(wrong, right)| {
            let re = Regex::new(&format!(r"\b{}\b", regex::escape(wrong)))
                .expect("valid correction pattern");
            (re, *right)
        })
        .collect()
});

static SENTENCE_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|[.!?]\s+)([a-z])").expect("valid sentence pattern"));

/// Apply the static correction table only.
pub fn apply_corrections(text: &str) -> String {
    CORRECTION_PATTERNS
        .iter()
        .fold(text.to_string(), |acc, (re, right)| {
            re.replace_all(&acc, *right).into_owned()
        })
}

/// Local, network-free correction: table substitutions, sentence
/// capitalisation, and a closing period when terminal punctuation is missing.
pub fn basic_spell_fix(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let corrected = apply_corrections(text);
    let mut corrected = SENTENCE_START
        .replace_all(&corrected, |caps: &Captures| {
            format!("{}{}", &caps[1], caps[2].to_uppercase())
        })
        .into_owned();

    let end = corrected.trim_end().len();
    if end > 0 && !corrected[..end].ends_with(['.', '!', '?']) {
        corrected.truncate(end);
        corrected.push('.');
    }
    corrected
}

pub struct Corrector {
    transport: Arc<dyn CompletionTransport>,
    model: String,
    title: Option<String>,
}

impl Corrector {
    pub fn new(settings: &ServiceSettings, transport: Arc<dyn CompletionTransport>) -> Self {
        Self {
            transport,
            model: settings.models.general.clone(),
            title: settings.title_for("Spell Checker"),
        }
    }

    /// Corrected text. Blank input comes back untouched without a call.
    pub async fn correct(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }

        let request = CompletionRequest {
            model: self.model.clone(),
            messages: to_wire_messages(&[
                ChatTurn::system(SPELL_CHECK_INSTRUCTION),
                ChatTurn::user(format!("Fix this text: {}", text)),
            ]),
            temperature: CORRECTION_TEMPERATURE,
            max_tokens: CORRECTION_MAX_TOKENS,
            stream: false,
            title: self.title.clone(),
        };

        match self.transport.complete(&request).await {
            Ok(corrected) => corrected,
            Err(e) => {
                tracing::warn!(error = %e, "spell check failed, using local corrections");
                basic_spell_fix(text)
            }
        }
    }
}
