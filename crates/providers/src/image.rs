//! Image-generation requests are answered by building a URL to a public
//! text-to-image service. The URL is embedded directly by the UI; nothing
//! here fetches it.

use regex::Regex;
use std::sync::LazyLock;

pub const IMAGE_WIDTH: u32 = 512;
pub const IMAGE_HEIGHT: u32 = 512;

static TRIGGER_VERBS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)generate|create|make").expect("valid trigger verbs"));

/// Strip every trigger verb (case-insensitive) and surrounding whitespace.
pub fn image_prompt(content: &str) -> String {
    TRIGGER_VERBS.replace_all(content, "").trim().to_string()
}

/// `{base}/prompt/{encoded}?width=512&height=512&seed={seed}`
pub fn image_generation_url(base_url: &str, prompt: &str, seed: i64) -> String {
    format!(
        "{}/prompt/{}?width={}&height={}&seed={}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(prompt),
        IMAGE_WIDTH,
        IMAGE_HEIGHT,
        seed
    )
}

pub fn confirmation_message(prompt: &str) -> String {
    format!(
        "I've generated an image for: \"{}\". Here's your custom AI-generated image!",
        prompt
    )
}
