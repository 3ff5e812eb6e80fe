//! Turning local files into transcript turns.
//!
//! Images are embedded as `data:` URLs so the model can analyse them; any
//! other file is inlined as text.

use anyhow::{anyhow, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use shared::ChatTurn;
use std::path::Path;

pub const ANALYZE_IMAGE_PROMPT: &str = "Please analyze this image";

fn image_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

/// User turn carrying an image, ready to be sent for analysis.
pub fn image_turn(path: &Path) -> Result<ChatTurn> {
    let mime = image_mime(path)
        .ok_or_else(|| anyhow!("{} is not a supported image type", path.display()))?;
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let data_url = format!("data:{};base64,{}", mime, STANDARD.encode(bytes));
    Ok(ChatTurn::user(ANALYZE_IMAGE_PROMPT).with_image(data_url))
}

/// User turn with a text file's contents inlined.
pub fn text_file_turn(path: &Path) -> Result<ChatTurn> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(ChatTurn::user(format!("File content:\n\n{}", content)))
}
