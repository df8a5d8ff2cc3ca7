use base64::{engine::general_purpose, Engine as _};
use std::path::Path;

use crate::constants::{FALLBACK_MEDIA_TYPE, IMAGE_MEDIA_TYPES};

/// Encodes raw bytes as a `data:` URI carrying its own media type.
pub fn encode_data_uri(media_type: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        media_type,
        general_purpose::STANDARD.encode(bytes)
    )
}

pub fn media_type_for_path(path: &Path) -> &'static str {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .and_then(|ext| {
            IMAGE_MEDIA_TYPES
                .iter()
                .find(|(known, _)| *known == ext)
                .map(|(_, media_type)| *media_type)
        })
        .unwrap_or(FALLBACK_MEDIA_TYPE)
}
