use serde::{Serialize, Serializer};
use std::fmt;
use std::path::Path;

use crate::utils::media_type_for_path;

/// An uploaded image as handed over by the UI layer
#[derive(Debug, Clone)]
pub struct ImageFile {
    /// Original file name, used for logging only
    pub name: String,
    /// Declared media type (e.g. "image/png")
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Reads an image from disk, inferring the media type from its extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_string();
        Ok(Self::new(name, media_type_for_path(path), bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Outcome of the pre-upload checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(message.into()),
        }
    }
}

/// Failure categories of an extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OcrErrorKind {
    /// Wrong media type or oversized file
    Validation,
    /// Missing API credential; no request was sent
    Configuration,
    /// Non-2xx answer from the completion endpoint
    Remote { status: u16 },
    /// Response body did not have the expected shape
    Parse,
    /// Network failure before a response arrived
    Transport,
    /// The model answered but found nothing to read
    NoTextDetected,
}

impl OcrErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OcrErrorKind::Validation => "validation",
            OcrErrorKind::Configuration => "configuration",
            OcrErrorKind::Remote { .. } => "remote",
            OcrErrorKind::Parse => "parse",
            OcrErrorKind::Transport => "transport",
            OcrErrorKind::NoTextDetected => "no_text_detected",
        }
    }
}

impl fmt::Display for OcrErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OcrErrorKind::Remote { status } => write!(f, "remote ({})", status),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Result of one extraction. Built once the whole request chain has
/// finished and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OcrResult {
    Success { text: String },
    Failure { kind: OcrErrorKind, message: String },
}

impl OcrResult {
    pub fn extracted(text: impl Into<String>) -> Self {
        OcrResult::Success { text: text.into() }
    }

    pub fn failure(kind: OcrErrorKind, message: impl Into<String>) -> Self {
        OcrResult::Failure {
            kind,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, OcrResult::Success { .. })
    }

    /// Extracted text; empty for failures.
    pub fn extracted_text(&self) -> &str {
        match self {
            OcrResult::Success { text } => text,
            OcrResult::Failure { .. } => "",
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            OcrResult::Success { .. } => None,
            OcrResult::Failure { message, .. } => Some(message),
        }
    }

    pub fn error_kind(&self) -> Option<OcrErrorKind> {
        match self {
            OcrResult::Success { .. } => None,
            OcrResult::Failure { kind, .. } => Some(*kind),
        }
    }
}

/// Flat wire shape rendered by the UI: `{ success, extractedText, error }`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrResponse<'a> {
    pub success: bool,
    pub extracted_text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
}

impl<'a> From<&'a OcrResult> for OcrResponse<'a> {
    fn from(result: &'a OcrResult) -> Self {
        Self {
            success: result.is_success(),
            extracted_text: result.extracted_text(),
            error: result.error(),
            error_kind: result.error_kind().map(|kind| kind.as_str()),
        }
    }
}

impl Serialize for OcrResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        OcrResponse::from(self).serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_shape() {
        let result = OcrResult::extracted("Hello world");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["extractedText"], "Hello world");
        assert!(json.get("error").is_none());
        assert!(json.get("errorKind").is_none());
    }

    #[test]
    fn test_failure_shape() {
        let result = OcrResult::failure(OcrErrorKind::Remote { status: 429 }, "rate limited");
        assert!(!result.is_success());
        assert_eq!(result.extracted_text(), "");

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["extractedText"], "");
        assert_eq!(json["error"], "rate limited");
        assert_eq!(json["errorKind"], "remote");
    }

    #[test]
    fn test_image_file_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.JPG");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF]).unwrap();

        let file = ImageFile::from_path(&path).unwrap();
        assert_eq!(file.name, "scan.JPG");
        assert_eq!(file.media_type, "image/jpeg");
        assert_eq!(file.size(), 3);
    }
}
