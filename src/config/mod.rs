use std::path::PathBuf;

use crate::constants;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub theme_store_path: PathBuf,
    pub ocr: OcrSettings,
}

/// Settings handed to the extractor. The extractor never reads the
/// environment on its own.
#[derive(Debug, Clone)]
pub struct OcrSettings {
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: constants::GROQ_CHAT_COMPLETIONS_URL.to_string(),
            model: constants::OCR_MODEL.to_string(),
        }
    }
}

impl OcrSettings {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Returns the credential when one is set and not blank.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("GROQ_API_KEY").ok(),
            api_url: std::env::var("GROQ_API_URL")
                .unwrap_or_else(|_| constants::GROQ_CHAT_COMPLETIONS_URL.to_string()),
            model: std::env::var("OCR_MODEL").unwrap_or_else(|_| constants::OCR_MODEL.to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| constants::DEFAULT_HOST.to_string());
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(constants::DEFAULT_PORT);

        Self {
            host,
            port,
            theme_store_path: PathBuf::from(
                std::env::var("THEME_STORE_PATH")
                    .unwrap_or_else(|_| constants::DEFAULT_THEME_STORE_PATH.to_string()),
            ),
            ocr: OcrSettings::from_env(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_credential_is_absent() {
        let settings = OcrSettings::with_api_key("   ");
        assert!(settings.credential().is_none());

        let settings = OcrSettings::with_api_key(" gsk_123 ");
        assert_eq!(settings.credential(), Some("gsk_123"));
    }

    #[test]
    fn test_default_settings_target_groq() {
        let settings = OcrSettings::default();
        assert!(settings.api_key.is_none());
        assert_eq!(settings.api_url, constants::GROQ_CHAT_COMPLETIONS_URL);
        assert_eq!(settings.model, constants::OCR_MODEL);
    }
}
