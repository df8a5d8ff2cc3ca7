use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::config::OcrSettings;
use crate::constants;
use crate::models::{ImageFile, OcrErrorKind, OcrResult, ValidationResult};
use crate::utils::encode_data_uri;

/// Status and raw body of a completed HTTP exchange
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug)]
pub struct TransportError(pub String);

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransportError: {}", self.0)
    }
}

impl std::error::Error for TransportError {}

/// Sends a JSON body to a chat-completion endpoint
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn post_json(
        &self,
        url: &str,
        api_key: &str,
        body: &Value,
    ) -> Result<TransportResponse, TransportError>;
}

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatTransport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &str,
        api_key: &str,
        body: &Value,
    ) -> Result<TransportResponse, TransportError> {
        let resp = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(body)
            .send()
            .await
            .map_err(|e| TransportError(format!("Failed to send request: {}", e)))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| TransportError(format!("Failed to read response: {}", e)))?;

        Ok(TransportResponse { status, body })
    }
}

/// Checks media type and size before anything is uploaded.
pub fn validate(file: &ImageFile) -> ValidationResult {
    if !file.media_type.starts_with("image/") {
        return ValidationResult::invalid(constants::MSG_NOT_AN_IMAGE);
    }
    if file.size() > constants::MAX_IMAGE_BYTES {
        return ValidationResult::invalid(constants::MSG_IMAGE_TOO_LARGE);
    }
    ValidationResult::ok()
}

/// Turns an image into plain text through a vision-capable chat model.
///
/// One request per call: no retry, no deduplication of concurrent calls,
/// no timeout beyond the transport's own.
#[derive(Clone)]
pub struct ImageTextExtractor {
    settings: OcrSettings,
    transport: Arc<dyn ChatTransport>,
}

impl ImageTextExtractor {
    pub fn new(settings: OcrSettings) -> Self {
        Self::with_transport(settings, Arc::new(ReqwestTransport::new()))
    }

    pub fn with_transport(settings: OcrSettings, transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            settings,
            transport,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.settings.credential().is_some()
    }

    pub fn validate(&self, file: &ImageFile) -> ValidationResult {
        validate(file)
    }

    /// Never fails: every error is folded into [`OcrResult::Failure`].
    pub async fn extract(&self, file: &ImageFile) -> OcrResult {
        let validation = validate(file);
        if let Some(message) = validation.error {
            log::warn!("Rejected {} before upload: {}", file.name, message);
            return OcrResult::failure(OcrErrorKind::Validation, message);
        }

        let image_url = encode_data_uri(&file.media_type, &file.bytes);

        let Some(api_key) = self.settings.credential() else {
            log::error!("GROQ_API_KEY not set");
            return OcrResult::failure(
                OcrErrorKind::Configuration,
                constants::MSG_MISSING_API_KEY,
            );
        };

        log::info!(
            "Extracting text from {} ({} bytes) with {}",
            file.name,
            file.size(),
            self.settings.model
        );

        let request_body = build_request_body(&self.settings.model, &image_url);
        let result = match self
            .transport
            .post_json(&self.settings.api_url, api_key, &request_body)
            .await
        {
            Ok(response) => interpret_response(&response),
            Err(e) => {
                log::error!("OCR request failed: {}", e);
                let message = if e.0.trim().is_empty() {
                    constants::MSG_EXTRACTION_FAILED.to_string()
                } else {
                    e.0
                };
                OcrResult::failure(OcrErrorKind::Transport, message)
            }
        };

        match &result {
            OcrResult::Success { text } => {
                log::info!("Extracted {} characters from {}", text.chars().count(), file.name)
            }
            OcrResult::Failure { kind, message } => {
                log::warn!("OCR for {} failed ({}): {}", file.name, kind, message)
            }
        }
        result
    }
}

pub fn build_request_body(model: &str, image_url: &str) -> Value {
    serde_json::json!({
        "model": model,
        "messages": [
            {
                "role": "user",
                "content": [
                    {
                        "type": "text",
                        "text": constants::OCR_INSTRUCTION
                    },
                    {
                        "type": "image_url",
                        "image_url": { "url": image_url }
                    }
                ]
            }
        ],
        "temperature": constants::OCR_TEMPERATURE,
        "max_tokens": constants::OCR_MAX_TOKENS
    })
}

/// Maps an HTTP exchange onto an [`OcrResult`].
pub fn interpret_response(response: &TransportResponse) -> OcrResult {
    if !response.is_success() {
        let message = serde_json::from_str::<Value>(&response.body)
            .ok()
            .and_then(|body| body["error"]["message"].as_str().map(str::to_string))
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| format!("OCR request failed with status {}", response.status));
        return OcrResult::failure(
            OcrErrorKind::Remote {
                status: response.status,
            },
            message,
        );
    }

    let body: Value = match serde_json::from_str(&response.body) {
        Ok(body) => body,
        Err(e) => {
            return OcrResult::failure(
                OcrErrorKind::Parse,
                format!("Failed to parse response: {}", e),
            );
        }
    };

    let Some(content) = body["choices"][0]["message"]["content"].as_str() else {
        return OcrResult::failure(OcrErrorKind::Parse, "Invalid response format");
    };

    let text = content.trim();
    if text.is_empty() || text == constants::NO_TEXT_SENTINEL {
        return OcrResult::failure(OcrErrorKind::NoTextDetected, constants::MSG_NO_TEXT);
    }

    OcrResult::extracted(text)
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Replays a canned answer and records every request it receives
    pub struct MockTransport {
        reply: Result<TransportResponse, String>,
        pub calls: Mutex<Vec<(String, String, Value)>>,
    }

    impl MockTransport {
        pub fn replying(status: u16, body: Value) -> Arc<Self> {
            Self::replying_raw(status, body.to_string())
        }

        pub fn replying_raw(status: u16, body: impl Into<String>) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(TransportResponse {
                    status,
                    body: body.into(),
                }),
                calls: Mutex::new(Vec::new()),
            })
        }

        pub fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(message.to_string()),
                calls: Mutex::new(Vec::new()),
            })
        }

        pub fn completion(content: &str) -> Arc<Self> {
            Self::replying(
                200,
                serde_json::json!({
                    "choices": [ { "message": { "role": "assistant", "content": content } } ]
                }),
            )
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ChatTransport for MockTransport {
        async fn post_json(
            &self,
            url: &str,
            api_key: &str,
            body: &Value,
        ) -> Result<TransportResponse, TransportError> {
            self.calls
                .lock()
                .unwrap()
                .push((url.to_string(), api_key.to_string(), body.clone()));
            self.reply.clone().map_err(TransportError)
        }
    }
}
