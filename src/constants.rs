// src/constants.rs

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8081;
pub const DEFAULT_THEME_STORE_PATH: &str = "./data/theme.json";

// OCR endpoint
pub const GROQ_CHAT_COMPLETIONS_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const OCR_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";
pub const OCR_TEMPERATURE: f64 = 0.1;
pub const OCR_MAX_TOKENS: u32 = 2048;
pub const NO_TEXT_SENTINEL: &str = "NO_TEXT_FOUND";

pub const OCR_INSTRUCTION: &str = "Extract ALL text from this image exactly as it appears. \
Copy every piece of text verbatim: printed text, handwriting, mathematical formulas, \
equations and symbols. Preserve the original line breaks and layout. \
Do not summarize, translate, explain or add anything. \
If the image contains no text at all, respond with exactly: NO_TEXT_FOUND";

// Upload limits
pub const MAX_IMAGE_BYTES: u64 = 20 * 1024 * 1024;

// User-facing messages
pub const MSG_NOT_AN_IMAGE: &str = "Please upload an image file (PNG, JPG, WEBP, ...)";
pub const MSG_IMAGE_TOO_LARGE: &str = "Image is too large. Maximum size is 20MB";
pub const MSG_MISSING_API_KEY: &str = "OCR is not configured: GROQ_API_KEY is not set";
pub const MSG_NO_TEXT: &str =
    "No text detected in the image. Try a clearer photo with visible text";
pub const MSG_EXTRACTION_FAILED: &str = "Failed to extract text from image";

// Extension → media type for images loaded from disk
pub const IMAGE_MEDIA_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("heic", "image/heic"),
];
pub const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";
