use actix_web::{HttpResponse, ResponseError};
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Theme(ThemeError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Theme(e) => write!(f, "Theme error: {}", e),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = serde_json::json!({ "error": self.to_string() });
        match self {
            AppError::BadRequest(_) | AppError::Theme(ThemeError::InvalidValue { .. }) => {
                HttpResponse::BadRequest().json(body)
            }
            _ => HttpResponse::InternalServerError().json(body),
        }
    }
}

impl From<ThemeError> for AppError {
    fn from(err: ThemeError) -> Self {
        AppError::Theme(err)
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Failures of the theme store and of theme value parsing
#[derive(Debug)]
pub enum ThemeError {
    /// A value outside the declared enum domain
    InvalidValue {
        field: &'static str,
        value: String,
        expected: String,
    },
    /// The persisted record exists but cannot be read back
    Corrupt(String),
    /// The persisted record could not be written
    Storage(String),
    Render(String),
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeError::InvalidValue {
                field,
                value,
                expected,
            } => write!(
                f,
                "invalid {} '{}', expected one of: {}",
                field, value, expected
            ),
            ThemeError::Corrupt(msg) => write!(f, "stored theme is unreadable: {}", msg),
            ThemeError::Storage(msg) => write!(f, "failed to persist theme: {}", msg),
            ThemeError::Render(msg) => write!(f, "failed to render theme: {}", msg),
        }
    }
}

impl std::error::Error for ThemeError {}

impl From<std::io::Error> for ThemeError {
    fn from(err: std::io::Error) -> Self {
        ThemeError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_invalid_theme_value_is_bad_request() {
        let err = AppError::from(ThemeError::InvalidValue {
            field: "mode",
            value: "sepia".to_string(),
            expected: "light, dark".to_string(),
        });
        assert_eq!(err.error_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "Theme error: invalid mode 'sepia', expected one of: light, dark"
        );
    }

    #[test]
    fn test_bad_request_message() {
        let err = AppError::BadRequest("missing field `fontSize`".to_string());
        assert_eq!(err.error_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Bad request: missing field `fontSize`");
    }

    #[test]
    fn test_storage_failure_is_internal() {
        let err = AppError::from(ThemeError::Storage("disk full".to_string()));
        assert_eq!(err.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
