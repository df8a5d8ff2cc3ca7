use actix_web::http::{header, StatusCode};
use actix_web::{web, Error, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::constants;
use crate::models::{ImageFile, OcrErrorKind, OcrResult, ValidationResult};
use crate::services::ImageTextExtractor;

#[derive(Debug, Deserialize)]
pub struct UploadParams {
    pub filename: Option<String>,
}

/// Reads the raw body as an image. `None` when it exceeds the size limit;
/// the stream is abandoned as soon as the limit is crossed.
async fn read_upload(
    req: &HttpRequest,
    params: &UploadParams,
    payload: web::Payload,
) -> Result<Option<ImageFile>, Error> {
    let Ok(body) = payload.to_bytes_limited(constants::MAX_IMAGE_BYTES as usize).await else {
        log::warn!("Upload exceeds {} bytes", constants::MAX_IMAGE_BYTES);
        return Ok(None);
    };
    let body = body?;

    let media_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|v| v.trim().to_ascii_lowercase())
        .unwrap_or_default();
    let name = params
        .filename
        .clone()
        .unwrap_or_else(|| "upload".to_string());
    Ok(Some(ImageFile::new(name, media_type, body.to_vec())))
}

fn status_for(result: &OcrResult) -> StatusCode {
    match result.error_kind() {
        None | Some(OcrErrorKind::NoTextDetected) => StatusCode::OK,
        Some(OcrErrorKind::Validation) => StatusCode::BAD_REQUEST,
        Some(OcrErrorKind::Configuration) => StatusCode::SERVICE_UNAVAILABLE,
        Some(OcrErrorKind::Remote { .. })
        | Some(OcrErrorKind::Parse)
        | Some(OcrErrorKind::Transport) => StatusCode::BAD_GATEWAY,
    }
}

/// Raw image body in, `{ success, extractedText, error }` out
pub async fn perform_ocr(
    req: HttpRequest,
    params: web::Query<UploadParams>,
    payload: web::Payload,
    extractor: web::Data<ImageTextExtractor>,
) -> Result<HttpResponse, Error> {
    let result = match read_upload(&req, &params, payload).await? {
        Some(file) => extractor.extract(&file).await,
        None => OcrResult::failure(OcrErrorKind::Validation, constants::MSG_IMAGE_TOO_LARGE),
    };
    Ok(HttpResponse::build(status_for(&result)).json(&result))
}

pub async fn validate_upload(
    req: HttpRequest,
    params: web::Query<UploadParams>,
    payload: web::Payload,
    extractor: web::Data<ImageTextExtractor>,
) -> Result<HttpResponse, Error> {
    let validation = match read_upload(&req, &params, payload).await? {
        Some(file) => extractor.validate(&file),
        None => ValidationResult::invalid(constants::MSG_IMAGE_TOO_LARGE),
    };
    Ok(HttpResponse::Ok().json(validation))
}
